//! Page components.
//!
//! Each page owns its state, seeds it from the backend on mount, derives what it
//! renders from that state, and re-fetches on a timer or after a user action.
//! - `dashboard` — watchlist ticker cards with sparklines.
//! - `analytics` — candlestick history and forecast band for one symbol.
//! - `portfolio` — holdings valued at live quotes.
//! - `transactions` — trade log and entry form.
//! - `watchlist` — watchlist membership changes.
use std::fs;
use std::path::{Path, PathBuf};

use strum_macros::{Display, EnumIter};
use tracker_common::{Result, Symbol};

pub mod analytics;
pub mod dashboard;
pub mod portfolio;
pub mod transactions;
pub mod watchlist;

/// Top-level navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Page {
    /// Live ticker cards.
    Dashboard,
    /// Charts for a single symbol.
    Analytics,
    /// Holdings and totals.
    Portfolio,
    /// Trade log.
    Transactions,
}

/// Formats an amount in the display currency.
pub(crate) fn money(amount: f64) -> String {
    format!("£{:.2}", amount)
}

/// Keep the symbols that parse, logging the rest.
pub(crate) fn parse_symbols<I, S>(raw: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|s| match s.as_ref().parse::<Symbol>() {
            Ok(symbol) => Some(symbol),
            Err(e) => {
                log::warn!("Skipping watchlist entry {:?}: {}", s.as_ref(), e);
                None
            }
        })
        .collect()
}

/// Write an SVG document to `<out_dir>/<symbol>-<kind>.svg`.
pub(crate) fn write_chart(out_dir: &Path, symbol: &Symbol, kind: &str, svg: &str) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let stem: String = symbol
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    let path = out_dir.join(format!("{stem}-{kind}.svg"));
    fs::write(&path, svg)?;
    Ok(path)
}
