//! Ticker symbols and helpers shared by every page.
//!
//! Symbols are free-form exchange tickers (`MSFT`, `BP.L`, `^FTSE`), so they are
//! modelled as a validated, upper-cased string rather than a closed enum.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Watchlist the backend seeds on first start; also served as sample state.
pub const DEFAULT_WATCHLIST: [&str; 7] = ["MSFT", "NVDA", "BP.L", "ULVR.L", "III.L", "INRG.L", "EMIM.L"];

/// Symbol selected when nothing else is available.
pub const FALLBACK_SYMBOL: &str = "MSFT";

/// Trait providing file parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace, or new lines. Duplicates are
    /// dropped while keeping the first occurrence. Returns an error if any entry
    /// cannot be parsed.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Symbol>, TrackerError>;
}

/// Upper-cased ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Borrow the symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for London Stock Exchange listings (`.L` suffix).
    pub fn is_london_listing(&self) -> bool {
        self.0.ends_with(".L")
    }
}

impl FromStr for Symbol {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::Format("empty symbol".to_string()));
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
        if !valid {
            return Err(TrackerError::Format(format!("invalid symbol: {trimmed}")));
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SymbolParser for Symbol {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<Self>, TrackerError> {
        let mut symbols: Vec<Symbol> = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(TrackerError::Io)?;
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                match token.parse::<Self>() {
                    Ok(symbol) => {
                        if !symbols.contains(&symbol) {
                            symbols.push(symbol);
                        }
                    }
                    Err(e) => return Err(TrackerError::ParseSymbolsFile(e.to_string())),
                }
            }
        }
        Ok(symbols)
    }
}
