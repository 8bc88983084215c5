//! Single-symbol analytics: one year of daily candles plus the forecast band.
use std::path::{Path, PathBuf};

use log::warn;
use tracker_common::endpoints::{FORECAST_DAYS, HISTORY_INTERVAL, HISTORY_PERIOD};
use tracker_common::model::{Bar, Forecast, Info};
use tracker_common::symbols::FALLBACK_SYMBOL;
use tracker_common::{Result, Symbol};

use crate::api::ApiClient;
use crate::chart::Canvas;
use crate::pages::{money, parse_symbols, write_chart};
use crate::svg;

/// Simulated paths requested for the analytics forecast.
pub const FORECAST_PATHS: u32 = 300;

/// Analytics page state.
#[derive(Debug, Clone)]
pub struct Analytics {
    /// Selectable symbols (the watchlist).
    pub symbols: Vec<Symbol>,
    /// Currently selected symbol.
    pub selected: Symbol,
    /// Daily bars for `selected`.
    pub bars: Vec<Bar>,
    /// Forecast for `selected`; `None` when unavailable.
    pub forecast: Option<Forecast>,
    /// Company data for `selected`; `None` when unavailable.
    pub info: Option<Info>,
}

impl Analytics {
    /// Load the watchlist and select `preferred`, else its first entry, else `MSFT`.
    pub fn mount(client: &ApiClient, preferred: Option<Symbol>) -> Result<Self> {
        let symbols = parse_symbols(client.get_state()?.watchlist);
        let selected = match preferred.or_else(|| symbols.first().cloned()) {
            Some(symbol) => symbol,
            None => FALLBACK_SYMBOL.parse()?,
        };
        let mut page = Analytics {
            symbols,
            selected: selected.clone(),
            bars: Vec::new(),
            forecast: None,
            info: None,
        };
        page.select(client, selected)?;
        Ok(page)
    }

    /// Switch to `symbol` and load its data. History errors propagate; forecast
    /// and info failures leave those sections empty.
    pub fn select(&mut self, client: &ApiClient, symbol: Symbol) -> Result<()> {
        self.selected = symbol;
        self.bars = client
            .history(&self.selected, HISTORY_PERIOD, HISTORY_INTERVAL)?
            .bars;
        self.forecast = match client.forecast(&self.selected, FORECAST_PATHS, FORECAST_DAYS) {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                warn!("No forecast for {}: {}", self.selected, e);
                None
            }
        };
        self.info = client.info(&self.selected).ok();
        Ok(())
    }

    /// Text summary of the loaded data.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        let name = self
            .info
            .as_ref()
            .and_then(|i| i.long_name.as_deref().or(i.short_name.as_deref()))
            .unwrap_or("");
        lines.push(format!("{} {}", self.selected, name).trim_end().to_string());
        if let Some(info) = &self.info {
            let sector = info.sector.as_deref().unwrap_or("—");
            let industry = info.industry.as_deref().unwrap_or("—");
            lines.push(format!("Sector: {}  Industry: {}", sector, industry));
        }

        lines.push(format!("{} • 1Y Candles", self.selected));
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => {
                let low = self.bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
                let high = self.bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
                let span = match (first.time(), last.time()) {
                    (Some(from), Some(to)) => {
                        format!("{} → {}", from.format("%Y-%m-%d"), to.format("%Y-%m-%d"))
                    }
                    _ => String::from("—"),
                };
                lines.push(format!(
                    "  {} bars, {}, last close {:.2}, range {:.2}–{:.2}",
                    self.bars.len(),
                    span,
                    last.close,
                    low,
                    high
                ));
            }
            _ => lines.push("  No history available.".to_string()),
        }

        lines.push("Forecast (10-50-90% bands)".to_string());
        match self.forecast.as_ref().and_then(|f| f.horizon().map(|h| (f, h))) {
            Some((forecast, (p10, p50, p90))) => lines.push(format!(
                "  {} days from {}: p10 {}  p50 {}  p90 {}",
                forecast.len().saturating_sub(1),
                money(forecast.s0),
                money(p10),
                money(p50),
                money(p90)
            )),
            None => lines.push("  No forecast available.".to_string()),
        }
        lines.join("\n")
    }

    /// Write the candlestick chart and, when available, the forecast band.
    pub fn write_charts(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = vec![write_chart(
            out_dir,
            &self.selected,
            "candles",
            &svg::candles(&self.bars, Canvas::CANDLES),
        )?];
        if let Some(forecast) = &self.forecast {
            written.push(write_chart(
                out_dir,
                &self.selected,
                "forecast",
                &svg::forecast(forecast, Canvas::FORECAST),
            )?);
        }
        Ok(written)
    }
}
