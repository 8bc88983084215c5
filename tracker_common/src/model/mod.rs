//! JSON payloads exchanged with the tracker backend.
//!
//! Field names follow the backend's wire format exactly; Rust-side names are
//! mapped with `serde` attributes where the two differ.
//! - `quote` — latest price per symbol.
//! - `market` — OHLCV bars, sparkline closes, and descriptive info.
//! - `forecast` — Monte Carlo percentile bands.
//! - `portfolio` — holdings, transactions, and backend metrics.
//! - `state` — the persisted watchlist.

pub mod forecast;
pub mod market;
pub mod portfolio;
pub mod quote;
pub mod state;

pub use forecast::Forecast;
pub use market::{Bar, History, Info, Sparkline};
pub use portfolio::{Ack, Holding, PortfolioMetrics, Side, Transaction};
pub use quote::{Quote, QuoteMap};
pub use state::State;
