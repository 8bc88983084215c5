//! Command-line arguments for the tracker client.
//!
//! This module defines the CLI interface using `clap`. Connection settings can
//! also come from the environment. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracker_common::Symbol;
use tracker_common::endpoints::{DEFAULT_BASE_URL, DEFAULT_CURRENCY};
use tracker_common::model::Side;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Tracker backend root URL.
    #[clap(long, env = "TRACKER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Fail instead of serving sample data when the backend is unreachable.
    #[clap(long, env = "TRACKER_NO_FALLBACK")]
    pub no_fallback: bool,

    /// Directory that receives rendered SVG charts.
    #[clap(long, env = "TRACKER_OUT_DIR", default_value = "charts")]
    pub out_dir: PathBuf,

    /// Page or action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands; the first four mirror the navigation tabs.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Watchlist ticker cards with sparklines.
    Dashboard {
        /// Keep refreshing cards until Ctrl+C.
        #[clap(long)]
        live: bool,
        /// Read the watchlist from a file instead of the backend.
        /// Symbols may be separated by commas, spaces, or new lines.
        #[clap(long)]
        symbols: Option<PathBuf>,
    },
    /// Candles and forecast band for one symbol.
    Analytics {
        /// Symbol to chart; defaults to the first watchlist entry.
        #[clap(long)]
        symbol: Option<Symbol>,
    },
    /// Holdings valued at live quotes.
    Portfolio {
        /// Defaults to `show`.
        #[command(subcommand)]
        action: Option<PortfolioAction>,
    },
    /// Transaction log.
    Transactions {
        /// Defaults to `list`.
        #[command(subcommand)]
        action: Option<TransactionAction>,
    },
    /// Watchlist membership.
    Watch {
        /// Add or remove.
        #[command(subcommand)]
        action: WatchAction,
    },
    /// Backend connectivity.
    Status {
        /// Keep probing and print every transition until Ctrl+C.
        #[clap(long)]
        follow: bool,
    },
}

/// Portfolio actions.
#[derive(Debug, Subcommand)]
pub enum PortfolioAction {
    /// Show holdings and totals.
    Show,
    /// Insert or update a holding.
    Upsert {
        /// Ticker symbol.
        symbol: String,
        /// Units held.
        quantity: f64,
        /// Average cost per unit.
        avg_cost: f64,
        /// Currency of the cost.
        #[clap(long, default_value = DEFAULT_CURRENCY)]
        currency: String,
    },
    /// Remove a holding.
    Remove {
        /// Ticker symbol.
        symbol: Symbol,
    },
    /// Show backend-side metrics.
    Metrics,
}

/// Transaction actions.
#[derive(Debug, Subcommand)]
pub enum TransactionAction {
    /// List transactions.
    List,
    /// Record a transaction.
    Add {
        /// Ticker symbol.
        symbol: String,
        /// Units traded.
        qty: f64,
        /// Price per unit.
        price: f64,
        /// Trade direction.
        #[clap(long, value_parser = Side::parse, default_value_t = Side::Buy)]
        side: Side,
        /// Currency of the price.
        #[clap(long, default_value = DEFAULT_CURRENCY)]
        currency: String,
    },
}

/// Watchlist actions.
#[derive(Debug, Subcommand)]
pub enum WatchAction {
    /// Add a symbol.
    Add {
        /// Ticker symbol.
        symbol: Symbol,
    },
    /// Remove a symbol.
    Remove {
        /// Ticker symbol.
        symbol: Symbol,
    },
}
