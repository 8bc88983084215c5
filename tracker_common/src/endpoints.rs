//! Backend paths, request defaults, and polling periods.

use std::time::Duration;

/// Backend address used when neither the CLI nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Watchlist state.
pub const STATE: &str = "/state";
/// Add a symbol to the watchlist.
pub const WATCHLIST_ADD: &str = "/watchlist/add";
/// Remove a symbol from the watchlist.
pub const WATCHLIST_REMOVE: &str = "/watchlist/remove";
/// Latest quotes for a comma-separated list of tickers.
pub const QUOTE: &str = "/quote";
/// OHLCV bars.
pub const HISTORY: &str = "/history";
/// Recent closes for a sparkline.
pub const SPARKLINE: &str = "/sparkline";
/// Descriptive company data.
pub const INFO: &str = "/info";
/// Monte Carlo percentile bands.
pub const FORECAST: &str = "/forecast";
/// List holdings.
pub const HOLDINGS: &str = "/portfolio/holdings";
/// Insert or update a holding by symbol.
pub const HOLDINGS_UPSERT: &str = "/portfolio/holdings/upsert";
/// Remove a holding by symbol.
pub const HOLDINGS_REMOVE: &str = "/portfolio/holdings/remove";
/// Backend-side portfolio metrics.
pub const METRICS: &str = "/portfolio/metrics";
/// List transactions.
pub const TRANSACTIONS: &str = "/portfolio/transactions";
/// Append a transaction.
pub const TRANSACTIONS_ADD: &str = "/portfolio/transactions/add";

/// Endpoint probed by the connection indicator.
pub const HEALTH: &str = STATE;

/// Default `/history` period.
pub const HISTORY_PERIOD: &str = "1y";
/// Default `/history` bar interval.
pub const HISTORY_INTERVAL: &str = "1d";
/// Default `/sparkline` period.
pub const SPARK_PERIOD: &str = "6mo";
/// Default `/sparkline` bar interval.
pub const SPARK_INTERVAL: &str = "1d";
/// Default number of simulated forecast paths.
pub const FORECAST_PATHS: u32 = 200;
/// Default forecast horizon in trading days.
pub const FORECAST_DAYS: u32 = 252;

/// Currency applied when a form or request leaves it unset.
pub const DEFAULT_CURRENCY: &str = "GBP";

/// Period between connection probes.
pub const HEALTH_INTERVAL: Duration = Duration::from_secs(8);
/// Timeout of a single connection probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);
/// Upper bound on any other request, so a stopped poller is never stuck
/// behind a hung fetch for long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// Period between ticker card refreshes.
pub const CARD_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
