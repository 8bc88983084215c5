//! Blocking HTTP client for the tracker backend.
//!
//! Each method issues exactly one request and decodes the JSON body. Four
//! endpoints (`/state`, `/quote`, `/sparkline`, `/forecast`) fall back to
//! deterministic sample data when the request fails and sample fallback is
//! enabled; every other endpoint propagates the failure to the caller.
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracker_common::endpoints::{self, DEFAULT_BASE_URL, HEALTH_TIMEOUT, REQUEST_TIMEOUT};
use tracker_common::model::{
    Ack, Forecast, History, Holding, Info, PortfolioMetrics, QuoteMap, Side, Sparkline, State,
    Transaction,
};
use tracker_common::{Result, Symbol, TrackerError};

use crate::sample;

type Query<'a> = [(&'a str, String)];

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Serve sample data when a fallback-capable endpoint fails.
    pub sample_fallback: bool,
    /// Timeout of a health probe.
    pub health_timeout: Duration,
    /// Timeout of every other request.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Config for `base_url` with sample fallback enabled.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            sample_fallback: true,
            health_timeout: HEALTH_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Enable or disable sample fallback.
    pub fn with_sample_fallback(mut self, enabled: bool) -> Self {
        self.sample_fallback = enabled;
        self
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Backend API wrapper. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    sample_fallback: bool,
    health_timeout: Duration,
}

impl ApiClient {
    /// Build a client from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("tracker-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sample_fallback: config.sample_fallback,
            health_timeout: config.health_timeout,
        })
    }

    /// Backend root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T> {
        self.send(self.http.get(self.url(path)).query(query), path)
    }

    /// Mutations carry their arguments as query parameters and no body.
    fn post<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T> {
        self.send(self.http.post(self.url(path)).query(query), path)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        debug!("Requesting {}", path);
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn or_sample<T>(&self, path: &str, result: Result<T>, sample: impl FnOnce() -> T) -> Result<T> {
        match result {
            Err(e) if self.sample_fallback && e.is_backend_failure() => {
                warn!("{} failed ({}); serving sample data", path, e);
                Ok(sample())
            }
            other => other,
        }
    }

    /// Watchlist state. Falls back to the default watchlist.
    pub fn get_state(&self) -> Result<State> {
        let result = self.get(endpoints::STATE, &[]);
        self.or_sample(endpoints::STATE, result, sample::state)
    }

    /// Add `symbol` to the watchlist and return the new state.
    pub fn add_watch(&self, symbol: &Symbol) -> Result<State> {
        self.post(endpoints::WATCHLIST_ADD, &[("symbol", symbol.to_string())])
    }

    /// Remove `symbol` from the watchlist and return the new state.
    pub fn remove_watch(&self, symbol: &Symbol) -> Result<State> {
        self.post(endpoints::WATCHLIST_REMOVE, &[("symbol", symbol.to_string())])
    }

    /// Latest quotes for `symbols`, keyed by symbol.
    pub fn quotes(&self, symbols: &[Symbol]) -> Result<QuoteMap> {
        let tickers = symbols.iter().map(Symbol::as_str).collect::<Vec<_>>().join(",");
        let result = self.get(endpoints::QUOTE, &[("tickers", tickers)]);
        self.or_sample(endpoints::QUOTE, result, || sample::quotes(symbols))
    }

    /// Daily bars for `symbol` over `period`.
    pub fn history(&self, symbol: &Symbol, period: &str, interval: &str) -> Result<History> {
        self.get(
            endpoints::HISTORY,
            &[
                ("ticker", symbol.to_string()),
                ("period", period.to_string()),
                ("interval", interval.to_string()),
            ],
        )
    }

    /// Recent closes for `symbol`.
    pub fn spark(&self, symbol: &Symbol, period: &str, interval: &str) -> Result<Sparkline> {
        let result = self.get(
            endpoints::SPARKLINE,
            &[
                ("ticker", symbol.to_string()),
                ("period", period.to_string()),
                ("interval", interval.to_string()),
            ],
        );
        self.or_sample(endpoints::SPARKLINE, result, || sample::sparkline(symbol))
    }

    /// Descriptive company data.
    pub fn info(&self, symbol: &Symbol) -> Result<Info> {
        self.get(endpoints::INFO, &[("ticker", symbol.to_string())])
    }

    /// Percentile bands over `days` trading days from `paths` simulations.
    pub fn forecast(&self, symbol: &Symbol, paths: u32, days: u32) -> Result<Forecast> {
        let result = self.get(
            endpoints::FORECAST,
            &[
                ("ticker", symbol.to_string()),
                ("paths", paths.to_string()),
                ("days", days.to_string()),
            ],
        );
        self.or_sample(endpoints::FORECAST, result, || sample::forecast(symbol, days))
    }

    /// All holdings.
    pub fn list_holdings(&self) -> Result<Vec<Holding>> {
        self.get(endpoints::HOLDINGS, &[])
    }

    /// Insert or replace the holding for `symbol`.
    pub fn upsert_holding(
        &self,
        symbol: &Symbol,
        quantity: f64,
        avg_cost: f64,
        currency: &str,
    ) -> Result<Holding> {
        self.post(
            endpoints::HOLDINGS_UPSERT,
            &[
                ("symbol", symbol.to_string()),
                ("quantity", quantity.to_string()),
                ("avg_cost", avg_cost.to_string()),
                ("currency", currency.to_string()),
            ],
        )
    }

    /// Delete the holding for `symbol`; succeeds even if none exists.
    pub fn remove_holding(&self, symbol: &Symbol) -> Result<Ack> {
        self.post(endpoints::HOLDINGS_REMOVE, &[("symbol", symbol.to_string())])
    }

    /// Backend-side portfolio metrics.
    pub fn metrics(&self) -> Result<PortfolioMetrics> {
        self.get(endpoints::METRICS, &[])
    }

    /// All transactions in insertion order.
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.get(endpoints::TRANSACTIONS, &[])
    }

    /// Append a transaction and return it as stored.
    pub fn add_transaction(
        &self,
        symbol: &Symbol,
        qty: f64,
        price: f64,
        side: Side,
        currency: &str,
    ) -> Result<Transaction> {
        self.post(
            endpoints::TRANSACTIONS_ADD,
            &[
                ("symbol", symbol.to_string()),
                ("qty", qty.to_string()),
                ("price", price.to_string()),
                ("side", side.to_string()),
                ("currency", currency.to_string()),
            ],
        )
    }

    /// Lightweight reachability check with a short timeout. Never falls back.
    pub fn probe(&self) -> bool {
        let request = self.http.get(self.url(endpoints::HEALTH)).timeout(self.health_timeout);
        match request.send() {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Health probe failed: {}", e);
                false
            }
        }
    }
}
