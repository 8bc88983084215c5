//! Portfolio holdings, transactions, and backend metrics.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::endpoints::DEFAULT_CURRENCY;
use crate::error::TrackerError;

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Direction of a transaction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Side {
    /// Purchase.
    #[default]
    #[serde(alias = "buy")]
    Buy,
    /// Sale.
    #[serde(alias = "sell")]
    Sell,
}

impl Side {
    /// Parse user input, mapping failures to `TrackerError::InvalidSide`.
    /// Doubles as the CLI value parser for `--side`.
    pub fn parse(raw: &str) -> Result<Side, TrackerError> {
        raw.trim()
            .parse()
            .map_err(|_| TrackerError::InvalidSide(raw.to_string()))
    }
}

/// A portfolio position, unique by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Backend row id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Symbol identifier.
    pub symbol: String,
    /// Number of units held.
    pub quantity: f64,
    /// Average cost per unit.
    pub avg_cost: f64,
    /// Currency of `avg_cost`.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Holding {
    /// Amount paid for the whole position.
    pub fn cost_basis(&self) -> f64 {
        self.avg_cost * self.quantity
    }
}

/// A recorded trade. Append-only from the client's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Backend row id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Symbol identifier.
    pub symbol: String,
    /// Units traded.
    pub qty: f64,
    /// Price per unit.
    pub price: f64,
    /// Buy or sell.
    pub side: Side,
    /// Currency of `price`.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// `/portfolio/metrics` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Number of holdings.
    pub total_positions: usize,
    /// Sum of `quantity * avg_cost` across holdings.
    pub total_cost: f64,
    /// Reserved by the backend; currently always empty.
    #[serde(default)]
    pub best_earners: Vec<serde_json::Value>,
    /// Holdings the metrics were computed from.
    #[serde(default)]
    pub by_symbol: Vec<Holding>,
}

/// Plain acknowledgement returned by removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// True when the backend applied the change.
    pub ok: bool,
}
