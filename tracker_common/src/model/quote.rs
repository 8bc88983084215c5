//! Quote payload returned by `/quote`.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `/quote` answers with one entry per requested ticker, keyed by the ticker as sent.
pub type QuoteMap = HashMap<String, Quote>;

/// Latest market quote for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol identifier.
    pub symbol: String,
    /// Last traded price; `None` when the backend could not resolve one.
    pub price: Option<f64>,
    /// Trading currency reported by the backend.
    #[serde(default)]
    pub currency: Option<String>,
    /// Short display name.
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
}
