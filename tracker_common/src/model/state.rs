//! Watchlist state returned by `/state` and the watchlist mutations.
use serde::{Deserialize, Serialize};

use crate::symbols::DEFAULT_WATCHLIST;

/// Persisted client state; currently just the ordered watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Ordered list of tracked symbols.
    #[serde(default)]
    pub watchlist: Vec<String>,
}

impl Default for State {
    fn default() -> Self {
        State {
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}
