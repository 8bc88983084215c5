//! Watchlist membership changes.
use tracker_common::model::State;
use tracker_common::{Result, Symbol};

use crate::api::ApiClient;

/// Add or remove a watchlist symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchChange {
    /// Append if absent.
    Add,
    /// Drop if present.
    Remove,
}

/// Apply `change` for `symbol` and return the backend's new state.
pub fn apply(client: &ApiClient, change: WatchChange, symbol: &Symbol) -> Result<State> {
    match change {
        WatchChange::Add => client.add_watch(symbol),
        WatchChange::Remove => client.remove_watch(symbol),
    }
}

/// Numbered watchlist.
pub fn render(state: &State) -> String {
    if state.watchlist.is_empty() {
        return "Watchlist is empty.".to_string();
    }
    state
        .watchlist
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{:>3}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientConfig;
    use crate::test_support::FakeBackend;

    #[test]
    fn add_then_remove() {
        let backend = FakeBackend::start();
        let api = ApiClient::new(ClientConfig::new(&backend.base_url)).unwrap();
        let symbol: Symbol = "tsla".parse().unwrap();

        let added = apply(&api, WatchChange::Add, &symbol).unwrap();
        assert_eq!(added.watchlist.last().map(String::as_str), Some("TSLA"));
        assert!(render(&added).contains(". TSLA"));

        let removed = apply(&api, WatchChange::Remove, &symbol).unwrap();
        assert!(!removed.watchlist.iter().any(|s| s == "TSLA"));
    }

    #[test]
    fn empty_watchlist_message() {
        let state = State { watchlist: Vec::new() };
        assert_eq!(render(&state), "Watchlist is empty.");
    }
}
