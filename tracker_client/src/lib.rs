//!
//! Client side of the Balanced Global Tracker.
//!
//! This crate aggregates:
//! - `api` — blocking backend client with sample-data fallback.
//! - `sample` — deterministic sample quotes, sparklines, forecasts, and watchlist.
//! - `chart` — coordinate scaling and path construction for every chart.
//! - `svg` — standalone SVG documents built from `chart` geometry.
//! - `poller` — periodic refresh tasks cancelled on drop.
//! - `connection` — backend reachability indicator.
//! - `pages` — dashboard, analytics, portfolio, transactions, and watchlist pages.
//! - `shell` — navigation header.
#![warn(missing_docs)]
pub mod api;
pub mod chart;
pub mod connection;
pub mod pages;
pub mod poller;
pub mod sample;
pub mod shell;
pub mod svg;

#[cfg(test)]
mod test_support;
