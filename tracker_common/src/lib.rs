//!
//! Common types and utilities shared by the tracker client and its tests.
//!
//! This crate aggregates:
//! - `error` — unified error type `TrackerError` used across the workspace.
//! - `result` — handy `Result<T, TrackerError>` alias.
//! - `symbols` — ticker symbols, the default watchlist, and parsing helpers.
//! - `model` — JSON payloads exchanged with the tracker backend.
//! - `endpoints` — backend paths, request defaults, and polling periods.
#![warn(missing_docs)]
pub mod endpoints;
pub mod error;
pub mod model;
pub mod result;
pub mod symbols;

pub use error::TrackerError;
pub use result::Result;
pub use symbols::Symbol;
