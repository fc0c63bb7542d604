//! Core routing engine and application plumbing

pub mod bfs;
pub mod config;
pub mod currency;
pub mod dense;
pub mod error;
pub mod graph;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use currency::{CurrencyId, MAX_CURRENCIES, Universe};
pub use error::RouteError;
pub use graph::{Converter, RateGraph, Strategy};
pub use rate::{FixedRate, RateEdge, RateProvider, UNAVAILABLE};
