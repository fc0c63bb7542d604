//! Errors raised by the routing engine.

use crate::core::currency::CurrencyId;
use thiserror::Error;

/// Misuse of a rate graph.
///
/// A missing path or an unavailable rate is not an error: `convert` reports
/// those as [`UNAVAILABLE`](crate::core::rate::UNAVAILABLE).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Currency {id} is outside the universe of {universe} currencies")]
    CurrencyOutOfRange { id: CurrencyId, universe: u32 },

    #[error("A universe of {size} currencies exceeds the limit of {max}")]
    UniverseTooLarge { size: u32, max: u32 },

    #[error("Rate graph queried before init")]
    NotInitialized,
}
