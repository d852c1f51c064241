//! Error types for the cost accounting engine.

use thiserror::Error;

/// Errors that can occur while answering a sale query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostBasisError {
    /// The sale asks for more units than the provider holds.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Units requested for sale.
        requested: u64,
        /// Units owned at the time of the check.
        available: u64,
    },

    /// A cost or profit does not fit in a `Decimal`.
    #[error("amount too large: {what} overflows")]
    Overflow {
        /// The quantity being computed.
        what: &'static str,
    },
}
