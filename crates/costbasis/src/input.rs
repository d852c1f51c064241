//! Parsing and validation of user-entered sale parameters.
//!
//! The engine assumes non-negative quantities and prices; this is where
//! that assumption is enforced.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Input rejected before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// Text that does not parse as a number.
    #[error("'{input}' is not a valid number")]
    NotANumber {
        /// The rejected text.
        input: String,
    },

    /// A negative number of shares.
    #[error("quantity cannot be negative")]
    NegativeQuantity,

    /// A negative price per share.
    #[error("price cannot be negative")]
    NegativePrice,

    /// A menu choice that names no operation.
    #[error("'{input}' is not an operation; choose 1-4 or remaining, sold-basis, remaining-basis, profit")]
    UnknownOperation {
        /// The rejected text.
        input: String,
    },
}

/// Parse a number of shares to sell.
///
/// Parsed as a signed integer first so "-5" is reported as negative rather
/// than as malformed.
pub fn parse_quantity(input: &str) -> Result<u64, InvalidInputError> {
    let trimmed = input.trim();
    let not_a_number = || InvalidInputError::NotANumber {
        input: trimmed.to_string(),
    };

    let value: i128 = trimmed.parse().map_err(|_| not_a_number())?;
    if value < 0 {
        return Err(InvalidInputError::NegativeQuantity);
    }
    u64::try_from(value).map_err(|_| not_a_number())
}

/// Parse a sale price per share.
pub fn parse_price(input: &str) -> Result<Decimal, InvalidInputError> {
    let trimmed = input.trim();
    let price = Decimal::from_str(trimmed).map_err(|_| InvalidInputError::NotANumber {
        input: trimmed.to_string(),
    })?;
    if price < Decimal::ZERO {
        return Err(InvalidInputError::NegativePrice);
    }
    Ok(price)
}

/// Whether an answer to a yes/no prompt means yes.
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
