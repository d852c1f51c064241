//! FIFO cost accounting engine.
//!
//! This crate provides:
//! - FIFO partitioning of purchase lots into sold and remaining fragments
//! - Weighted-average cost basis of a set of fragments
//! - Realized profit of a sale
//! - [`CostAccountingEngine`], which answers the four sale questions against a
//!   [`LotProvider`](costbasis_core::LotProvider)
//!
//! # Example
//!
//! ```
//! use costbasis_core::{LotId, PurchaseLot};
//! use costbasis_engine::{partition_sold_lots, weighted_average_unit_price};
//! use rust_decimal_macros::dec;
//!
//! let lots = [
//!     PurchaseLot::new(LotId(1), 120, dec!(20)),
//!     PurchaseLot::new(LotId(2), 70, dec!(30)),
//! ];
//!
//! // Selling 150 takes all of lot 1 and 30 units of lot 2
//! let sold = partition_sold_lots(&lots, 150);
//! assert_eq!(sold.len(), 2);
//! assert_eq!(weighted_average_unit_price(&sold), Ok(dec!(22)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod partition;

pub use engine::{CostAccountingEngine, SaleSummary};
pub use error::CostBasisError;
pub use partition::{
    partition_remaining_lots, partition_sold_lots, realized_profit, weighted_average_unit_price,
    Partition,
};
