//! Core types for costbasis
//!
//! This crate provides the data model consumed by the FIFO cost accounting engine:
//!
//! - [`PurchaseLot`] - A discrete purchase of shares at a single unit price
//! - [`LotId`] - Stable identifier of a lot within one provider
//! - [`ShareFragment`] - A quantity sliced from a lot during one sale computation
//! - [`LotProvider`] - Read-only source of lots in FIFO order
//! - [`StaticLotProvider`] - A validated in-memory snapshot of lots
//!
//! # Example
//!
//! ```
//! use costbasis_core::{LotId, LotProvider, PurchaseLot, StaticLotProvider};
//! use rust_decimal_macros::dec;
//!
//! let provider = StaticLotProvider::new(vec![
//!     PurchaseLot::new(LotId(1), 120, dec!(20)),
//!     PurchaseLot::new(LotId(2), 70, dec!(30)),
//! ])
//! .unwrap();
//!
//! assert_eq!(provider.total_owned_quantity(), 190);
//! assert_eq!(provider.lots_in_fifo_order()[0].id, LotId(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fragment;
pub mod lot;
pub mod provider;

pub use fragment::ShareFragment;
pub use lot::{LotId, PurchaseLot};
pub use provider::{LotError, LotProvider, StaticLotProvider};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
