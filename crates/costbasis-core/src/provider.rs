//! Lot providers.
//!
//! A [`LotProvider`] is the engine's only view of the holdings. It exposes the
//! lots in FIFO order and the total quantity owned; the engine never writes
//! back through it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use thiserror::Error;

use crate::{LotId, PurchaseLot};

/// Read-only source of purchase lots.
///
/// Implementations must return lots earliest-acquired first, and the order
/// must be stable across repeated calls within one holdings snapshot.
/// Lot ids must be unique, and `total_owned_quantity` must agree with the sum
/// of the lot quantities, which must fit in a `u64`.
/// [`StaticLotProvider::new`] checks all of this up front.
pub trait LotProvider {
    /// Lots in FIFO order (earliest acquisition first).
    fn lots_in_fifo_order(&self) -> Vec<PurchaseLot>;

    /// Sum of all lot quantities at the time of the call.
    ///
    /// The default sums the lot list and saturates at `u64::MAX`; providers
    /// that cannot guarantee the sum fits should override it.
    fn total_owned_quantity(&self) -> u64 {
        self.lots_in_fifo_order()
            .iter()
            .fold(0u64, |total, lot| total.saturating_add(lot.quantity))
    }
}

impl<P: LotProvider + ?Sized> LotProvider for &P {
    fn lots_in_fifo_order(&self) -> Vec<PurchaseLot> {
        (**self).lots_in_fifo_order()
    }

    fn total_owned_quantity(&self) -> u64 {
        (**self).total_owned_quantity()
    }
}

/// Error raised when a set of lots cannot form a valid snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    /// A lot with zero units.
    #[error("lot {id} has zero quantity")]
    EmptyLot {
        /// The offending lot.
        id: LotId,
    },

    /// A lot with a negative acquisition price.
    #[error("lot {id} has negative unit price {price}")]
    NegativePrice {
        /// The offending lot.
        id: LotId,
        /// The rejected price.
        price: Decimal,
    },

    /// Two lots share an identifier.
    #[error("duplicate lot id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: LotId,
    },

    /// The lot's total cost does not fit in a `Decimal`.
    #[error("lot {id} is too large: quantity times unit price overflows")]
    CostOverflow {
        /// The offending lot.
        id: LotId,
    },

    /// The lot quantities add up to more than `u64::MAX`.
    #[error("total quantity overflows at lot {id}")]
    QuantityOverflow {
        /// The lot whose quantity pushed the total over.
        id: LotId,
    },
}

/// An immutable, validated in-memory set of lots.
///
/// The order of the vector given to [`StaticLotProvider::new`] is the FIFO
/// order.
///
/// # Examples
///
/// ```
/// use costbasis_core::{LotError, LotId, PurchaseLot, StaticLotProvider};
/// use rust_decimal_macros::dec;
///
/// let err = StaticLotProvider::new(vec![
///     PurchaseLot::new(LotId(1), 10, dec!(5)),
///     PurchaseLot::new(LotId(1), 20, dec!(6)),
/// ])
/// .unwrap_err();
///
/// assert_eq!(err, LotError::DuplicateId { id: LotId(1) });
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLotProvider {
    lots: Vec<PurchaseLot>,
    total: u64,
}

impl StaticLotProvider {
    /// Build a provider from lots given in FIFO order.
    pub fn new(lots: Vec<PurchaseLot>) -> Result<Self, LotError> {
        let mut seen = HashSet::with_capacity(lots.len());
        let mut total: u64 = 0;

        for lot in &lots {
            if lot.quantity == 0 {
                return Err(LotError::EmptyLot { id: lot.id });
            }
            if lot.unit_price < Decimal::ZERO {
                return Err(LotError::NegativePrice {
                    id: lot.id,
                    price: lot.unit_price,
                });
            }
            if !seen.insert(lot.id) {
                return Err(LotError::DuplicateId { id: lot.id });
            }
            if lot.total_cost().is_none() {
                return Err(LotError::CostOverflow { id: lot.id });
            }
            total = total
                .checked_add(lot.quantity)
                .ok_or(LotError::QuantityOverflow { id: lot.id })?;
        }

        tracing::debug!(lots = lots.len(), total, "built lot snapshot");

        Ok(Self { lots, total })
    }

    /// The built-in demonstration holdings.
    ///
    /// Three monthly purchases: 100 @ 20 in January, 150 @ 30 in February
    /// and 120 @ 10 in March.
    #[must_use]
    pub fn sample() -> Self {
        let monthly = |id, quantity, price: i64, month| PurchaseLot {
            acquired: NaiveDate::from_ymd_opt(2024, month, 1),
            ..PurchaseLot::new(LotId(id), quantity, Decimal::from(price))
        };
        let lots = vec![
            monthly(1, 100, 20, 1),
            monthly(2, 150, 30, 2),
            monthly(3, 120, 10, 3),
        ];
        let total = lots
            .iter()
            .fold(0, |total: u64, lot| total.saturating_add(lot.quantity));
        Self { lots, total }
    }

    /// The lots held, in FIFO order.
    #[must_use]
    pub fn lots(&self) -> &[PurchaseLot] {
        &self.lots
    }

    /// Number of lots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Check if no lots are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

impl LotProvider for StaticLotProvider {
    fn lots_in_fifo_order(&self) -> Vec<PurchaseLot> {
        self.lots.clone()
    }

    fn total_owned_quantity(&self) -> u64 {
        self.total
    }
}
