//! Share fragments.
//!
//! A [`ShareFragment`] is the part of a lot attributed to either the sold or
//! the remaining side of one sale computation. Fragments are created fresh
//! for every call and never outlive it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{LotId, PurchaseLot};

/// A quantity sliced from a lot.
///
/// The unit price is always copied from the source lot; averaging only
/// happens when fragments are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareFragment {
    /// The lot this fragment was cut from
    pub lot_id: LotId,
    /// Units attributed to this fragment (never above the lot quantity)
    pub quantity: u64,
    /// Acquisition price per unit of the source lot
    pub unit_price: Decimal,
}

impl ShareFragment {
    /// Slice `quantity` units from `lot`.
    #[must_use]
    pub const fn of_lot(lot: &PurchaseLot, quantity: u64) -> Self {
        Self {
            lot_id: lot.id,
            quantity,
            unit_price: lot.unit_price,
        }
    }

    /// Check if this fragment holds no units.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Total acquisition cost of the units in this fragment.
    ///
    /// `None` when the product does not fit in a `Decimal`.
    #[must_use]
    pub fn cost(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

impl fmt::Display for ShareFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} @ {}", self.lot_id, self.quantity, self.unit_price)
    }
}
