//! Purchase lot types.
//!
//! A [`PurchaseLot`] records one acquisition of shares: how many units were
//! bought and at what price per unit. Lots are owned by a
//! [`LotProvider`](crate::LotProvider) and are never mutated by the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a lot, unique and stable within one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LotId(pub u32);

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for LotId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A discrete purchase of shares at a single unit price.
///
/// When you buy 120 shares at 20.00 in January, the lot is:
/// - quantity: 120
/// - `unit_price`: 20.00
/// - acquired: Some(2024-01-01)
///
/// The acquisition date is informational. FIFO order is the order in which
/// the provider returns its lots, never a sort by date.
///
/// # Examples
///
/// ```
/// use costbasis_core::{LotId, PurchaseLot};
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let lot = PurchaseLot::new(LotId(1), 120, dec!(20.00))
///     .with_acquired(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
///
/// assert_eq!(lot.quantity, 120);
/// assert_eq!(lot.total_cost(), Some(dec!(2400.00)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurchaseLot {
    /// Lot identifier
    pub id: LotId,
    /// Units acquired in this lot
    pub quantity: u64,
    /// Acquisition price per unit
    #[serde(alias = "price")]
    pub unit_price: Decimal,
    /// Acquisition date (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquired: Option<NaiveDate>,
}

impl PurchaseLot {
    /// Create a new lot without an acquisition date.
    #[must_use]
    pub const fn new(id: LotId, quantity: u64, unit_price: Decimal) -> Self {
        Self {
            id,
            quantity,
            unit_price,
            acquired: None,
        }
    }

    /// Add an acquisition date to this lot.
    #[must_use]
    pub const fn with_acquired(mut self, date: NaiveDate) -> Self {
        self.acquired = Some(date);
        self
    }

    /// Total acquisition cost of the whole lot, or `None` if it does not fit
    /// in a `Decimal`.
    #[must_use]
    pub fn total_cost(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

impl fmt::Display for PurchaseLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} @ {}", self.id, self.quantity, self.unit_price)?;
        if let Some(date) = self.acquired {
            write!(f, " ({date})")?;
        }
        Ok(())
    }
}
