//! FIFO partitioning of lots.
//!
//! A sale of `n` units walks the lots in provider order, taking units from
//! each lot until `n` is satisfied. Every lot ends up split into a sold
//! fragment and a remaining fragment whose quantities add back up to the
//! lot quantity.

use costbasis_core::{PurchaseLot, ShareFragment};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::CostBasisError;

/// Both sides of one FIFO sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Fragments consumed by the sale, only for lots that contributed units.
    pub sold: Vec<ShareFragment>,
    /// One fragment per lot with what is left of it, zero-quantity included.
    pub remaining: Vec<ShareFragment>,
}

impl Partition {
    /// Split `lots` for a sale of `sale_quantity` units.
    ///
    /// Lots are consumed in the given order. A `sale_quantity` above the
    /// total held simply exhausts every lot; callers validate beforehand.
    #[must_use]
    pub fn new(lots: &[PurchaseLot], sale_quantity: u64) -> Self {
        let mut to_sell = sale_quantity;
        let mut sold = Vec::new();
        let mut remaining = Vec::with_capacity(lots.len());

        for lot in lots {
            let take = to_sell.min(lot.quantity);
            if take > 0 {
                sold.push(ShareFragment::of_lot(lot, take));
                to_sell -= take;
            }
            remaining.push(ShareFragment::of_lot(lot, lot.quantity - take));
        }

        tracing::debug!(
            sale_quantity,
            sold_lots = sold.len(),
            unfilled = to_sell,
            "partitioned lots"
        );

        Self { sold, remaining }
    }

    /// Units on the sold side.
    #[must_use]
    pub fn sold_quantity(&self) -> u64 {
        total_quantity(&self.sold)
    }

    /// Units on the remaining side.
    #[must_use]
    pub fn remaining_quantity(&self) -> u64 {
        total_quantity(&self.remaining)
    }
}

/// Fragments sold by a FIFO sale of `sale_quantity` units.
///
/// Walks the lots taking `min(lot.quantity, still_to_sell)` from each and
/// stops as soon as the sale is filled, so lots after that point do not
/// appear at all (not even with zero quantity).
#[must_use]
pub fn partition_sold_lots(lots: &[PurchaseLot], sale_quantity: u64) -> Vec<ShareFragment> {
    let mut to_sell = sale_quantity;
    let mut sold = Vec::new();

    for lot in lots {
        if to_sell == 0 {
            break;
        }
        let fragment = ShareFragment::of_lot(lot, lot.quantity.min(to_sell));
        to_sell -= fragment.quantity;
        sold.push(fragment);
    }

    sold
}

/// Fragments left over after a FIFO sale of `sale_quantity` units.
///
/// Emits exactly one fragment per lot in lot order. A lot that was sold in
/// full yields a zero-quantity fragment rather than being dropped.
#[must_use]
pub fn partition_remaining_lots(lots: &[PurchaseLot], sale_quantity: u64) -> Vec<ShareFragment> {
    let mut to_sell = sale_quantity;

    lots.iter()
        .map(|lot| {
            let sold_here = to_sell.min(lot.quantity);
            to_sell -= sold_here;
            ShareFragment::of_lot(lot, lot.quantity - sold_here)
        })
        .collect()
}

/// Weighted-average unit price of a set of fragments.
///
/// Returns exactly zero when the fragments hold no units.
pub fn weighted_average_unit_price(fragments: &[ShareFragment]) -> Result<Decimal, CostBasisError> {
    let overflow = || CostBasisError::Overflow {
        what: "cost basis",
    };

    let mut quantity = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    for fragment in fragments {
        quantity = quantity
            .checked_add(Decimal::from(fragment.quantity))
            .ok_or_else(overflow)?;
        cost = fragment
            .cost()
            .and_then(|c| cost.checked_add(c))
            .ok_or_else(overflow)?;
    }

    if quantity.is_zero() {
        return Ok(Decimal::ZERO);
    }
    cost.checked_div(quantity).ok_or_else(overflow)
}

/// Realized profit of selling `fragments` at `sale_price` per unit.
///
/// Negative for a loss.
pub fn realized_profit(
    fragments: &[ShareFragment],
    sale_price: Decimal,
) -> Result<Decimal, CostBasisError> {
    fragments.iter().try_fold(Decimal::ZERO, |profit, f| {
        sale_price
            .checked_sub(f.unit_price)
            .and_then(|margin| margin.checked_mul(Decimal::from(f.quantity)))
            .and_then(|gain| profit.checked_add(gain))
            .ok_or(CostBasisError::Overflow { what: "profit" })
    })
}

fn total_quantity(fragments: &[ShareFragment]) -> u64 {
    fragments
        .iter()
        .fold(0u64, |total, f| total.saturating_add(f.quantity))
}
