//! The cost accounting engine.
//!
//! [`CostAccountingEngine`] answers the four sale questions against whatever
//! its [`LotProvider`] currently holds. Each call re-reads the provider: the
//! owned quantity once for the sufficiency check and the lot list at most
//! once for the computation. Nothing is cached between calls.

use costbasis_core::{LotProvider, ShareFragment};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::partition::{
    partition_remaining_lots, partition_sold_lots, realized_profit, weighted_average_unit_price,
    Partition,
};
use crate::CostBasisError;

/// Every answer for one hypothetical sale, computed from a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleSummary {
    /// Units requested for sale.
    pub sale_quantity: u64,
    /// Price per unit the sale is evaluated at.
    pub sale_price: Decimal,
    /// Units held after the sale.
    pub remaining_quantity: u64,
    /// Weighted-average cost per unit of the sold units.
    pub sold_cost_basis: Decimal,
    /// Weighted-average cost per unit of the units still held.
    pub remaining_cost_basis: Decimal,
    /// Realized profit (negative for a loss).
    pub profit: Decimal,
    /// Sold fragments in FIFO order.
    pub sold: Vec<ShareFragment>,
    /// Remaining fragments, one per lot.
    pub remaining: Vec<ShareFragment>,
}

/// FIFO cost accounting over a lot provider.
///
/// `sale_quantity` and `sale_price` are expected to be non-negative; the
/// engine does not re-validate their sign (`sale_quantity` is unsigned, and a
/// negative `sale_price` is the caller's responsibility to reject).
///
/// # Examples
///
/// ```
/// use costbasis_core::{LotId, PurchaseLot, StaticLotProvider};
/// use costbasis_engine::CostAccountingEngine;
/// use rust_decimal_macros::dec;
///
/// let provider = StaticLotProvider::new(vec![
///     PurchaseLot::new(LotId(1), 120, dec!(20)),
///     PurchaseLot::new(LotId(2), 70, dec!(30)),
/// ])
/// .unwrap();
/// let engine = CostAccountingEngine::new(provider);
///
/// assert_eq!(engine.cost_basis_of_sold_shares(150).unwrap(), dec!(22));
/// assert_eq!(engine.profit_on_sale(150, dec!(40)).unwrap(), dec!(2700));
/// assert!(engine.remaining_shares_after_sale(191).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CostAccountingEngine<P> {
    provider: P,
}

impl<P: LotProvider> CostAccountingEngine<P> {
    /// Create an engine reading from `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The provider this engine reads from.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Fail unless the provider holds at least `sale_quantity` units.
    ///
    /// Re-queries the owned quantity on every call and returns it.
    pub fn validate_sufficient_shares(&self, sale_quantity: u64) -> Result<u64, CostBasisError> {
        let available = self.provider.total_owned_quantity();
        if sale_quantity > available {
            tracing::debug!(sale_quantity, available, "rejected sale");
            return Err(CostBasisError::InsufficientShares {
                requested: sale_quantity,
                available,
            });
        }
        Ok(available)
    }

    /// Units held after selling `sale_quantity`.
    ///
    /// Plain subtraction from the owned total; lots are not partitioned.
    pub fn remaining_shares_after_sale(&self, sale_quantity: u64) -> Result<u64, CostBasisError> {
        let available = self.validate_sufficient_shares(sale_quantity)?;
        Ok(available - sale_quantity)
    }

    /// Weighted-average cost per unit of the units a FIFO sale would consume.
    ///
    /// Zero when `sale_quantity` is zero.
    pub fn cost_basis_of_sold_shares(&self, sale_quantity: u64) -> Result<Decimal, CostBasisError> {
        self.validate_sufficient_shares(sale_quantity)?;
        let lots = self.provider.lots_in_fifo_order();
        weighted_average_unit_price(&partition_sold_lots(&lots, sale_quantity))
    }

    /// Weighted-average cost per unit of the units left after a FIFO sale.
    ///
    /// Zero when the sale consumes everything.
    pub fn cost_basis_of_remaining_shares(
        &self,
        sale_quantity: u64,
    ) -> Result<Decimal, CostBasisError> {
        self.validate_sufficient_shares(sale_quantity)?;
        let lots = self.provider.lots_in_fifo_order();
        weighted_average_unit_price(&partition_remaining_lots(&lots, sale_quantity))
    }

    /// Realized profit of a FIFO sale at `sale_price` per unit.
    ///
    /// Negative for a loss.
    pub fn profit_on_sale(
        &self,
        sale_quantity: u64,
        sale_price: Decimal,
    ) -> Result<Decimal, CostBasisError> {
        self.validate_sufficient_shares(sale_quantity)?;
        let lots = self.provider.lots_in_fifo_order();
        realized_profit(&partition_sold_lots(&lots, sale_quantity), sale_price)
    }

    /// All four answers plus the fragment breakdown, from one lot snapshot.
    pub fn summarize(
        &self,
        sale_quantity: u64,
        sale_price: Decimal,
    ) -> Result<SaleSummary, CostBasisError> {
        let total = self.validate_sufficient_shares(sale_quantity)?;
        let lots = self.provider.lots_in_fifo_order();
        let Partition { sold, remaining } = Partition::new(&lots, sale_quantity);

        Ok(SaleSummary {
            sale_quantity,
            sale_price,
            remaining_quantity: total - sale_quantity,
            sold_cost_basis: weighted_average_unit_price(&sold)?,
            remaining_cost_basis: weighted_average_unit_price(&remaining)?,
            profit: realized_profit(&sold, sale_price)?,
            sold,
            remaining,
        })
    }
}
