//! The four sale questions a user can ask.

use costbasis_core::LotProvider;
use costbasis_engine::{CostAccountingEngine, CostBasisError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::input::InvalidInputError;

/// A sale question, numbered as in the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Shares left after the sale.
    RemainingShares = 1,
    /// Cost basis per share of the sold shares.
    SoldCostBasis = 2,
    /// Cost basis per share of the shares left after the sale.
    RemainingCostBasis = 3,
    /// Profit or loss of the sale.
    Profit = 4,
}

/// The value answering an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// A number of shares.
    Shares(u64),
    /// A money amount (per-share basis or total profit).
    Amount(Decimal),
}

impl Operation {
    /// Every operation in menu order.
    pub const ALL: [Self; 4] = [
        Self::RemainingShares,
        Self::SoldCostBasis,
        Self::RemainingCostBasis,
        Self::Profit,
    ];

    /// Menu number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Command-line name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RemainingShares => "remaining",
            Self::SoldCostBasis => "sold-basis",
            Self::RemainingCostBasis => "remaining-basis",
            Self::Profit => "profit",
        }
    }

    /// Human description shown in the menu.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::RemainingShares => "The remaining number of shares after the sale",
            Self::SoldCostBasis => "The cost basis per share of the sold shares",
            Self::RemainingCostBasis => {
                "The cost basis per share of the remaining shares after the sale"
            }
            Self::Profit => "The total profit or loss of the sale",
        }
    }

    /// Whether the answer depends on the sale price.
    #[must_use]
    pub const fn needs_price(self) -> bool {
        matches!(self, Self::Profit)
    }

    /// The numbered menu listing every operation.
    #[must_use]
    pub fn menu() -> String {
        let mut menu = String::from("Please select an operation:\n");
        for op in Self::ALL {
            menu.push_str(&format!("  {} - {}\n", op.number(), op.description()));
        }
        menu
    }

    /// Answer this question for a sale of `quantity` shares at `price`.
    ///
    /// `price` is ignored unless [`Operation::needs_price`].
    pub fn evaluate<P: LotProvider>(
        self,
        engine: &CostAccountingEngine<P>,
        quantity: u64,
        price: Decimal,
    ) -> Result<Answer, CostBasisError> {
        tracing::debug!(operation = self.name(), quantity, %price, "evaluating");
        match self {
            Self::RemainingShares => engine.remaining_shares_after_sale(quantity).map(Answer::Shares),
            Self::SoldCostBasis => engine.cost_basis_of_sold_shares(quantity).map(Answer::Amount),
            Self::RemainingCostBasis => engine
                .cost_basis_of_remaining_shares(quantity)
                .map(Answer::Amount),
            Self::Profit => engine.profit_on_sale(quantity, price).map(Answer::Amount),
        }
    }
}

impl FromStr for Operation {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| choice == op.number().to_string() || choice == op.name())
            .ok_or_else(|| InvalidInputError::UnknownOperation {
                input: s.trim().to_string(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
