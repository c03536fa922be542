use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// How a lot's per-unit cost is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CostBasis {
    /// The price paid per unit, given directly in the record.
    Explicit(Decimal),
    /// Resolved from the historical close on the acquisition date.
    /// Resolution happens exactly once per portfolio book and is memoized;
    /// only *current* prices are ever re-fetched.
    ByDate {
        date: NaiveDate,
        time: Option<NaiveTime>,
    },
}

/// One discrete purchase event for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lot {
    /// Number of units purchased, always > 0.
    pub quantity: u64,
    pub cost_basis: CostBasis,
}

impl Lot {
    pub fn new(quantity: u64, cost_basis: CostBasis) -> Self {
        Self {
            quantity,
            cost_basis,
        }
    }

    /// Quantity widened for money math.
    pub fn quantity_dec(&self) -> Decimal {
        Decimal::from(self.quantity)
    }
}
