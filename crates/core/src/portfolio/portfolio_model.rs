use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::lots::Lot;

/// All lots held for one symbol, in source-record order.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub symbol: String,
    pub lots: Vec<Lot>,
}

impl Position {
    pub fn new(symbol: impl Into<String>, lots: Vec<Lot>) -> Self {
        Self {
            symbol: symbol.into(),
            lots,
        }
    }

    /// Total units held across all lots.
    pub fn total_quantity(&self) -> Decimal {
        self.lots.iter().map(Lot::quantity_dec).sum()
    }
}

/// One symbol's line in a profit snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEntry {
    pub symbol: String,
    /// Latest available close at snapshot time.
    pub current_price: Decimal,
    /// Unrealized profit across the symbol's lots.
    pub profit: Decimal,
    /// Average cost per unit across the symbol's lots; the purchase-price
    /// reference line the rendering surface draws.
    pub cost_reference: Decimal,
}

/// The per-tick view the monitor loop hands to the rendering sink.
///
/// Entries follow the source-record order of the portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct ProfitSnapshot {
    pub taken_at: DateTime<Utc>,
    pub entries: Vec<SnapshotEntry>,
}
