//! The portfolio book: normalized lots plus valuation over a price provider.
//!
//! Cost-basis resolution is per-lot (different lots were bought on different
//! dates at different prices) while current-price resolution is per-symbol
//! (one live price applies uniformly to every lot of a symbol at valuation
//! time). Keeping that asymmetry straight is the whole point of this module.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;

use stockwatch_market_data::PriceProvider;

use crate::errors::Result;
use crate::lots::{self, CostBasis, Lot};
use crate::records::RawRecord;
use crate::Error;

use super::{Position, ProfitSnapshot, SnapshotEntry};

/// Holds the portfolio's positions and computes valuations.
///
/// Historical closes for date-based cost bases are resolved at most once per
/// book and memoized in a cache owned by this instance; latest closes are
/// fetched fresh on every call and never cached.
pub struct PortfolioBook {
    positions: Vec<Position>,
    provider: Arc<dyn PriceProvider>,
    cost_cache: DashMap<(String, NaiveDate), Decimal>,
}

impl std::fmt::Debug for PortfolioBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioBook")
            .field("positions", &self.positions)
            .field("cost_cache", &self.cost_cache)
            .finish_non_exhaustive()
    }
}

impl PortfolioBook {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            positions: Vec::new(),
            provider,
            cost_cache: DashMap::new(),
        }
    }

    /// Build a book from parsed purchase records, preserving record order.
    pub fn from_records(
        records: &[(String, RawRecord)],
        provider: Arc<dyn PriceProvider>,
    ) -> Result<Self> {
        let mut book = Self::new(provider);
        for (symbol, record) in records {
            let lots = lots::parse(symbol, record)?;
            book.add_position(symbol, lots);
        }
        Ok(book)
    }

    /// Append lots for a symbol. Lots for a symbol already in the book are
    /// appended to its existing position.
    pub fn add_position(&mut self, symbol: &str, lots: Vec<Lot>) {
        match self
            .positions
            .iter_mut()
            .find(|position| position.symbol == symbol)
        {
            Some(position) => position.lots.extend(lots),
            None => self.positions.push(Position::new(symbol, lots)),
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.positions.iter().map(|position| position.symbol.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total amount paid across all lots at their respective cost bases.
    ///
    /// Any unresolved price aborts the whole call; no partial totals.
    pub async fn invested_amount(&self) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for position in &self.positions {
            for lot in &position.lots {
                let unit_cost = self.unit_cost(&position.symbol, lot).await?;
                total += unit_cost * lot.quantity_dec();
            }
        }
        Ok(total)
    }

    /// Total market value of all holdings at the latest available close.
    ///
    /// One latest close per symbol, applied to the symbol's summed quantity;
    /// a symbol with multiple lots is never priced per lot.
    pub async fn current_amount(&self) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for position in &self.positions {
            let latest = self.provider.latest_close(&position.symbol).await?;
            total += latest.close * position.total_quantity();
        }
        Ok(total)
    }

    /// Unrealized profit for one symbol: one latest close, but each lot's
    /// own cost basis for each term of the sum.
    pub async fn per_symbol_profit(&self, symbol: &str) -> Result<Decimal> {
        let position = self
            .positions
            .iter()
            .find(|position| position.symbol == symbol)
            .ok_or_else(|| Error::UnknownSymbol(symbol.to_string()))?;

        let latest = self.provider.latest_close(symbol).await?;
        self.position_profit(position, latest.close).await
    }

    /// Build the per-tick snapshot the monitor loop renders: for every
    /// symbol, the latest close, the profit across its lots, and the
    /// average-cost reference line.
    pub async fn snapshot(&self) -> Result<ProfitSnapshot> {
        let mut entries = Vec::with_capacity(self.positions.len());
        for position in &self.positions {
            let latest = self.provider.latest_close(&position.symbol).await?;
            let profit = self.position_profit(position, latest.close).await?;

            let quantity = position.total_quantity();
            let invested = self.position_invested(position).await?;
            let cost_reference = if quantity.is_zero() {
                Decimal::ZERO
            } else {
                invested / quantity
            };

            entries.push(SnapshotEntry {
                symbol: position.symbol.clone(),
                current_price: latest.close,
                profit,
                cost_reference,
            });
        }
        Ok(ProfitSnapshot {
            taken_at: Utc::now(),
            entries,
        })
    }

    async fn position_profit(&self, position: &Position, current: Decimal) -> Result<Decimal> {
        let mut profit = Decimal::ZERO;
        for lot in &position.lots {
            let unit_cost = self.unit_cost(&position.symbol, lot).await?;
            profit += (current - unit_cost) * lot.quantity_dec();
        }
        Ok(profit)
    }

    async fn position_invested(&self, position: &Position) -> Result<Decimal> {
        let mut invested = Decimal::ZERO;
        for lot in &position.lots {
            let unit_cost = self.unit_cost(&position.symbol, lot).await?;
            invested += unit_cost * lot.quantity_dec();
        }
        Ok(invested)
    }

    /// A lot's per-unit cost. Date-based bases hit the provider once per
    /// distinct (symbol, date) for the lifetime of this book.
    async fn unit_cost(&self, symbol: &str, lot: &Lot) -> Result<Decimal> {
        match &lot.cost_basis {
            CostBasis::Explicit(price) => Ok(*price),
            CostBasis::ByDate { date, .. } => {
                let key = (symbol.to_string(), *date);
                if let Some(cached) = self.cost_cache.get(&key) {
                    return Ok(*cached);
                }
                let quote = self.provider.closing_price(symbol, *date).await?;
                debug!(
                    "Resolved cost basis for {} on {}: {}",
                    symbol, date, quote.close
                );
                self.cost_cache.insert(key, quote.close);
                Ok(quote.close)
            }
        }
    }
}
