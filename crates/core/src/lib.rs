//! Stockwatch Core - Portfolio valuation engine.
//!
//! This crate holds the domain logic of stockwatch: purchase-record parsing
//! into normalized lots, the portfolio book that aggregates invested and
//! current amounts, and the monitor loop that drives the live profit view.
//! Price resolution itself lives in the `stockwatch-market-data` crate and
//! is injected through the `PriceProvider` trait.

pub mod errors;
pub mod lots;
pub mod monitor;
pub mod portfolio;
pub mod records;

// Re-export common types
pub use errors::Error;
pub use errors::Result;
pub use lots::{CostBasis, Lot};
pub use monitor::{CancelFlag, MonitorLoop, RenderSink};
pub use portfolio::{PortfolioBook, Position, ProfitSnapshot, SnapshotEntry};
pub use records::{RawField, RawRecord};
