//! Portfolio book: positions, valuation, and profit snapshots.

mod portfolio_book;
mod portfolio_model;

#[cfg(test)]
mod portfolio_book_tests;

pub use portfolio_book::PortfolioBook;
pub use portfolio_model::{Position, ProfitSnapshot, SnapshotEntry};
