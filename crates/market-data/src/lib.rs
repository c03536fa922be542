//! Stockwatch Market Data Crate
//!
//! Price resolution for the stockwatch portfolio engine. The core engine
//! depends on exactly two operations: a historical closing price for a
//! symbol on a given date, and the latest available close for a symbol.
//! Both are expressed through the [`PriceProvider`] trait; the shipped
//! implementation is [`YahooProvider`], backed by the Yahoo Finance API.
//!
//! Failures are reported as [`MarketDataError`]. Callers that need to decide
//! whether a failure means "no price exists for this request" (as opposed to
//! a broken provider) should use
//! [`MarketDataError::is_price_unavailable`].

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::yahoo::YahooProvider;
pub use provider::PriceProvider;
