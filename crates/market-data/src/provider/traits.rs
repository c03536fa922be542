//! Price provider trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for price providers.
///
/// The portfolio engine resolves two things through this trait: historical
/// closes for date-based cost bases (resolved once and memoized by the
/// caller) and latest closes for live valuation (fetched fresh on every
/// monitor tick).
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// error messages.
    fn id(&self) -> &'static str;

    /// Fetch the closing price for a symbol on a specific trading date.
    ///
    /// Returns [`MarketDataError::NoDataForDate`] when the date has no
    /// trading data (weekend, holiday, future date) and
    /// [`MarketDataError::SymbolNotFound`] when the symbol is unknown.
    async fn closing_price(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Quote, MarketDataError>;

    /// Fetch the latest available close for a symbol.
    async fn latest_close(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
