//! Yahoo Finance price provider.
//!
//! Wraps the `yahoo_finance_api` connector behind the [`PriceProvider`]
//! trait. Every network call is bounded by a per-call timeout; expiry is
//! reported as [`MarketDataError::Timeout`], which callers treat the same
//! way as a missing price.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::PriceProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Default per-call timeout when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Yahoo Finance price provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    timeout: Duration,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider with the default timeout.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new Yahoo Finance provider with an explicit per-call timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector, timeout })
    }

    /// Run a connector call under the configured timeout.
    async fn bounded<F, T>(&self, fut: F) -> Result<T, MarketDataError>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            })
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(yahoo_quote: yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote::new(timestamp, close, PROVIDER_ID.to_string()))
    }

    fn map_yahoo_error(symbol: &str, error: yahoo::YahooError) -> MarketDataError {
        if matches!(
            error,
            yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult
        ) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// The UTC range [midnight, next midnight) covering one trading date,
/// in the representation the Yahoo API expects.
fn day_window(date: NaiveDate) -> (OffsetDateTime, OffsetDateTime) {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let end = start + chrono::Duration::days(1);
    (to_offset_datetime(start), to_offset_datetime(end))
}

/// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
fn to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(dt.timestamp())
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[async_trait]
impl PriceProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn closing_price(
        &self,
        symbol: &str,
        date: NaiveDate,
    ) -> Result<Quote, MarketDataError> {
        debug!("Fetching close for {} on {}", symbol, date);

        let (start, end) = day_window(date);
        let response = self
            .bounded(self.connector.get_quote_history(symbol, start, end))
            .await?
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let quotes = response
            .quotes()
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        // An empty window means the date had no trading session.
        let yahoo_quote = quotes
            .into_iter()
            .last()
            .ok_or_else(|| MarketDataError::NoDataForDate {
                symbol: symbol.to_string(),
                date,
            })?;

        Self::yahoo_quote_to_quote(yahoo_quote)
    }

    async fn latest_close(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching latest close for {}", symbol);

        let response = self
            .bounded(self.connector.get_latest_quotes(symbol, "1d"))
            .await?
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let yahoo_quote = response.last_quote().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::SymbolNotFound(symbol.to_string())
        })?;

        Self::yahoo_quote_to_quote(yahoo_quote)
    }
}
