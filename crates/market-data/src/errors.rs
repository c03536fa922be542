//! Error types for market data operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while resolving prices.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol exists but has no quote for the requested date.
    /// Weekends, market holidays, and future dates all land here; there is
    /// no fallback to the prior trading day.
    #[error("No closing price for {symbol} on {date}")]
    NoDataForDate {
        /// The symbol whose lookup failed
        symbol: String,
        /// The requested trading date
        date: NaiveDate,
    },

    /// The request to the provider did not complete within the configured
    /// timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },
}

impl MarketDataError {
    /// Returns true when the failure means "no price exists for this
    /// request" rather than "the provider is broken".
    ///
    /// The monitor loop skips the current frame on these and keeps running;
    /// everything else terminates the loop.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockwatch_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert!(error.is_price_unavailable());
    ///
    /// let error = MarketDataError::ProviderError {
    ///     provider: "YAHOO".to_string(),
    ///     message: "internal server error".to_string(),
    /// };
    /// assert!(!error.is_price_unavailable());
    /// ```
    pub fn is_price_unavailable(&self) -> bool {
        matches!(
            self,
            Self::SymbolNotFound(_) | Self::NoDataForDate { .. } | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    #[test]
    fn test_symbol_not_found_is_unavailable() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert!(error.is_price_unavailable());
    }

    #[test]
    fn test_no_data_for_date_is_unavailable() {
        let error = MarketDataError::NoDataForDate {
            symbol: "AAPL".to_string(),
            date: sample_date(),
        };
        assert!(error.is_price_unavailable());
    }

    #[test]
    fn test_timeout_is_unavailable() {
        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert!(error.is_price_unavailable());
    }

    #[test]
    fn test_provider_error_is_not_unavailable() {
        let error = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "internal server error".to_string(),
        };
        assert!(!error.is_price_unavailable());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::NoDataForDate {
            symbol: "AAPL".to_string(),
            date: sample_date(),
        };
        assert_eq!(
            format!("{}", error),
            "No closing price for AAPL on 2023-01-01"
        );

        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Timeout: YAHOO");
    }
}
