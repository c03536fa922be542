use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A closing price for one symbol at one point in time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Closing/current price
    pub close: Decimal,

    /// Source of the quote (YAHOO, MOCK, etc.)
    pub source: String,
}

impl Quote {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal, source: String) -> Self {
        Self {
            timestamp,
            close,
            source,
        }
    }
}
