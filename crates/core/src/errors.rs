//! Core error types for stockwatch.

use thiserror::Error;

use stockwatch_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed purchase record: {0}")]
    Record(#[from] RecordError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Failed to load records file: {0}")]
    RecordsIO(String),

    #[error("Render failed: {0}")]
    Render(String),
}

impl Error {
    /// True when the error means a requested price simply does not exist
    /// (unknown symbol at the provider, no trading data for a date, or a
    /// provider timeout). The monitor loop skips the frame on these and
    /// keeps running; any other error is fatal.
    pub fn is_price_unavailable(&self) -> bool {
        matches!(self, Error::MarketData(e) if e.is_price_unavailable())
    }
}

/// Errors raised while turning raw purchase records into lots.
///
/// A purchase record that fails any of these checks is rejected whole;
/// there is no partial-lot recovery.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// A required field is absent from the symbol's section.
    #[error("[{symbol}] missing required field '{field}'")]
    MissingField {
        symbol: String,
        field: &'static str,
    },

    /// Both or neither of purchase_price/purchase_date are present, so the
    /// cost basis cannot be determined without guessing.
    #[error("[{symbol}] exactly one of 'purchase_price' or 'purchase_date' must be present")]
    AmbiguousCostBasis { symbol: String },

    /// A field is present that the record shape does not allow.
    #[error("[{symbol}] field '{field}' is not allowed here")]
    UnexpectedField {
        symbol: String,
        field: &'static str,
    },

    /// List-valued fields disagree on length.
    #[error("[{symbol}] field '{field}' has {actual} values, expected {expected}")]
    LengthMismatch {
        symbol: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Quantity token is not a positive integer.
    #[error("[{symbol}] invalid quantity '{value}': must be a positive integer")]
    InvalidQuantity { symbol: String, value: String },

    /// Price token failed to parse as a decimal number.
    #[error("[{symbol}] invalid purchase_price '{value}'")]
    InvalidPrice { symbol: String, value: String },

    /// Date token failed to parse as YYYY-MM-DD.
    #[error("[{symbol}] invalid purchase_date '{value}': expected YYYY-MM-DD")]
    InvalidDate { symbol: String, value: String },

    /// Time token failed to parse as HH:MM[:SS].
    #[error("[{symbol}] invalid purchase_time '{value}': expected HH:MM[:SS]")]
    InvalidTime { symbol: String, value: String },

    /// A line in the records file fits no recognized form.
    #[error("records file line {line}: unrecognized syntax '{content}'")]
    Syntax { line: usize, content: String },

    /// A key appeared before any [SYMBOL] section header.
    #[error("records file line {line}: key '{key}' appears before any [SYMBOL] section")]
    OrphanKey { line: usize, key: String },

    /// The same symbol section appears twice.
    #[error("duplicate section [{symbol}]")]
    DuplicateSection { symbol: String },

    /// The same key appears twice within one section.
    #[error("[{symbol}] duplicate key '{key}'")]
    DuplicateKey { symbol: String, key: String },

    /// A key that is not part of the purchase-record schema.
    #[error("[{symbol}] unknown key '{key}'")]
    UnknownKey { symbol: String, key: String },
}
