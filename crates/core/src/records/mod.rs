//! Purchase-record file loading.
//!
//! The records file is a section-based key/value text format, one section
//! per symbol:
//!
//! ```text
//! # comments start with '#' or ';'
//! [AAPL]
//! quantity = [10, 5]
//! purchase_price = [150.0, 160.0]
//!
//! [MSFT]
//! quantity = 20
//! purchase_date = 2023-01-03
//! purchase_time = 15:30
//! ```
//!
//! Scalar fields are bare tokens; list fields are bracketed comma-separated
//! tokens. Both normalize here into the tagged [`RawField`] representation
//! so nothing downstream branches on shape again. The file is read once at
//! startup and never re-read.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::errors::{RecordError, Result};

/// Recognized keys within a symbol section.
const RECORD_KEYS: [&str; 4] = [
    "quantity",
    "purchase_price",
    "purchase_date",
    "purchase_time",
];

/// One raw field value, shape-normalized at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RawField {
    /// A bare token, e.g. `150.0`
    Scalar(String),
    /// A bracketed comma-separated list, e.g. `[150.0, 160.0]`
    List(Vec<String>),
}

impl RawField {
    /// Classify a raw token as scalar or list and trim every element.
    pub fn from_token(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
        {
            RawField::List(inner.split(',').map(|item| item.trim().to_string()).collect())
        } else {
            RawField::Scalar(trimmed.to_string())
        }
    }

    /// The field's values as a uniform sequence of length >= 1.
    pub fn values(&self) -> Vec<&str> {
        match self {
            RawField::Scalar(value) => vec![value.as_str()],
            RawField::List(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RawField::Scalar(_) => 1,
            RawField::List(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One symbol's purchase-record section, exactly as read from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    pub quantity: Option<RawField>,
    pub purchase_price: Option<RawField>,
    pub purchase_date: Option<RawField>,
    pub purchase_time: Option<RawField>,
}

impl RawRecord {
    fn set(&mut self, symbol: &str, key: &str, value: RawField) -> std::result::Result<(), RecordError> {
        let slot = match key {
            "quantity" => &mut self.quantity,
            "purchase_price" => &mut self.purchase_price,
            "purchase_date" => &mut self.purchase_date,
            "purchase_time" => &mut self.purchase_time,
            _ => {
                return Err(RecordError::UnknownKey {
                    symbol: symbol.to_string(),
                    key: key.to_string(),
                })
            }
        };
        if slot.is_some() {
            return Err(RecordError::DuplicateKey {
                symbol: symbol.to_string(),
                key: key.to_string(),
            });
        }
        *slot = Some(value);
        Ok(())
    }
}

/// Load and parse a records file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<(String, RawRecord)>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| crate::Error::RecordsIO(format!("{}: {}", path.display(), e)))?;
    parse_records(&text)
}

/// Parse records file text into ordered (symbol, record) pairs.
///
/// Section order follows the file; it is preserved through the portfolio
/// book for reproducible display ordering.
pub fn parse_records(text: &str) -> Result<Vec<(String, RawRecord)>> {
    let mut records: Vec<(String, RawRecord)> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(symbol) = section_header(line) {
            if records.iter().any(|(existing, _)| existing == symbol) {
                return Err(RecordError::DuplicateSection {
                    symbol: symbol.to_string(),
                }
                .into());
            }
            records.push((symbol.to_string(), RawRecord::default()));
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let (symbol, record) = records.last_mut().ok_or_else(|| RecordError::OrphanKey {
                line: line_no,
                key: key.to_string(),
            })?;
            record.set(symbol, key, RawField::from_token(value))?;
            continue;
        }

        return Err(RecordError::Syntax {
            line: line_no,
            content: line.to_string(),
        }
        .into());
    }

    Ok(records)
}

fn section_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let symbol = inner.trim();
    // A bracketed list can never start a line on its own; sections hold a
    // single bare symbol token.
    if symbol.is_empty() || symbol.contains(',') {
        None
    } else {
        Some(symbol)
    }
}
