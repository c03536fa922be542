//! LotParser: one raw purchase-record section in, normalized lots out.
//!
//! Pure function, no I/O, never calls the price provider. A record that
//! fails any check is rejected whole.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::errors::RecordError;
use crate::records::{RawField, RawRecord};

use super::{CostBasis, Lot};

/// Convert one symbol's raw record into its lots.
///
/// Scalar and list-valued records normalize to the same output: a
/// single-element list behaves exactly like a bare scalar. For list-valued
/// records, `quantity` and the chosen cost-basis field (plus
/// `purchase_time` when present) must agree on length; each index forms one
/// lot.
pub fn parse(symbol: &str, record: &RawRecord) -> Result<Vec<Lot>, RecordError> {
    let quantity = record
        .quantity
        .as_ref()
        .ok_or_else(|| RecordError::MissingField {
            symbol: symbol.to_string(),
            field: "quantity",
        })?;
    let quantities = parse_quantities(symbol, quantity)?;

    match (&record.purchase_price, &record.purchase_date) {
        (Some(_), Some(_)) | (None, None) => Err(RecordError::AmbiguousCostBasis {
            symbol: symbol.to_string(),
        }),

        (Some(price), None) => {
            // A purchase time only qualifies a date lookup.
            if record.purchase_time.is_some() {
                return Err(RecordError::UnexpectedField {
                    symbol: symbol.to_string(),
                    field: "purchase_time",
                });
            }
            check_length(symbol, "purchase_price", quantities.len(), price)?;
            quantities
                .into_iter()
                .zip(price.values())
                .map(|(quantity, token)| {
                    let price = parse_price(symbol, token)?;
                    Ok(Lot::new(quantity, CostBasis::Explicit(price)))
                })
                .collect()
        }

        (None, Some(date)) => {
            check_length(symbol, "purchase_date", quantities.len(), date)?;
            let times = match &record.purchase_time {
                Some(time) => {
                    check_length(symbol, "purchase_time", quantities.len(), time)?;
                    time.values()
                        .into_iter()
                        .map(|token| parse_time(symbol, token).map(Some))
                        .collect::<Result<Vec<_>, _>>()?
                }
                None => vec![None; quantities.len()],
            };
            quantities
                .into_iter()
                .zip(date.values())
                .zip(times)
                .map(|((quantity, token), time)| {
                    let date = parse_date(symbol, token)?;
                    Ok(Lot::new(quantity, CostBasis::ByDate { date, time }))
                })
                .collect()
        }
    }
}

fn check_length(
    symbol: &str,
    field: &'static str,
    expected: usize,
    value: &RawField,
) -> Result<(), RecordError> {
    if value.len() != expected {
        return Err(RecordError::LengthMismatch {
            symbol: symbol.to_string(),
            field,
            expected,
            actual: value.len(),
        });
    }
    Ok(())
}

fn parse_quantities(symbol: &str, field: &RawField) -> Result<Vec<u64>, RecordError> {
    field
        .values()
        .into_iter()
        .map(|token| match token.trim().parse::<u64>() {
            Ok(quantity) if quantity > 0 => Ok(quantity),
            _ => Err(RecordError::InvalidQuantity {
                symbol: symbol.to_string(),
                value: token.to_string(),
            }),
        })
        .collect()
}

fn parse_price(symbol: &str, token: &str) -> Result<Decimal, RecordError> {
    token
        .trim()
        .parse::<Decimal>()
        .map_err(|_| RecordError::InvalidPrice {
            symbol: symbol.to_string(),
            value: token.to_string(),
        })
}

fn parse_date(symbol: &str, token: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(token.trim(), "%Y-%m-%d").map_err(|_| RecordError::InvalidDate {
        symbol: symbol.to_string(),
        value: token.to_string(),
    })
}

fn parse_time(symbol: &str, token: &str) -> Result<NaiveTime, RecordError> {
    let token = token.trim();
    NaiveTime::parse_from_str(token, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(token, "%H:%M"))
        .map_err(|_| RecordError::InvalidTime {
            symbol: symbol.to_string(),
            value: token.to_string(),
        })
}
