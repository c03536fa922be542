//! Lots: normalized purchase events.

mod lots_model;
mod lots_parser;

pub use lots_model::{CostBasis, Lot};
pub use lots_parser::parse;
