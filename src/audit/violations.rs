//! Violations an audit can report.

use rust_decimal::Decimal;
use thiserror::Error;

/// A single problem found on a cart or one of its items
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ItemViolation {
    #[error("Item has an empty id")]
    EmptyId,

    #[error("Item '{id}' has negative price {price}")]
    NegativePrice { id: String, price: Decimal },

    #[error("Item '{id}' has zero quantity")]
    ZeroQuantity { id: String },

    #[error("Id '{id}' appears more than once")]
    DuplicateId { id: String },
}
