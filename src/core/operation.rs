//! Cart mutations as values.

use super::item::LineItem;
use serde::{Deserialize, Serialize};

/// One of the four mutations a cart accepts.
///
/// Representing mutations as data keeps the next cart a pure function of
/// `(cart, operation)`; see [`Cart::apply`](super::Cart::apply).
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(bound = "", tag = "op", content = "arg", rename_all = "snake_case")]
pub enum CartOperation<I: LineItem> {
    /// Append an item unless its id is already present
    Add(I),
    /// Drop the item with this id
    Remove(String),
    /// Add one unit to the item with this id
    Increase(String),
    /// Take one unit from the item with this id, dropping it at zero
    Decrease(String),
}

impl<I: LineItem> CartOperation<I> {
    /// Id of the item the operation targets.
    pub fn target(&self) -> &str {
        match self {
            Self::Add(item) => item.id(),
            Self::Remove(id) | Self::Increase(id) | Self::Decrease(id) => id,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Increase(_) => "increase",
            Self::Decrease(_) => "decrease",
        }
    }
}
