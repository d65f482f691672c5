//! Core cart types and logic.
//!
//! This module contains the pure functional core of the cart:
//! - Line items via the `LineItem` trait
//! - The immutable `Cart` value and its transitions
//! - Mutations as `CartOperation` values
//! - Derived `CartTotals`
//!
//! Nothing in this module performs I/O. Persistence lives in `storage`
//! and is driven by `session`.

mod cart;
mod item;
mod operation;
mod totals;

pub use cart::Cart;
pub use item::{CartItem, LineItem};
pub use operation::CartOperation;
pub use totals::CartTotals;
