//! Accumulating validation for cart contents.
//!
//! Cart transitions never reject malformed items. This module reports what
//! is wrong with a cart without changing it, using Stillwater's `Validation`
//! so every violation is collected in one pass instead of stopping at the
//! first.
//!
//! # Example
//!
//! ```rust
//! use trolley::audit::{audit_cart, ItemViolation};
//! use trolley::core::{Cart, CartItem, LineItem};
//! use rust_decimal::Decimal;
//! use stillwater::validation::Validation;
//!
//! let cart = Cart::from(vec![
//!     CartItem::new("a", "A", Decimal::from(-1)).with_quantity(0),
//!     CartItem::new("a", "A again", Decimal::ONE),
//! ]);
//!
//! match audit_cart(&cart) {
//!     Validation::Failure(violations) => assert_eq!(violations.len(), 3),
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use rules::{audit_cart, audit_item, AuditResult};
pub use violations::ItemViolation;
