//! Trolley: a pure functional shopping cart state container
//!
//! Trolley follows the "pure core, imperative shell" philosophy. The cart
//! itself is an immutable value whose transitions are pure functions, while
//! persistence and memoization are isolated in a session that wraps it.
//!
//! # Core Concepts
//!
//! - **Line items**: anything implementing `LineItem` (id, price, quantity)
//! - **Cart**: ordered, id-unique sequence of items with pure transitions
//! - **Store**: injected key-value persistence (`MemoryStore`, `FileStore`)
//! - **Session**: binds a cart to a store and memoizes its totals
//! - **Audit**: accumulating validation of cart contents
//!
//! # Example
//!
//! ```rust
//! use trolley::core::CartItem;
//! use trolley::session::CartSession;
//! use trolley::storage::MemoryStore;
//! use rust_decimal::Decimal;
//!
//! let mut session = CartSession::open(MemoryStore::new());
//!
//! session.add_to_cart(CartItem::new("a", "Apple", Decimal::from(10)));
//! session.add_to_cart(CartItem::new("a", "Apple", Decimal::from(10)));
//! assert_eq!(session.items().len(), 1);
//!
//! session.increase_quantity("a");
//! assert_eq!(session.total_price(), Decimal::from(20));
//!
//! session.decrease_quantity("a");
//! session.decrease_quantity("a");
//! assert!(session.items().is_empty());
//! assert_eq!(session.total_quantity(), 0);
//! ```

pub mod audit;
pub mod config;
pub mod core;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use crate::config::{CartConfig, ConfigError};
pub use crate::core::{Cart, CartItem, CartOperation, CartTotals, LineItem};
pub use crate::session::{CartSession, CartSnapshot};
pub use crate::storage::{FileStore, MemoryStore, Store, StorageError};
