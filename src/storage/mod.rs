//! Persistent key-value storage for cart state.
//!
//! The cart core never touches storage directly. A `CartSession` reads its
//! initial items with `Store::get` and writes every new cart with
//! `Store::set`. Any type implementing `Store` can back a session:
//!
//! - `MemoryStore`: values held in process, useful for tests and previews
//! - `FileStore`: one versioned file per key, surviving process restarts

use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod envelope;
pub mod error;
pub mod file;
pub mod memory;

pub use envelope::{Envelope, ENVELOPE_VERSION};
pub use error::StorageError;
pub use file::{Encoding, FileStore};
pub use memory::MemoryStore;

/// Key carts are stored under unless configured otherwise
pub const DEFAULT_CART_KEY: &str = "cart";

/// Synchronous key-value store for serializable values.
///
/// # Example
///
/// ```rust
/// use trolley::storage::{MemoryStore, Store};
///
/// let mut store = MemoryStore::new();
/// assert_eq!(store.get("visits", 0u32).unwrap(), 0);
///
/// store.set("visits", &3u32).unwrap();
/// assert_eq!(store.get("visits", 0u32).unwrap(), 3);
/// ```
pub trait Store {
    /// Read the value stored under `key`, or `default` if nothing is stored.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError>;
}

/// Check that `key` can address a stored value.
///
/// Keys become file names in a `FileStore`, so path separators and leading
/// dots are rejected everywhere for consistency.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key.contains(|c| c == '/' || c == '\\')
        || key.chars().any(char::is_control);

    if invalid {
        Err(StorageError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}
