//! Cart session: the imperative shell around the pure cart core.
//!
//! A `CartSession` is what a UI layer binds to. It owns the current cart and
//! a store, routes every mutation through the pure transitions in
//! [`core`](crate::core), persists the result, and memoizes the derived
//! totals until the next mutation.

use crate::audit::audit_cart;
use crate::core::{Cart, CartOperation, CartTotals, LineItem};
use crate::storage::{Store, StorageError, DEFAULT_CART_KEY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use stillwater::validation::Validation;
use tracing::{debug, warn};
use uuid::Uuid;

/// Owned, read-only view of a session at one point in time.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CartSnapshot<I: LineItem> {
    pub items: Vec<I>,
    pub totals: CartTotals,
}

/// A cart bound to a store under a fixed key.
///
/// Persistence is best-effort: when a write fails the failure is logged and
/// the in-memory cart still advances. Use [`CartSession::flush`] to persist
/// with the error surfaced.
///
/// If the stored cart cannot be read when the session opens, the session
/// starts empty and does not write back until [`CartSession::flush`]
/// succeeds. Whatever is stored under the key (a corrupt file, or one written
/// by a newer envelope version) is left alone until then.
///
/// # Example
///
/// ```rust
/// use trolley::core::CartItem;
/// use trolley::session::CartSession;
/// use trolley::storage::MemoryStore;
/// use rust_decimal::Decimal;
///
/// let mut session = CartSession::open(MemoryStore::new());
/// session.add_to_cart(CartItem::new("a", "Apple", Decimal::from(10)));
/// session.increase_quantity("a");
///
/// assert_eq!(session.total_price(), Decimal::from(20));
///
/// // A new session over the same store picks up where this one left off.
/// let store = session.into_store();
/// let restored: CartSession<CartItem, _> = CartSession::open(store);
/// assert_eq!(restored.total_quantity(), 2);
/// ```
pub struct CartSession<I: LineItem, S: Store> {
    id: Uuid,
    key: String,
    cart: Cart<I>,
    store: S,
    totals: OnceCell<CartTotals>,
    persisting: bool,
}

impl<I: LineItem, S: Store> CartSession<I, S> {
    /// Open a session over `store` using the default `"cart"` key.
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_CART_KEY)
    }

    /// Open a session over `store`, restoring whatever is stored under `key`.
    ///
    /// A failed read is logged and the session starts with an empty cart.
    /// Writes stay off until [`CartSession::flush`] succeeds, so the
    /// unreadable value is not overwritten by the first mutation.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let key = key.into();

        let (items, persisting): (Vec<I>, bool) = match store.get(&key, Vec::new()) {
            Ok(items) => (items, true),
            Err(error) => {
                warn!(
                    session = %id,
                    key = %key,
                    %error,
                    "failed to restore cart, starting empty with writes held until flush"
                );
                (Vec::new(), false)
            }
        };
        let cart = Cart::from(items);

        if let Validation::Failure(violations) = audit_cart(&cart) {
            for violation in violations.iter() {
                warn!(session = %id, key = %key, %violation, "restored cart is malformed");
            }
        }
        debug!(session = %id, key = %key, items = cart.len(), "cart session opened");

        Self {
            id,
            key,
            cart,
            store,
            totals: OnceCell::new(),
            persisting,
        }
    }

    /// Identifier used in this session's log records.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Storage key the cart is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current items in insertion order.
    pub fn items(&self) -> &[I] {
        self.cart.items()
    }

    /// The current cart value.
    pub fn cart(&self) -> &Cart<I> {
        &self.cart
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether mutations are written to the store as they happen.
    ///
    /// False after a failed restore, until the next successful flush.
    pub fn is_persisting(&self) -> bool {
        self.persisting
    }

    /// Owned copy of the items and totals.
    pub fn snapshot(&self) -> CartSnapshot<I> {
        CartSnapshot {
            items: self.cart.items().to_vec(),
            totals: self.totals(),
        }
    }

    /// Whether an item with `id` is in the cart.
    pub fn is_added_to_cart(&self, id: &str) -> bool {
        self.cart.is_added_to_cart(id)
    }

    /// Add `item` unless its id is already in the cart.
    pub fn add_to_cart(&mut self, item: I) {
        self.apply(CartOperation::Add(item));
    }

    /// Drop the item with `id`, if present.
    pub fn remove_from_cart(&mut self, id: &str) {
        self.apply(CartOperation::Remove(id.to_string()));
    }

    /// Add one unit to the item with `id`, if present.
    pub fn increase_quantity(&mut self, id: &str) {
        self.apply(CartOperation::Increase(id.to_string()));
    }

    /// Take one unit away; an item with one unit is removed.
    pub fn decrease_quantity(&mut self, id: &str) {
        self.apply(CartOperation::Decrease(id.to_string()));
    }

    /// Run `operation` against the cart and persist the result.
    ///
    /// Operations that leave the cart unchanged neither write to the store
    /// nor invalidate cached totals. Nothing is written while writes are held
    /// after a failed restore.
    pub fn apply(&mut self, operation: CartOperation<I>) {
        let name = operation.name();
        let target = operation.target().to_string();
        let next = self.cart.apply(operation);

        if next == self.cart {
            debug!(session = %self.id, op = name, id = %target, "operation left cart unchanged");
            return;
        }

        self.cart = next;
        self.totals = OnceCell::new();
        debug!(session = %self.id, op = name, id = %target, items = self.cart.len(), "operation applied");

        if !self.persisting {
            debug!(session = %self.id, key = %self.key, "writes held until flush, not persisting");
            return;
        }
        if let Err(error) = self.persist() {
            warn!(session = %self.id, key = %self.key, %error, "failed to persist cart");
        }
    }

    /// Sum of `price * quantity` over the cart.
    pub fn total_price(&self) -> Decimal {
        self.totals().price
    }

    /// Sum of quantities over the cart.
    pub fn total_quantity(&self) -> u64 {
        self.totals().quantity
    }

    /// Both aggregates, computed once per mutation.
    pub fn totals(&self) -> CartTotals {
        *self.totals.get_or_init(|| self.cart.totals())
    }

    /// Write the current cart to the store, returning any failure.
    ///
    /// A successful flush also turns writes back on for a session whose
    /// restore failed, replacing whatever was stored under the key.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.persist()?;
        if !self.persisting {
            debug!(session = %self.id, key = %self.key, "flushed, writes resumed");
            self.persisting = true;
        }
        Ok(())
    }

    /// End the session and take back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.store.set(&self.key, &self.cart)
    }
}
