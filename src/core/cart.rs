//! The cart value and its pure transitions.

use super::item::LineItem;
use super::operation::CartOperation;
use super::totals::CartTotals;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordered, id-unique sequence of line items.
///
/// A cart is an immutable value: every transition borrows the current cart and
/// returns the next one, leaving the original untouched. Items keep the order
/// they were added in.
///
/// None of the transitions validate prices or quantities. Malformed items are
/// carried as-is; use [`audit_cart`](crate::audit::audit_cart) to inspect them.
///
/// # Example
///
/// ```rust
/// use trolley::core::{Cart, CartItem};
/// use rust_decimal::Decimal;
///
/// let cart = Cart::new()
///     .add_to_cart(CartItem::new("a", "Apple", Decimal::from(10)))
///     .increase_quantity("a");
///
/// assert!(cart.is_added_to_cart("a"));
/// assert_eq!(cart.total_quantity(), 2);
/// assert_eq!(cart.total_price(), Decimal::from(20));
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Cart<I: LineItem> {
    items: Vec<I>,
}

impl<I: LineItem> Default for Cart<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: LineItem> From<Vec<I>> for Cart<I> {
    /// Wrap items restored from storage. The sequence is taken as-is.
    fn from(items: Vec<I>) -> Self {
        Self { items }
    }
}

impl<I: LineItem> Cart<I> {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item with this id, if any.
    pub fn get(&self, id: &str) -> Option<&I> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// True iff an item with this id is in the cart.
    pub fn is_added_to_cart(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Append `item` unless its id is already present.
    ///
    /// Adding a present id is a no-op: quantities are not merged.
    ///
    /// ```rust
    /// use trolley::core::{Cart, CartItem, LineItem};
    /// use rust_decimal::Decimal;
    ///
    /// let first = CartItem::new("a", "Apple", Decimal::from(10));
    /// let cart = Cart::new().add_to_cart(first.clone());
    /// let again = cart.add_to_cart(first.with_quantity(5));
    ///
    /// assert_eq!(again, cart);
    /// assert_eq!(again.total_quantity(), 1);
    /// ```
    pub fn add_to_cart(&self, item: I) -> Self {
        if self.is_added_to_cart(item.id()) {
            return self.clone();
        }
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// Drop the item with this id. No-op if absent.
    pub fn remove_from_cart(&self, id: &str) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
        }
    }

    /// Add one unit to the item with this id, keeping its position.
    pub fn increase_quantity(&self, id: &str) -> Self {
        self.map_item(id, |item| item.with_quantity(item.quantity().saturating_add(1)))
    }

    /// Take one unit from the item with this id.
    ///
    /// An item holding exactly one unit is removed instead. A malformed item
    /// with zero units stays at zero.
    ///
    /// ```rust
    /// use trolley::core::{Cart, CartItem, LineItem};
    /// use rust_decimal::Decimal;
    ///
    /// let cart = Cart::new()
    ///     .add_to_cart(CartItem::new("a", "Apple", Decimal::ONE).with_quantity(2));
    ///
    /// let cart = cart.decrease_quantity("a");
    /// assert_eq!(cart.get("a").map(|i| i.quantity()), Some(1));
    ///
    /// let cart = cart.decrease_quantity("a");
    /// assert!(cart.is_empty());
    /// ```
    pub fn decrease_quantity(&self, id: &str) -> Self {
        match self.get(id) {
            Some(item) if item.quantity() == 1 => self.remove_from_cart(id),
            Some(_) => {
                self.map_item(id, |item| item.with_quantity(item.quantity().saturating_sub(1)))
            }
            None => self.clone(),
        }
    }

    /// Compute the next cart for `operation`.
    pub fn apply(&self, operation: CartOperation<I>) -> Self {
        match operation {
            CartOperation::Add(item) => self.add_to_cart(item),
            CartOperation::Remove(id) => self.remove_from_cart(&id),
            CartOperation::Increase(id) => self.increase_quantity(&id),
            CartOperation::Decrease(id) => self.decrease_quantity(&id),
        }
    }

    /// Sum of `price * quantity` over all items. Zero for an empty cart.
    pub fn total_price(&self) -> Decimal {
        self.totals().price
    }

    /// Sum of quantities over all items. Zero for an empty cart.
    pub fn total_quantity(&self) -> u64 {
        self.totals().quantity
    }

    /// Both aggregates in a single pass.
    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.items)
    }

    /// Release the underlying sequence.
    pub fn into_items(self) -> Vec<I> {
        self.items
    }

    fn map_item<F>(&self, id: &str, f: F) -> Self
    where
        F: Fn(&I) -> I,
    {
        Self {
            items: self
                .items
                .iter()
                .map(|item| if item.id() == id { f(item) } else { item.clone() })
                .collect(),
        }
    }
}
