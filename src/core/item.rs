//! Cart line items.
//!
//! The cart logic is generic over the `LineItem` trait so a UI layer can carry
//! whatever display fields it needs. `CartItem` is the ready-made implementation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for entries stored in a cart.
///
/// Implementors expose the three fields the cart logic reads (id, unit price,
/// quantity) and a way to produce a copy with a different quantity. Everything
/// else on the item is opaque to the cart and passes through untouched.
///
/// # Required Traits
///
/// - `Clone`: items are copied into each new cart value
/// - `PartialEq`: sessions compare carts to skip redundant writes
/// - `Debug`: items are debuggable for diagnostics
/// - `Serialize` + `Deserialize`: items are persisted through a `Store`
///
/// # Example
///
/// ```rust
/// use trolley::core::LineItem;
/// use rust_decimal::Decimal;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// struct Ticket {
///     seat: String,
///     cents: i64,
///     count: u32,
/// }
///
/// impl LineItem for Ticket {
///     fn id(&self) -> &str {
///         &self.seat
///     }
///
///     fn price(&self) -> Decimal {
///         Decimal::new(self.cents, 2)
///     }
///
///     fn quantity(&self) -> u32 {
///         self.count
///     }
///
///     fn with_quantity(&self, quantity: u32) -> Self {
///         Self { count: quantity, ..self.clone() }
///     }
/// }
/// ```
pub trait LineItem:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// Product identifier. Unique within a cart.
    fn id(&self) -> &str;

    /// Unit price.
    fn price(&self) -> Decimal;

    /// Number of units in the cart.
    fn quantity(&self) -> u32;

    /// Copy of this item with `quantity` units. All other fields are kept.
    fn with_quantity(&self, quantity: u32) -> Self;

    /// `price * quantity` for this line, clamped to the `Decimal` range.
    fn line_total(&self) -> Decimal {
        self.price().saturating_mul(Decimal::from(self.quantity()))
    }
}

/// A product entry with the display fields a storefront usually renders.
///
/// Prices are serialized as strings so they round-trip exactly through both
/// JSON and binary stores.
///
/// # Example
///
/// ```rust
/// use trolley::core::{CartItem, LineItem};
/// use rust_decimal::Decimal;
///
/// let item = CartItem::new("sku-42", "Pineapple", Decimal::new(450, 2))
///     .with_image("/img/pineapple.png");
///
/// assert_eq!(item.quantity(), 1);
/// assert_eq!(item.with_quantity(3).line_total(), Decimal::new(1350, 2));
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl CartItem {
    /// Create an item with a quantity of one.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
            image: None,
        }
    }

    /// Attach an image reference for display.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl LineItem for CartItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn price(&self) -> Decimal {
        self.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}
