//! Derived cart aggregates.

use super::item::LineItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total price and total quantity of a cart, computed in one pass.
///
/// # Example
///
/// ```rust
/// use trolley::core::{CartItem, CartTotals, LineItem};
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     CartItem::new("a", "A", Decimal::from(10)).with_quantity(2),
///     CartItem::new("b", "B", Decimal::new(250, 2)),
/// ];
///
/// let totals = CartTotals::of(&items);
/// assert_eq!(totals.price, Decimal::new(2250, 2));
/// assert_eq!(totals.quantity, 3);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of `price * quantity` over all lines
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Sum of `quantity` over all lines
    pub quantity: u64,
}

impl CartTotals {
    /// Fold a slice of items into their totals. Empty input yields zeros.
    ///
    /// The price total saturates at `Decimal::MAX` / `Decimal::MIN` rather
    /// than overflowing.
    pub fn of<I: LineItem>(items: &[I]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            price: acc.price.saturating_add(item.line_total()),
            quantity: acc.quantity + u64::from(item.quantity()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CartItem;

    #[test]
    fn empty_items_total_zero() {
        let totals = CartTotals::of::<CartItem>(&[]);
        assert_eq!(totals.price, Decimal::ZERO);
        assert_eq!(totals.quantity, 0);
    }

    #[test]
    fn totals_sum_every_line() {
        let items = vec![
            CartItem::new("a", "A", Decimal::from(10)).with_quantity(3),
            CartItem::new("b", "B", Decimal::new(199, 2)).with_quantity(2),
        ];

        let totals = CartTotals::of(&items);
        assert_eq!(totals.price, Decimal::new(3398, 2));
        assert_eq!(totals.quantity, 5);
    }

    #[test]
    fn quantity_total_does_not_overflow_u32() {
        let items = vec![
            CartItem::new("a", "A", Decimal::ZERO).with_quantity(u32::MAX),
            CartItem::new("b", "B", Decimal::ZERO).with_quantity(u32::MAX),
        ];

        let totals = CartTotals::of(&items);
        assert_eq!(totals.quantity, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn price_total_saturates_at_decimal_max() {
        let items = vec![
            CartItem::new("a", "A", Decimal::MAX).with_quantity(2),
            CartItem::new("b", "B", Decimal::MAX),
            CartItem::new("c", "C", Decimal::ONE),
        ];

        let totals = CartTotals::of(&items);
        assert_eq!(totals.price, Decimal::MAX);
        assert_eq!(totals.quantity, 4);
    }

    #[test]
    fn saturated_total_can_come_back_down() {
        let items = vec![
            CartItem::new("a", "A", Decimal::MAX),
            CartItem::new("b", "B", Decimal::MAX),
            CartItem::new("refund", "Refund", -Decimal::MAX),
        ];

        assert_eq!(CartTotals::of(&items).price, Decimal::ZERO);
    }

    #[test]
    fn negative_prices_pass_through() {
        let items = vec![
            CartItem::new("a", "A", Decimal::from(10)),
            CartItem::new("coupon", "Coupon", Decimal::from(-3)),
        ];

        assert_eq!(CartTotals::of(&items).price, Decimal::from(7));
    }
}
