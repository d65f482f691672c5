//! Audit checks for items and carts using Validation.

use crate::audit::violations::ItemViolation;
use crate::core::{Cart, LineItem};
use rust_decimal::Decimal;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of an audit: success, or every violation found
pub type AuditResult = Validation<(), NonEmptyVec<ItemViolation>>;

/// Check a single item, accumulating ALL violations.
pub fn audit_item<I: LineItem>(item: &I) -> AuditResult {
    let checks: Vec<AuditResult> = vec![
        if item.id().is_empty() {
            Validation::fail(ItemViolation::EmptyId)
        } else {
            Validation::success(())
        },
        if item.price() < Decimal::ZERO {
            Validation::fail(ItemViolation::NegativePrice {
                id: item.id().to_string(),
                price: item.price(),
            })
        } else {
            Validation::success(())
        },
        if item.quantity() == 0 {
            Validation::fail(ItemViolation::ZeroQuantity {
                id: item.id().to_string(),
            })
        } else {
            Validation::success(())
        },
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// Check every item of a cart plus id uniqueness.
///
/// Each repeated id is reported once per extra occurrence.
pub fn audit_cart<I: LineItem>(cart: &Cart<I>) -> AuditResult {
    let mut checks: Vec<AuditResult> = Vec::with_capacity(cart.len() * 2);
    let mut seen = HashSet::new();

    for item in cart.items() {
        checks.push(audit_item(item));

        let check = if seen.insert(item.id()) {
            Validation::success(())
        } else {
            Validation::fail(ItemViolation::DuplicateId {
                id: item.id().to_string(),
            })
        };
        checks.push(check);
    }

    Validation::all_vec(checks).map(|_| ())
}
