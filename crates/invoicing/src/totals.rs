//! Subtotal / tax / total arithmetic.

use serde::{Deserialize, Serialize};

use invoicekit_core::ValueObject;

use crate::draft::LineItem;

/// Totals of a draft, in the draft's currency.
///
/// Values carry full `f64` precision; rounding happens only when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl ValueObject for Totals {}

impl Totals {
    /// A discount larger than subtotal plus tax drives the total below zero.
    pub fn is_negative(&self) -> bool {
        self.total < 0.0
    }
}

/// Compute `subtotal`, `tax_amount` and `total` for a set of line items.
///
/// `tax_percent` is not range-checked and negative inputs are not rejected:
/// validation is a separate step (see [`crate::validation`]).
pub fn compute_totals(items: &[LineItem], tax_percent: f64, discount: f64) -> Totals {
    let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
    let tax_amount = subtotal * tax_percent / 100.0;
    let total = subtotal + tax_amount - discount;

    Totals {
        subtotal,
        tax_amount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(quantity: f64, unit_price: f64) -> LineItem {
        LineItem::new("item", quantity, unit_price)
    }

    #[test]
    fn single_line_with_ten_percent_tax() {
        let totals = compute_totals(&[item(2.0, 10.0)], 10.0, 0.0);
        assert_eq!(totals.subtotal, 20.0);
        assert_eq!(totals.tax_amount, 2.0);
        assert_eq!(totals.total, 22.0);
    }

    #[test]
    fn empty_items_yield_zero_subtotal() {
        let totals = compute_totals(&[], 11.0, 0.0);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn discount_is_subtracted_after_tax() {
        let totals = compute_totals(&[item(3.0, 50.0), item(1.0, 25.0)], 20.0, 15.0);
        assert_eq!(totals.subtotal, 175.0);
        assert_eq!(totals.tax_amount, 35.0);
        assert_eq!(totals.total, 195.0);
    }

    #[test]
    fn oversized_discount_goes_negative_without_clamping() {
        let totals = compute_totals(&[item(1.0, 10.0)], 10.0, 20.0);
        assert_eq!(totals.total, -9.0);
        assert!(totals.is_negative());
    }

    #[test]
    fn out_of_range_tax_is_not_rejected() {
        let totals = compute_totals(&[item(1.0, 100.0)], 150.0, 0.0);
        assert_eq!(totals.tax_amount, 150.0);
        assert_eq!(totals.total, 250.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: permuting the items does not change any of the totals.
        #[test]
        fn totals_are_order_independent(
            lines in prop::collection::vec((1u32..1_000u32, 0u32..100_000u32), 1..12),
            tax in 0u32..=100u32,
            discount in 0u32..10_000u32,
        ) {
            // Integer-valued inputs keep every partial sum exact.
            let items: Vec<LineItem> = lines
                .iter()
                .map(|(q, p)| item(f64::from(*q), f64::from(*p)))
                .collect();
            let mut reversed = items.clone();
            reversed.reverse();
            let mut rotated = items.clone();
            rotated.rotate_left(1);

            let tax = f64::from(tax);
            let discount = f64::from(discount);
            let a = compute_totals(&items, tax, discount);
            let b = compute_totals(&reversed, tax, discount);
            let c = compute_totals(&rotated, tax, discount);

            prop_assert_eq!(a, b);
            prop_assert_eq!(a, c);
        }

        /// Property: total always equals subtotal + tax - discount.
        #[test]
        fn total_matches_invariant(
            lines in prop::collection::vec((0.5f64..50.0, 0.0f64..500.0), 0..8),
            tax in 0.0f64..100.0,
            discount in 0.0f64..1_000.0,
        ) {
            let items: Vec<LineItem> = lines.iter().map(|(q, p)| item(*q, *p)).collect();
            let totals = compute_totals(&items, tax, discount);
            let expected = totals.subtotal + totals.tax_amount - discount;
            prop_assert_eq!(totals.total, expected);
        }
    }
}
