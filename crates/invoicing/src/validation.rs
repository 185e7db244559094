//! Checks a draft must pass before it is submitted to the API.
//!
//! Validation never mutates the draft, so a rejected draft stays editable.

use invoicekit_core::{InvoiceError, InvoiceResult};

use crate::draft::{InvoiceDraft, LineItem};
use crate::totals::Totals;

/// Validate one row. `index` is only used to label the error.
pub fn validate_line_item(index: usize, item: &LineItem) -> InvoiceResult<()> {
    if item.description.trim().is_empty() {
        return Err(InvoiceError::invalid_line_item(index, "description is required"));
    }
    if !item.quantity.is_finite() || item.quantity <= 0.0 {
        return Err(InvoiceError::invalid_line_item(
            index,
            "quantity must be greater than 0",
        ));
    }
    if !item.unit_price.is_finite() || item.unit_price < 0.0 {
        return Err(InvoiceError::invalid_line_item(
            index,
            "unit price must not be negative",
        ));
    }
    Ok(())
}

/// Validate a whole draft and return its advisory totals.
///
/// Checks run in form order (customer, rows, tax and discount, total) and
/// the first failure is reported.
pub fn validate_draft(draft: &InvoiceDraft) -> InvoiceResult<Totals> {
    if draft.customer_id.is_none() {
        return Err(InvoiceError::validation("customer is required"));
    }
    if draft.items.is_empty() {
        return Err(InvoiceError::validation("at least one line item is required"));
    }
    for (index, item) in draft.items.iter().enumerate() {
        validate_line_item(index, item)?;
    }

    if !draft.tax.is_finite() || !(0.0..=100.0).contains(&draft.tax) {
        return Err(InvoiceError::validation(format!(
            "tax must be between 0 and 100 percent, got {}",
            draft.tax
        )));
    }
    if !draft.discount.is_finite() || draft.discount < 0.0 {
        return Err(InvoiceError::validation(format!(
            "discount must not be negative, got {}",
            draft.discount
        )));
    }

    let totals = draft.totals();
    if totals.is_negative() {
        return Err(InvoiceError::negative_total(totals.total));
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicekit_core::{CurrencyCode, CustomerId};

    fn valid_draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new(CurrencyCode::USD);
        draft.customer_id = Some(CustomerId::new());
        draft.items = vec![LineItem::new("Widget", 2.0, 10.0)];
        draft.tax = 10.0;
        draft
    }

    #[test]
    fn valid_draft_returns_totals() {
        let totals = validate_draft(&valid_draft()).unwrap();
        assert_eq!(totals.total, 22.0);
    }

    #[test]
    fn customer_is_required() {
        let mut draft = valid_draft();
        draft.customer_id = None;
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err, InvoiceError::validation("customer is required"));
    }

    #[test]
    fn empty_items_are_rejected() {
        let mut draft = valid_draft();
        draft.items.clear();
        assert!(matches!(validate_draft(&draft), Err(InvoiceError::Validation(_))));
    }

    #[test]
    fn bad_rows_report_their_index() {
        let mut draft = valid_draft();
        draft.items.push(LineItem::new("   ", 1.0, 1.0));
        assert!(matches!(
            validate_draft(&draft),
            Err(InvoiceError::InvalidLineItem { index: 1, .. })
        ));

        draft.items[1] = LineItem::new("Zero qty", 0.0, 1.0);
        assert!(matches!(
            validate_draft(&draft),
            Err(InvoiceError::InvalidLineItem { index: 1, .. })
        ));

        draft.items[1] = LineItem::new("Refund", 1.0, -5.0);
        assert!(matches!(
            validate_draft(&draft),
            Err(InvoiceError::InvalidLineItem { index: 1, .. })
        ));

        draft.items[1] = LineItem::new("NaN qty", f64::NAN, 1.0);
        assert!(matches!(
            validate_draft(&draft),
            Err(InvoiceError::InvalidLineItem { index: 1, .. })
        ));
    }

    #[test]
    fn free_rows_are_allowed() {
        let mut draft = valid_draft();
        draft.items.push(LineItem::new("Complimentary setup", 1.0, 0.0));
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn tax_and_discount_ranges() {
        let mut draft = valid_draft();
        draft.tax = 101.0;
        assert!(matches!(validate_draft(&draft), Err(InvoiceError::Validation(_))));

        draft.tax = 0.0;
        draft.discount = -1.0;
        assert!(matches!(validate_draft(&draft), Err(InvoiceError::Validation(_))));
    }

    #[test]
    fn discount_above_subtotal_plus_tax_is_negative_total() {
        let mut draft = valid_draft();
        draft.discount = 30.0;
        let before = draft.clone();

        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err, InvoiceError::negative_total(-8.0));
        assert_eq!(draft, before);
    }
}
