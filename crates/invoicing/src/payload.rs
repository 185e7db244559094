//! Request body for `POST /invoices`.
//!
//! The body carries the inputs only. The API recomputes subtotal, tax and
//! total itself; the totals returned by [`CreateInvoiceRequest::from_draft`]
//! are for display next to the submit button and are never sent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicekit_core::{CurrencyCode, CustomerId, InvoiceError, InvoiceResult};

use crate::draft::{InvoiceDraft, InvoiceStatus, LineItem};
use crate::totals::Totals;
use crate::validation::validate_draft;

/// Largest quantity that survives the trip through `f64` unchanged.
const MAX_WHOLE_QUANTITY: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemPayload {
    pub description: String,
    /// The API stores quantities as integers and rejects `1.5` or `3.0`.
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItemPayload {
    /// Build the wire row for item `index`. Fractional quantities price fine
    /// locally but cannot be submitted.
    pub fn from_item(index: usize, item: &LineItem) -> InvoiceResult<Self> {
        let q = item.quantity;
        if q.fract() != 0.0 || q.abs() > MAX_WHOLE_QUANTITY {
            return Err(InvoiceError::invalid_line_item(
                index,
                "quantity must be a whole number",
            ));
        }
        Ok(Self {
            description: item.description.trim().to_string(),
            quantity: q as i64,
            unit_price: item.unit_price,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_id: CustomerId,
    pub items: Vec<LineItemPayload>,
    pub tax: f64,
    pub discount: f64,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub currency: CurrencyCode,
}

impl CreateInvoiceRequest {
    /// Validate `draft` and build the request body from it.
    pub fn from_draft(draft: &InvoiceDraft) -> InvoiceResult<(Self, Totals)> {
        let totals = validate_draft(draft)?;
        let customer_id = draft
            .customer_id
            .ok_or_else(|| InvoiceError::validation("customer is required"))?;
        let items = draft
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| LineItemPayload::from_item(index, item))
            .collect::<InvoiceResult<Vec<_>>>()?;

        let request = Self {
            customer_id,
            items,
            tax: draft.tax,
            discount: draft.discount,
            status: draft.status,
            notes: draft.notes.trim().to_string(),
            due_date: draft.due_date,
            currency: draft.currency,
        };
        Ok((request, totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new(CurrencyCode::IDR);
        draft.customer_id = Some(CustomerId::new());
        draft.items = vec![
            LineItem::new(" Hosting ", 3.0, 150_000.0),
            LineItem::new("Support hours", 2.0, 200_000.0),
        ];
        draft.tax = 11.0;
        draft.discount = 50_000.0;
        draft
    }

    #[test]
    fn body_matches_api_shape() {
        let draft = draft();
        let (request, totals) = CreateInvoiceRequest::from_draft(&draft).unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "customer_id": draft.customer_id.unwrap().to_string(),
                "items": [
                    { "description": "Hosting", "quantity": 3, "unit_price": 150000.0 },
                    { "description": "Support hours", "quantity": 2, "unit_price": 200000.0 }
                ],
                "tax": 11.0,
                "discount": 50000.0,
                "status": "pending",
                "currency": "IDR"
            })
        );
        assert_eq!(totals.subtotal, 850_000.0);
        assert_eq!(totals.total, 893_500.0);
    }

    #[test]
    fn optional_fields_are_included_when_set() {
        let mut draft = draft();
        draft.notes = "Thanks!".into();
        draft.due_date = NaiveDate::from_ymd_opt(2026, 12, 1);
        draft.status = InvoiceStatus::Paid;

        let (request, _) = CreateInvoiceRequest::from_draft(&draft).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["notes"], "Thanks!");
        assert_eq!(body["due_date"], "2026-12-01");
        assert_eq!(body["status"], "paid");
    }

    #[test]
    fn invalid_draft_produces_no_payload() {
        let mut draft = draft();
        draft.discount = 10_000_000.0;
        let err = CreateInvoiceRequest::from_draft(&draft).unwrap_err();
        assert!(matches!(err, InvoiceError::NegativeTotal { .. }));
    }

    #[test]
    fn fractional_quantity_prices_locally_but_is_not_submittable() {
        let mut draft = draft();
        draft.items[1].quantity = 1.5;

        // Totals and validation accept it.
        assert_eq!(draft.totals().subtotal, 750_000.0);
        assert!(validate_draft(&draft).is_ok());

        let err = CreateInvoiceRequest::from_draft(&draft).unwrap_err();
        assert_eq!(
            err,
            InvoiceError::invalid_line_item(1, "quantity must be a whole number")
        );
    }
}
