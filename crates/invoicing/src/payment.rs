//! Recording payments against a persisted invoice.
//!
//! The form collects the amount as free text; it is cleaned, checked against
//! the invoice's remaining balance and only then turned into a
//! [`RecordPaymentRequest`] for `POST /payments`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invoicekit_core::{InvoiceError, InvoiceId, InvoiceResult, PaymentId};

use crate::display::format_with_symbol;
use crate::listing::InvoiceSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
    CreditCard,
    Cash,
    Check,
    Paypal,
    #[serde(other)]
    Other,
}

/// Payment form input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub invoice_id: Option<InvoiceId>,
    /// Amount as typed; may contain `,` separators and spaces.
    pub amount: String,
    pub payment_method: PaymentMethod,
    pub reference_number: String,
    pub notes: String,
}

impl PaymentDraft {
    /// Empty form for `invoice`.
    pub fn for_invoice(invoice: &InvoiceSummary) -> Self {
        Self {
            invoice_id: Some(invoice.id),
            ..Self::default()
        }
    }

    /// Pre-fill the amount with a share of the remaining balance.
    pub fn fill_percent_of_balance(&mut self, invoice: &InvoiceSummary, percent: f64) {
        self.amount = format!("{:.2}", invoice.outstanding() * percent / 100.0);
    }
}

/// Parse a typed amount, ignoring `,` separators and whitespace.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check a payment against the invoice it pays and return the parsed amount.
///
/// The amount must be positive and must not exceed
/// [`InvoiceSummary::outstanding`].
pub fn validate_payment(draft: &PaymentDraft, invoice: &InvoiceSummary) -> InvoiceResult<f64> {
    match draft.invoice_id {
        None => return Err(InvoiceError::validation("invoice is required")),
        Some(id) if id != invoice.id => {
            return Err(InvoiceError::validation(format!(
                "payment is for invoice {id}, not {}",
                invoice.id
            )));
        }
        Some(_) => {}
    }

    let amount = parse_amount(&draft.amount)
        .filter(|v| *v > 0.0)
        .ok_or_else(|| InvoiceError::invalid_payment("enter a valid amount"))?;

    let remaining = invoice.outstanding();
    if amount > remaining {
        return Err(InvoiceError::invalid_payment(format!(
            "amount cannot exceed remaining balance: {}",
            format_with_symbol(remaining, invoice.currency)
        )));
    }
    Ok(amount)
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub invoice_id: InvoiceId,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub notes: String,
}

impl RecordPaymentRequest {
    /// Validate `draft` against `invoice` and build the request, dated `now`.
    pub fn from_draft(
        draft: &PaymentDraft,
        invoice: &InvoiceSummary,
        now: DateTime<Utc>,
    ) -> InvoiceResult<Self> {
        let amount = validate_payment(draft, invoice)?;
        tracing::debug!(
            invoice_id = %invoice.id,
            amount,
            remaining = invoice.outstanding(),
            "payment validated"
        );
        Ok(Self {
            invoice_id: invoice.id,
            amount,
            payment_method: draft.payment_method,
            payment_date: now,
            reference_number: draft.reference_number.trim().to_string(),
            notes: draft.notes.trim().to_string(),
        })
    }
}

/// One row of `GET /invoices/{id}/payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    pub amount: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sum of recorded payments.
pub fn total_paid(payments: &[Payment]) -> f64 {
    payments.iter().map(|p| p.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::InvoiceStatus;
    use crate::listing::PaymentStatus;
    use chrono::TimeZone;
    use invoicekit_core::{CurrencyCode, CustomerId};

    fn invoice(total: f64, paid: f64) -> InvoiceSummary {
        InvoiceSummary {
            id: InvoiceId::new(),
            customer_id: CustomerId::new(),
            invoice_number: "INV-0042".into(),
            customer_name: None,
            status: InvoiceStatus::Pending,
            payment_status: PaymentStatus::PartiallyPaid,
            total,
            paid_amount: paid,
            currency: CurrencyCode::USD,
            created_at: None,
        }
    }

    fn draft(inv: &InvoiceSummary, amount: &str) -> PaymentDraft {
        PaymentDraft {
            amount: amount.into(),
            ..PaymentDraft::for_invoice(inv)
        }
    }

    #[test]
    fn separators_and_spaces_are_ignored() {
        assert_eq!(parse_amount("1,250.50"), Some(1250.5));
        assert_eq!(parse_amount(" 1 000 "), Some(1000.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn amount_is_bounded_by_remaining_balance() {
        let inv = invoice(2_000.0, 750.0);

        assert_eq!(validate_payment(&draft(&inv, "1,250"), &inv).unwrap(), 1250.0);

        let err = validate_payment(&draft(&inv, "1,250.01"), &inv).unwrap_err();
        assert_eq!(
            err,
            InvoiceError::invalid_payment("amount cannot exceed remaining balance: $1,250.00")
        );
    }

    #[test]
    fn non_positive_or_garbage_amounts_are_rejected() {
        let inv = invoice(100.0, 0.0);
        for raw in ["0", "-5", "", "ten"] {
            assert!(matches!(
                validate_payment(&draft(&inv, raw), &inv),
                Err(InvoiceError::InvalidPayment(_))
            ));
        }
    }

    #[test]
    fn payment_must_target_the_invoice() {
        let inv = invoice(100.0, 0.0);
        let mut unbound = draft(&inv, "10");
        unbound.invoice_id = None;
        assert!(matches!(
            validate_payment(&unbound, &inv),
            Err(InvoiceError::Validation(_))
        ));

        let other = invoice(100.0, 0.0);
        assert!(matches!(
            validate_payment(&draft(&other, "10"), &inv),
            Err(InvoiceError::Validation(_))
        ));
    }

    #[test]
    fn request_body_has_trimmed_text_and_timestamp() {
        let inv = invoice(500.0, 0.0);
        let mut form = draft(&inv, "200");
        form.payment_method = PaymentMethod::Paypal;
        form.reference_number = "  TX-991 ".into();
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

        let req = RecordPaymentRequest::from_draft(&form, &inv, now).unwrap();
        let body = serde_json::to_value(&req).unwrap();

        assert_eq!(body["invoice_id"], inv.id.to_string());
        assert_eq!(body["amount"], 200.0);
        assert_eq!(body["payment_method"], "paypal");
        assert_eq!(body["payment_date"], "2026-10-18T12:00:00Z");
        assert_eq!(body["reference_number"], "TX-991");
        assert_eq!(body["notes"], "");
    }

    #[test]
    fn quick_fill_uses_remaining_balance() {
        let inv = invoice(1_000.0, 400.0);
        let mut form = PaymentDraft::for_invoice(&inv);

        form.fill_percent_of_balance(&inv, 50.0);
        assert_eq!(form.amount, "300.00");
        form.fill_percent_of_balance(&inv, 100.0);
        assert_eq!(validate_payment(&form, &inv).unwrap(), 600.0);
    }

    #[test]
    fn history_rows_decode_and_sum() {
        let rows: Vec<Payment> = serde_json::from_str(
            r#"[{
                "id": "0191d3b0-6a2f-7cc1-9a53-2f4c1a0b9e21",
                "invoice_id": "0191d3b0-6a2f-7cc1-9a53-2f4c1a0b9e11",
                "amount": 120.5,
                "payment_method": "credit_card",
                "payment_date": "2026-10-01T09:00:00Z",
                "reference_number": "CC-1",
                "created_by": "admin"
            }, {
                "id": "0191d3b0-6a2f-7cc1-9a53-2f4c1a0b9e22",
                "invoice_id": "0191d3b0-6a2f-7cc1-9a53-2f4c1a0b9e11",
                "amount": 79.5,
                "payment_method": "crypto",
                "payment_date": "2026-10-02T09:00:00Z"
            }]"#,
        )
        .unwrap();

        assert_eq!(rows[0].payment_method, PaymentMethod::CreditCard);
        assert_eq!(rows[1].payment_method, PaymentMethod::Other);
        assert_eq!(rows[1].reference_number, None);
        assert_eq!(total_paid(&rows), 200.0);
    }
}
