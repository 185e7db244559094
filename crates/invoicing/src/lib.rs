//! Invoicing domain module.
//!
//! This crate contains the client-side invoice logic: draft editing, pricing
//! totals, currency conversion, validation before submission, display
//! formatting, invoice list helpers and payment recording. Everything here is deterministic and
//! free of IO; the API remains the system of record for persisted totals.

pub mod customer;
pub mod display;
pub mod draft;
pub mod listing;
pub mod payload;
pub mod payment;
pub mod rates;
pub mod totals;
pub mod validation;

pub use customer::{Customer, CustomerDirectory};
pub use display::{currency_symbol, decimal_places, format_amount, format_with_symbol};
pub use draft::{InvoiceDraft, InvoiceStatus, LineItem, LineItemEdit};
pub use listing::{InvoiceFilter, InvoiceSummary, PaymentStatus, StatusFilter, display_total};
pub use payload::{CreateInvoiceRequest, LineItemPayload};
pub use payment::{
    Payment, PaymentDraft, PaymentMethod, RecordPaymentRequest, parse_amount, total_paid,
    validate_payment,
};
pub use rates::{CurrencyPair, CurrencyRateTable, RateRecord, convert_amount, convert_draft_currency};
pub use totals::{Totals, compute_totals};
pub use validation::{validate_draft, validate_line_item};
