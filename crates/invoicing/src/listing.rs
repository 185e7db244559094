//! Invoice list view: filtering and display-currency totals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use invoicekit_core::{CurrencyCode, CustomerId, InvoiceId, InvoiceResult};

use crate::customer::CustomerDirectory;
use crate::draft::InvoiceStatus;
use crate::rates::{CurrencyRateTable, convert_amount};

/// Payment progress as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    PartiallyPaid,
    Paid,
    Overdue,
    #[serde(other)]
    Unknown,
}

/// One row of `GET /invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub invoice_number: String,
    /// Only some API deployments embed this; see [`InvoiceSummary::display_customer_name`].
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Persisted total in the invoice's own currency.
    pub total: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl InvoiceSummary {
    /// Name from the customer list, falling back to an embedded name.
    pub fn display_customer_name<'a>(&'a self, customers: &'a CustomerDirectory) -> Option<&'a str> {
        customers
            .name(self.customer_id)
            .or(self.customer_name.as_deref())
    }

    pub fn outstanding(&self) -> f64 {
        self.total - self.paid_amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

/// Filters of the invoice list. All active filters must match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoiceFilter {
    pub status: StatusFilter,
    /// Case-insensitive substring of the customer name or invoice id.
    pub search: String,
    pub start_date: Option<NaiveDate>,
    /// Inclusive: covers the whole day.
    pub end_date: Option<NaiveDate>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &InvoiceSummary, customers: &CustomerDirectory) -> bool {
        if let StatusFilter::Only(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let name_hit = invoice
                .display_customer_name(customers)
                .is_some_and(|name| name.to_lowercase().contains(&needle));
            let id_hit = invoice.id.to_string().contains(&needle);
            if !name_hit && !id_hit {
                return false;
            }
        }

        if self.start_date.is_some() || self.end_date.is_some() {
            // Undated invoices cannot satisfy a date range.
            let Some(created) = invoice.created_at.map(|at| at.date_naive()) else {
                return false;
            };
            if self.start_date.is_some_and(|start| created < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| created > end) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(
        &self,
        invoices: &'a [InvoiceSummary],
        customers: &CustomerDirectory,
    ) -> Vec<&'a InvoiceSummary> {
        invoices
            .iter()
            .filter(|inv| self.matches(inv, customers))
            .collect()
    }
}

/// Total of a listed invoice expressed in `display_currency`.
///
/// A missing rate is returned as an error so the list can flag the row
/// instead of showing the unconverted number as if it were converted.
pub fn display_total(
    invoice: &InvoiceSummary,
    display_currency: CurrencyCode,
    rates: &CurrencyRateTable,
) -> InvoiceResult<f64> {
    convert_amount(invoice.total, invoice.currency, display_currency, rates)
}
