//! Invoice drafts: the unsaved invoice being composed before submission.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicekit_core::{CurrencyCode, CustomerId, InvoiceError, InvoiceResult, ValueObject};

use crate::rates::{CurrencyRateTable, convert_draft_currency};
use crate::totals::{Totals, compute_totals};

/// One row of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    /// Price per unit in the draft's currency.
    pub unit_price: f64,
}

impl ValueObject for LineItem {}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

impl Default for LineItem {
    /// A freshly added row: no description, one unit, no price yet.
    fn default() -> Self {
        Self::new("", 1.0, 0.0)
    }
}

/// Status chosen on the form when creating an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// A single field edit on a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemEdit {
    Description(String),
    Quantity(f64),
    UnitPrice(f64),
}

/// In-progress invoice form state.
///
/// Submitted wholesale to the API and discarded on success. Errors raised
/// while editing, converting or validating never leave it half-updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub items: Vec<LineItem>,
    /// Tax percentage, expected in `0..=100`.
    #[serde(default)]
    pub tax: f64,
    /// Flat discount in the draft's currency.
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl ValueObject for InvoiceDraft {}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new(CurrencyCode::USD)
    }
}

impl InvoiceDraft {
    /// Empty draft with one blank row.
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            customer_id: None,
            items: vec![LineItem::default()],
            tax: 0.0,
            discount: 0.0,
            currency,
            status: InvoiceStatus::Pending,
            notes: String::new(),
            due_date: None,
        }
    }

    pub fn add_item(&mut self) {
        self.items.push(LineItem::default());
    }

    pub fn update_item(&mut self, index: usize, edit: LineItemEdit) -> InvoiceResult<()> {
        let len = self.items.len();
        let item = self.items.get_mut(index).ok_or_else(|| {
            InvoiceError::validation(format!("no line item at index {index} (draft has {len})"))
        })?;

        match edit {
            LineItemEdit::Description(description) => item.description = description,
            LineItemEdit::Quantity(quantity) => item.quantity = quantity,
            LineItemEdit::UnitPrice(unit_price) => item.unit_price = unit_price,
        }
        Ok(())
    }

    /// Remove a row. The last remaining row is kept, and out-of-range
    /// indexes are ignored; returns whether a row was removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.items, self.tax, self.discount)
    }

    /// Re-price the draft in `new_currency`.
    ///
    /// The draft is only replaced when every amount converted; on a missing
    /// rate it is left exactly as it was.
    pub fn switch_currency(
        &mut self,
        new_currency: CurrencyCode,
        rates: &CurrencyRateTable,
    ) -> InvoiceResult<()> {
        let converted = convert_draft_currency(self, new_currency, rates)?;
        *self = converted;
        Ok(())
    }
}
