//! Currency rate table and conversion.
//!
//! Rates are directional: `(USD, EUR)` says nothing about `(EUR, USD)`, and the
//! reciprocal is never inferred. A pair missing from the table is an error,
//! never an implicit rate of 1.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use invoicekit_core::{CurrencyCode, InvoiceError, InvoiceResult};

use crate::draft::{InvoiceDraft, LineItem};

/// Directed currency pair, displayed as `FROM_TO`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }
}

impl core::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}_{}", self.from, self.to)
    }
}

/// One rate as served by `GET /currency-rates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub rate: f64,
}

/// Read-only lookup of multiplicative rates by directed pair.
///
/// An empty table (e.g. before the API responded) is valid; every
/// non-identity conversion against it fails with `RateNotFound`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyRateTable {
    rates: HashMap<CurrencyPair, f64>,
}

impl CurrencyRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten API records into the pair mapping. Later records win.
    pub fn from_records<'a, I>(records: I) -> InvoiceResult<Self>
    where
        I: IntoIterator<Item = &'a RateRecord>,
    {
        let mut table = Self::new();
        for record in records {
            table.insert(record.from_currency, record.to_currency, record.rate)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, from: CurrencyCode, to: CurrencyCode, rate: f64) -> InvoiceResult<()> {
        let pair = CurrencyPair::new(from, to);
        if !rate.is_finite() || rate <= 0.0 {
            return Err(InvoiceError::validation(format!(
                "rate for {pair} must be a positive number, got {rate}"
            )));
        }
        self.rates.insert(pair, rate);
        Ok(())
    }

    pub fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
        self.rates.get(&CurrencyPair::new(from, to)).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Convert `amount` from one currency to another. No rounding is applied.
pub fn convert_amount(
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
    rates: &CurrencyRateTable,
) -> InvoiceResult<f64> {
    if from == to {
        return Ok(amount);
    }

    match rates.rate(from, to) {
        Some(rate) => Ok(amount * rate),
        None => {
            tracing::warn!(pair = %CurrencyPair::new(from, to), "conversion rate not found");
            Err(InvoiceError::rate_not_found(from.as_str(), to.as_str()))
        }
    }
}

/// Produce a copy of `draft` priced in `new_currency`.
///
/// Unit prices and the discount are converted; quantities, descriptions and
/// the remaining form fields are copied as-is. Each call multiplies by a
/// floating-point rate, so repeated switching drifts slightly.
pub fn convert_draft_currency(
    draft: &InvoiceDraft,
    new_currency: CurrencyCode,
    rates: &CurrencyRateTable,
) -> InvoiceResult<InvoiceDraft> {
    let from = draft.currency;

    let items = draft
        .items
        .iter()
        .map(|item| {
            Ok(LineItem {
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: convert_amount(item.unit_price, from, new_currency, rates)?,
            })
        })
        .collect::<InvoiceResult<Vec<_>>>()?;
    let discount = convert_amount(draft.discount, from, new_currency, rates)?;

    tracing::debug!(
        from = %from,
        to = %new_currency,
        items = items.len(),
        "converted draft currency"
    );

    Ok(InvoiceDraft {
        items,
        discount,
        currency: new_currency,
        ..draft.clone()
    })
}
