//! Domain error model.

use thiserror::Error;

/// Result type used across the invoicing domain.
pub type InvoiceResult<T> = Result<T, InvoiceError>;

/// Domain-level error.
///
/// Every variant is recoverable: callers surface it to the user and keep the
/// draft editable. Transport failures belong to the client layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvoiceError {
    /// A line item cannot be submitted as entered.
    #[error("line item {index} is invalid: {reason}")]
    InvalidLineItem { index: usize, reason: String },

    /// No rate is known for the directed currency pair.
    #[error("no conversion rate for {from}_{to}")]
    RateNotFound { from: String, to: String },

    /// The discount exceeds subtotal plus tax.
    #[error("invoice total is negative ({total})")]
    NegativeTotal { total: f64 },

    /// A payment cannot be recorded against the invoice as entered.
    #[error("invalid payment: {0}")]
    InvalidPayment(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl InvoiceError {
    pub fn invalid_line_item(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidLineItem {
            index,
            reason: reason.into(),
        }
    }

    pub fn rate_not_found(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::RateNotFound {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn negative_total(total: f64) -> Self {
        Self::NegativeTotal { total }
    }

    pub fn invalid_payment(msg: impl Into<String>) -> Self {
        Self::InvalidPayment(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Pair key (`FROM_TO`) for a missing rate, if this is one.
    pub fn missing_pair(&self) -> Option<String> {
        match self {
            Self::RateNotFound { from, to } => Some(format!("{from}_{to}")),
            _ => None,
        }
    }
}
