//! `invoicekit-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod currency;
pub mod error;
pub mod id;
pub mod value_object;

pub use currency::CurrencyCode;
pub use error::{InvoiceError, InvoiceResult};
pub use id::{CustomerId, InvoiceId, PaymentId};
pub use value_object::ValueObject;
