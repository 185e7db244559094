//! `invoicekit-client`
//!
//! **Responsibility:** thin client for the remote invoicing API.
//!
//! This crate provides:
//! - Environment configuration (`ClientConfig`)
//! - Rate table loading, invoice listing and draft submission (`ApiClient`)
//!
//! The API remains the authority; totals computed locally are advisory.

pub mod api;
pub mod config;
pub mod error;

pub use api::{ApiClient, CreatedInvoice};
pub use config::ClientConfig;
pub use error::ClientError;
