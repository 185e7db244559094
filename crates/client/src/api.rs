//! HTTP calls to the invoicing API.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use invoicekit_core::{CurrencyCode, InvoiceId};
use invoicekit_invoicing::{
    CreateInvoiceRequest, CurrencyRateTable, Customer, InvoiceDraft, InvoiceSummary, Payment,
    PaymentDraft, RateRecord, RecordPaymentRequest, Totals,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Persisted totals may differ from the local estimate by rounding only.
const TOTAL_MISMATCH_TOLERANCE: f64 = 0.005;

/// Response of `POST /invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedInvoice {
    pub id: InvoiceId,
    /// Authoritative total as persisted by the API.
    pub total: f64,
    #[serde(default)]
    pub currency: CurrencyCode,
    /// Base64-encoded PDF rendered by the API, when it sends one.
    #[serde(default)]
    pub pdf_data: Option<String>,
}

/// Client for the invoicing API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Load `GET /currency-rates` into a pair table.
    pub async fn fetch_rate_table(&self) -> Result<CurrencyRateTable, ClientError> {
        let records: Option<Vec<RateRecord>> = self.get_json("currency-rates").await?;
        let records = records.unwrap_or_default();
        let table = CurrencyRateTable::from_records(&records)?;
        tracing::info!(pairs = table.len(), "loaded currency rates");
        Ok(table)
    }

    /// `GET /invoices`; a `null` body means no invoices yet.
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, ClientError> {
        let invoices: Option<Vec<InvoiceSummary>> = self.get_json("invoices").await?;
        Ok(invoices.unwrap_or_default())
    }

    /// `GET /customers`; a `null` body means no customers yet.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ClientError> {
        let customers: Option<Vec<Customer>> = self.get_json("customers").await?;
        Ok(customers.unwrap_or_default())
    }

    /// Payments recorded against one invoice.
    pub async fn list_payments(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, ClientError> {
        let payments: Option<Vec<Payment>> = self
            .get_json(&format!("invoices/{invoice_id}/payments"))
            .await?;
        Ok(payments.unwrap_or_default())
    }

    /// Validate a payment against `invoice` and record it.
    ///
    /// Amounts above the remaining balance are refused locally and never sent.
    pub async fn record_payment(
        &self,
        draft: &PaymentDraft,
        invoice: &InvoiceSummary,
    ) -> Result<Payment, ClientError> {
        let request = RecordPaymentRequest::from_draft(draft, invoice, Utc::now())?;

        let url = self.config.url("payments");
        tracing::info!(%url, invoice_id = %request.invoice_id, amount = request.amount, "recording payment");
        let resp = self
            .authorized(self.http.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::read_json(resp).await
    }

    /// Validate and submit a draft.
    ///
    /// Nothing is sent when validation fails. Returns the created invoice and
    /// the local estimate it was submitted with.
    pub async fn create_invoice(
        &self,
        draft: &InvoiceDraft,
    ) -> Result<(CreatedInvoice, Totals), ClientError> {
        let (request, estimate) = CreateInvoiceRequest::from_draft(draft)?;

        let url = self.config.url("invoices");
        tracing::info!(%url, currency = %request.currency, items = request.items.len(), "submitting invoice");
        let resp = self
            .authorized(self.http.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let created: CreatedInvoice = Self::read_json(resp).await?;

        if (created.total - estimate.total).abs() > TOTAL_MISMATCH_TOLERANCE {
            tracing::warn!(
                invoice_id = %created.id,
                estimate = estimate.total,
                persisted = created.total,
                "persisted total differs from local estimate"
            );
        }
        Ok((created, estimate))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.config.url(path);
        tracing::debug!(%url, "GET");
        let resp = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::read_json(resp).await
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api(status.as_u16(), body.trim().to_string()));
        }
        resp.json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}
