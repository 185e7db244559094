//! `invoice-estimate <draft.json> [TARGET_CURRENCY]`
//!
//! Loads a draft, re-prices it in the target currency using the API's rate
//! table, and prints the advisory totals and any validation problem.

use anyhow::{Context, Result, bail};

use invoicekit_client::{ApiClient, ClientConfig};
use invoicekit_core::CurrencyCode;
use invoicekit_invoicing::{CurrencyRateTable, InvoiceDraft, format_with_symbol, validate_draft};

#[tokio::main]
async fn main() -> Result<()> {
    invoicekit_observability::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: invoice-estimate <draft.json> [TARGET_CURRENCY]");
    };
    let target = args
        .next()
        .map(|code| code.parse::<CurrencyCode>())
        .transpose()
        .context("invalid target currency")?;

    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let mut draft: InvoiceDraft =
        serde_json::from_str(&raw).with_context(|| format!("parsing draft {path}"))?;

    if let Some(target) = target.filter(|t| *t != draft.currency) {
        let client = ApiClient::new(ClientConfig::from_env()?)?;
        let rates = match client.fetch_rate_table().await {
            Ok(rates) => rates,
            Err(e) => {
                // Conversions against an empty table report the missing pair.
                tracing::warn!(error = %e, "could not load currency rates");
                CurrencyRateTable::new()
            }
        };
        draft
            .switch_currency(target, &rates)
            .with_context(|| format!("converting draft to {target}"))?;
    }

    let totals = draft.totals();
    let currency = draft.currency;
    println!("Subtotal  {}", format_with_symbol(totals.subtotal, currency));
    println!("Tax ({}%) {}", draft.tax, format_with_symbol(totals.tax_amount, currency));
    println!("Discount  -{}", format_with_symbol(draft.discount, currency));
    println!("Total     {}", format_with_symbol(totals.total, currency));

    if let Err(e) = validate_draft(&draft) {
        println!("Not ready to submit: {e}");
    }
    Ok(())
}
