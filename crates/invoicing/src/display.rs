//! Presentation formatting for amounts.
//!
//! This is the only place amounts are rounded.

use std::borrow::Cow;

use num_format::{Locale, ToFormattedString};

use invoicekit_core::CurrencyCode;

/// Display symbol for a currency; unknown codes are shown as the code.
pub fn currency_symbol(code: CurrencyCode) -> Cow<'static, str> {
    let symbol = match code.as_str() {
        "USD" => "$",
        "IDR" => "Rp",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "SGD" => "S$",
        "MYR" => "RM",
        "AUD" => "A$",
        "CAD" => "C$",
        "CHF" => "Fr",
        "INR" => "₹",
        "THB" => "฿",
        "PHP" => "₱",
        other => return Cow::Owned(other.to_string()),
    };
    Cow::Borrowed(symbol)
}

/// Number of decimal places shown for a currency.
pub fn decimal_places(code: CurrencyCode) -> u32 {
    match code.as_str() {
        "IDR" | "JPY" | "CNY" => 0,
        _ => 2,
    }
}

/// Round half away from zero and group thousands (`1,234.50`, `15,000`).
///
/// Amounts too large for whole-unit grouping are printed ungrouped.
pub fn format_amount(amount: f64, code: CurrencyCode) -> String {
    let places = decimal_places(code);
    let scale = 10u64.pow(places);
    let scaled = (amount.abs() * scale as f64).round();
    if !scaled.is_finite() || scaled >= u64::MAX as f64 {
        return format!("{amount:.prec$}", prec = places as usize);
    }

    let scaled = scaled as u64;
    let whole = (scaled / scale).to_formatted_string(&Locale::en);
    let sign = if amount < 0.0 && scaled != 0 { "-" } else { "" };

    if places == 0 {
        format!("{sign}{whole}")
    } else {
        let frac = scaled % scale;
        format!("{sign}{whole}.{frac:0width$}", width = places as usize)
    }
}

/// Symbol plus amount, with the sign ahead of the symbol (`-$5.00`).
pub fn format_with_symbol(amount: f64, code: CurrencyCode) -> String {
    let formatted = format_amount(amount, code);
    let symbol = currency_symbol(code);

    match formatted.strip_prefix('-') {
        Some(unsigned) => format!("-{symbol}{unsigned}"),
        None => format!("{symbol}{formatted}"),
    }
}
