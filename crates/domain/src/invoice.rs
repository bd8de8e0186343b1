use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    PartiallyPaid,
    Overdue,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::PartiallyPaid => "partially_paid",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid invoice status: {0}")]
pub struct InvalidInvoiceStatusError(String);

impl FromStr for InvoiceStatus {
    type Err = InvalidInvoiceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "partially_paid" => Ok(Self::PartiallyPaid),
            "overdue" => Ok(Self::Overdue),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidInvoiceStatusError(s.to_string())),
        }
    }
}

/// An `Invoice` sent by a `User` to one of their clients.
///
/// Only `Pending` invoices are considered by the reminder campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: ID,
    /// The owner of the invoice, whose reminder settings apply
    pub user_id: ID,
    /// Human readable number, e.g. `INV-0042`
    pub invoice_number: String,
    pub client_name: String,
    /// Recipient of payment reminders
    pub client_email: String,
    /// Amount in minor units of `currency` (cents for USD)
    pub amount: i64,
    /// ISO 4217 currency code
    pub currency: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    /// Creation timestamp in millis
    pub created: i64,
}

impl Invoice {
    pub fn is_reminder_candidate(&self) -> bool {
        self.status == InvoiceStatus::Pending
    }

    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount, &self.currency)
    }
}

impl Entity for Invoice {
    fn id(&self) -> &ID {
        &self.id
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        _ => None,
    }
}

fn minor_unit_digits(currency: &str) -> u32 {
    match currency {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
        _ => 2,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Formats an amount given in minor units, e.g. `123456, "USD"` -> `$1,234.56`.
/// Currencies without a known symbol are prefixed with their code.
pub fn format_amount(amount: i64, currency: &str) -> String {
    let currency = currency.to_uppercase();
    let digits = minor_unit_digits(&currency);
    let divisor = 10_u64.pow(digits);
    let abs = amount.unsigned_abs();

    let mut number = group_thousands(abs / divisor);
    if digits > 0 {
        number.push_str(&format!(
            ".{:0width$}",
            abs % divisor,
            width = digits as usize
        ));
    }

    let sign = if amount < 0 { "-" } else { "" };
    match currency_symbol(&currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, number),
        None => format!("{}{} {}", sign, currency, number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_amounts_with_symbol() {
        assert_eq!(format_amount(123456, "USD"), "$1,234.56");
        assert_eq!(format_amount(5, "usd"), "$0.05");
        assert_eq!(format_amount(100000000, "EUR"), "€1,000,000.00");
        assert_eq!(format_amount(-2500, "GBP"), "-£25.00");
    }

    #[test]
    fn formats_zero_decimal_currencies() {
        assert_eq!(format_amount(15000, "JPY"), "¥15,000");
        assert_eq!(format_amount(999, "KRW"), "KRW 999");
    }

    #[test]
    fn formats_unknown_currency_with_code() {
        assert_eq!(format_amount(1999, "SEK"), "SEK 19.99");
    }

    #[test]
    fn parses_status() {
        assert_eq!(
            "partially_paid".parse::<InvoiceStatus>().unwrap(),
            InvoiceStatus::PartiallyPaid
        );
        assert_eq!(InvoiceStatus::Cancelled.to_string(), "cancelled");
        assert!("unknown".parse::<InvoiceStatus>().is_err());
    }
}
