//! Invoice data models produced by extraction and consumed by reconciliation.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel vendor name used when extraction finds nothing usable.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

pub(crate) fn default_currency() -> String {
    "USD".to_string()
}

/// Structured invoice draft produced by the field extractor.
///
/// Every field is always populated: extraction failures degrade to the
/// documented defaults rather than an error, because OCR input is inherently
/// noisy and partial results remain useful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Extracted invoice number, or a generated `INV-<millis>` placeholder.
    pub invoice_number: String,

    /// Extracted vendor name, or the `"Unknown Vendor"` sentinel.
    pub vendor_name: String,

    /// Invoice date in its raw textual form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,

    /// Payment due date in its raw textual form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Net amount; falls back to `total - tax`, then the total, then zero.
    pub subtotal: Decimal,

    /// Tax amount, zero when not extracted.
    pub tax: Decimal,

    /// Grand total; falls back to the extracted subtotal, then zero.
    pub total_amount: Decimal,

    /// ISO-like 3-letter currency code (default "USD").
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tabular line rows recovered from the text, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,

    /// Extraction confidence 0-100, driven by the four anchor fields
    /// (number, vendor, date, total).
    pub confidence: u8,
}

impl InvoiceDraft {
    /// Generate the placeholder used when no invoice number is extracted.
    pub fn placeholder_number() -> String {
        format!("INV-{}", Utc::now().timestamp_millis())
    }
}

/// A single tabular line row recovered from raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Row description, 3-40 characters.
    pub description: String,

    /// Quantity, defaulting to 1 when unparseable.
    pub quantity: Decimal,

    /// Unit price, defaulting to the row amount when unparseable.
    pub unit_price: Decimal,

    /// Row amount; only rows with an amount in (0, 1_000_000) are retained.
    pub amount: Decimal,
}

/// A persisted invoice submitted for reconciliation.
///
/// This is the draft plus the opaque `id` assigned by the caller's
/// persistence layer. Reconciliation requires a non-blank id on every
/// invoice in the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Opaque identifier owned by the caller.
    pub id: String,

    pub invoice_number: String,

    pub vendor_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default)]
    pub subtotal: Decimal,

    #[serde(default)]
    pub tax: Decimal,

    #[serde(default)]
    pub total_amount: Decimal,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
}

impl Invoice {
    /// Promote an extracted draft to a persisted invoice under `id`.
    pub fn from_draft(id: impl Into<String>, draft: InvoiceDraft) -> Self {
        Self {
            id: id.into(),
            invoice_number: draft.invoice_number,
            vendor_name: draft.vendor_name,
            invoice_date: draft.invoice_date,
            due_date: draft.due_date,
            subtotal: draft.subtotal,
            tax: draft.tax,
            total_amount: draft.total_amount,
            currency: draft.currency,
            line_items: draft.line_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_number_shape() {
        let number = InvoiceDraft::placeholder_number();
        assert!(number.starts_with("INV-"));
        assert!(number["INV-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_invoice_from_draft_carries_fields() {
        let draft = InvoiceDraft {
            invoice_number: "X1".to_string(),
            vendor_name: "Acme".to_string(),
            invoice_date: Some("01/02/2024".to_string()),
            due_date: None,
            subtotal: Decimal::new(9000, 2),
            tax: Decimal::new(1000, 2),
            total_amount: Decimal::new(10000, 2),
            currency: "USD".to_string(),
            line_items: Vec::new(),
            confidence: 75,
        };

        let invoice = Invoice::from_draft("a", draft);
        assert_eq!(invoice.id, "a");
        assert_eq!(invoice.invoice_number, "X1");
        assert_eq!(invoice.total_amount, Decimal::new(10000, 2));
    }

    #[test]
    fn test_invoice_deserializes_with_defaults() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"id":"a","invoice_number":"X1","vendor_name":"Acme"}"#,
        )
        .unwrap();
        assert_eq!(invoice.total_amount, Decimal::ZERO);
        assert_eq!(invoice.currency, "USD");
        assert!(invoice.line_items.is_empty());
    }
}
