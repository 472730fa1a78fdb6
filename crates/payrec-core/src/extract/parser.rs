//! Field extractor turning raw OCR text into a structured invoice draft.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::invoice::{InvoiceDraft, UNKNOWN_VENDOR};
use crate::normalize::amount::parse_amount;

use super::line_items::extract_line_items;
use super::patterns::{self, extract_field};

/// Number of anchor fields driving the confidence score.
const ANCHOR_FIELDS: usize = 4;

/// Extracts invoice drafts from raw OCR text.
///
/// Extraction is total: it never fails, and every absent or malformed field
/// degrades to a documented default. Patterns run most specific first and
/// the first non-empty capture wins; there is no best-match search.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftExtractor;

impl DraftExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a fully populated draft from `raw_text`.
    pub fn extract(&self, raw_text: &str) -> InvoiceDraft {
        let invoice_number = extract_field(raw_text, &patterns::INVOICE_NUMBER);
        let vendor_name = extract_field(raw_text, &patterns::VENDOR_NAME);
        let invoice_date = extract_field(raw_text, &patterns::INVOICE_DATE);
        let due_date = extract_field(raw_text, &patterns::DUE_DATE);

        let total = extract_field(raw_text, &patterns::TOTAL)
            .as_deref()
            .and_then(parse_amount);
        let subtotal = extract_field(raw_text, &patterns::SUBTOTAL)
            .as_deref()
            .and_then(parse_amount);
        let tax = extract_field(raw_text, &patterns::TAX)
            .as_deref()
            .and_then(parse_amount);

        let currency = match extract_field(raw_text, &patterns::CURRENCY) {
            Some(found) => patterns::symbol_to_code(&found)
                .map(str::to_string)
                .unwrap_or_else(|| found.to_uppercase()),
            None => "USD".to_string(),
        };

        let line_items = extract_line_items(raw_text);

        // Confidence is exactly the share of anchor fields that matched.
        let anchors = [
            invoice_number.is_some(),
            vendor_name.is_some(),
            invoice_date.is_some(),
            total.is_some(),
        ];
        let matched = anchors.iter().filter(|present| **present).count();
        let confidence = ((matched as f64 / ANCHOR_FIELDS as f64) * 100.0).round() as u8;

        // Fallback chains: subtotal derives from total - tax when both were
        // extracted, then degrades to the total; the total degrades to the
        // extracted subtotal. Precedence order is part of the contract.
        let derived_subtotal = match (total, tax) {
            (Some(total), Some(tax)) => Some(total - tax),
            _ => None,
        };
        let final_subtotal = subtotal
            .or(derived_subtotal)
            .or(total)
            .unwrap_or(Decimal::ZERO);
        let total_amount = total.or(subtotal).unwrap_or(Decimal::ZERO);

        let draft = InvoiceDraft {
            invoice_number: invoice_number.unwrap_or_else(InvoiceDraft::placeholder_number),
            vendor_name: vendor_name.unwrap_or_else(|| UNKNOWN_VENDOR.to_string()),
            invoice_date,
            due_date,
            subtotal: final_subtotal,
            tax: tax.unwrap_or(Decimal::ZERO),
            total_amount,
            currency,
            line_items,
            confidence,
        };

        debug!(
            "extracted draft {} ({} line items) at confidence {}",
            draft.invoice_number,
            draft.line_items.len(),
            draft.confidence
        );
        draft
    }
}
