//! Ordered extraction patterns for invoice header fields.
//!
//! Each field keeps a list of patterns, most specific first. Extraction is
//! first-match-wins: the first pattern whose first capture group is
//! non-empty decides the field.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number: labeled forms, then a bare "#XXXX" fallback.
    pub static ref INVOICE_NUMBER: Vec<Regex> = vec![
        Regex::new(r"(?i)invoice\s*(?:#|no\.?|number|num\.?)[:\s]*([A-Z0-9/-]+)").unwrap(),
        Regex::new(r"(?i)inv\s*[#:]?\s*([A-Z0-9/-]+)").unwrap(),
        Regex::new(r"(?i)bill\s*(?:#|no\.?)[:\s]*([A-Z0-9/-]+)").unwrap(),
        Regex::new(r"(?i)#\s*([A-Z0-9-]{4,20})").unwrap(),
    ];

    // Vendor: labeled "from"/"billed by" lines, then a leading company line
    // ending in a recognizable suffix.
    pub static ref VENDOR_NAME: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:from|bill\s*from|billed\s*by|company)[:\s]+([A-Za-z0-9\s&.,'-]+?)(?:\n|ltd|inc|llc|corp)").unwrap(),
        Regex::new(r"(?m)^([A-Z][A-Za-z0-9\s&.,'-]{2,40}(?:Ltd|Inc|LLC|Corp|Co\.|Services|Solutions|Group))").unwrap(),
    ];

    // Invoice date: labeled numeric, labeled long form, then any date-shaped
    // token anywhere in the text.
    pub static ref INVOICE_DATE: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:invoice\s*date|date\s*of\s*issue|issued?)[:\s]*(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})").unwrap(),
        Regex::new(r"(?i)(?:invoice\s*date|date)[:\s]*([A-Za-z]+\s+\d{1,2},?\s+\d{4})").unwrap(),
        Regex::new(r"(\d{1,2}[./\-]\d{1,2}[./\-]\d{4})").unwrap(),
        Regex::new(r"([A-Za-z]+ \d{1,2},? \d{4})").unwrap(),
    ];

    // Due date: labeled forms only; an unlabeled date is never a due date.
    pub static ref DUE_DATE: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:due\s*date|payment\s*due|pay\s*by)[:\s]*(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})").unwrap(),
        Regex::new(r"(?i)(?:due\s*date|payment\s*due|pay\s*by)[:\s]*([A-Za-z]+\s+\d{1,2},?\s+\d{4})").unwrap(),
    ];

    pub static ref TOTAL: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:total\s*(?:amount\s*)?due|grand\s*total|amount\s*due|total)[:\s]*\$?\s*([\d,]+\.?\d{0,2})").unwrap(),
        Regex::new(r"(?i)total[:\s]*(?:USD|EUR|GBP|INR)?\s*([\d,]+\.?\d{0,2})").unwrap(),
    ];

    pub static ref SUBTOTAL: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:subtotal|sub\s*total)[:\s]*\$?\s*([\d,]+\.?\d{0,2})").unwrap(),
        Regex::new(r"(?i)(?:net\s*amount|net)[:\s]*\$?\s*([\d,]+\.?\d{0,2})").unwrap(),
    ];

    pub static ref TAX: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:tax|vat|gst|hst)[:\s]*(?:\d+%\s*)?\$?\s*([\d,]+\.?\d{0,2})").unwrap(),
        Regex::new(r"(?i)(?:sales\s*tax|service\s*tax)[:\s]*\$?\s*([\d,]+\.?\d{0,2})").unwrap(),
    ];

    // Currency: ISO code first, symbol fallback.
    pub static ref CURRENCY: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(USD|EUR|GBP|INR|CAD|AUD|JPY|CNY|CHF|SGD)\b").unwrap(),
        Regex::new(r"(\$|€|£|₹|¥)").unwrap(),
    ];

    // One tabular row: description, >=2-space gap, quantity, optional "$"
    // prices, anchored to a physical line.
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"(?m)^(.{3,40}?)\s{2,}(\d+(?:\.\d+)?)\s{1,}\$?([\d,.]+)\s{1,}\$?([\d,.]+)\s*$"
    )
    .unwrap();
}

/// Map a currency symbol to its ISO code.
pub fn symbol_to_code(symbol: &str) -> Option<&'static str> {
    match symbol {
        "$" => Some("USD"),
        "€" => Some("EUR"),
        "£" => Some("GBP"),
        "₹" => Some("INR"),
        "¥" => Some("JPY"),
        _ => None,
    }
}

/// Try `patterns` in order against the full text; return the first
/// non-empty first capture group, trimmed.
pub fn extract_field(text: &str, patterns: &[Regex]) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(group) = caps.get(1) {
                let value = group.as_str().trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
