//! Amount normalization for heterogeneous currency text.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount that may carry currency symbols, thousands separators,
/// or stray whitespace (e.g. `"$1,234.50"`). Returns `None` when no leading
/// numeric value can be recovered.
///
/// Trailing OCR noise after the number is ignored rather than rejected.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '₹' | '¥' | ',') && !c.is_whitespace())
        .collect();

    // Longest numeric prefix: sign, digits, at most one decimal point.
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }

    let prefix = &cleaned[..end];
    if !prefix.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(prefix).ok()
}

/// Normalize an optional amount string to a decimal, failing closed to zero.
pub fn normalize_amount(s: Option<&str>) -> Decimal {
    s.and_then(parse_amount).unwrap_or(Decimal::ZERO)
}
