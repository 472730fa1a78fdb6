//! Line-item extraction via column-spacing heuristics.
//!
//! This is not a table-layout parser: rows are recognized per physical line
//! by gaps of two or more spaces, and the amount bound deliberately trades
//! false negatives for fewer false positives.

use rust_decimal::Decimal;

use crate::models::invoice::LineItem;
use crate::normalize::amount::parse_amount;

use super::patterns::LINE_ITEM;

/// Scan raw text for tabular rows shaped like
/// `description  qty  unit_price  amount`, keeping only rows whose amount
/// lies in (0, 1_000_000).
pub fn extract_line_items(text: &str) -> Vec<LineItem> {
    let upper_bound = Decimal::new(1_000_000, 0);
    let mut items = Vec::new();

    for caps in LINE_ITEM.captures_iter(text) {
        let Some(amount) = parse_amount(&caps[4]) else {
            continue;
        };
        if amount <= Decimal::ZERO || amount >= upper_bound {
            continue;
        }

        items.push(LineItem {
            description: caps[1].trim().to_string(),
            quantity: caps[2].parse().unwrap_or(Decimal::ONE),
            unit_price: parse_amount(&caps[3]).unwrap_or(amount),
            amount,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_extracts_tabular_rows() {
        let text = "\
Description                Qty    Price    Amount
Consulting services        10     $150.00  $1,500.00
Laptop stand               2      $45.50   $91.00
";
        let items = extract_line_items(text);
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].description, "Consulting services");
        assert_eq!(items[0].quantity, dec("10"));
        assert_eq!(items[0].unit_price, dec("150.00"));
        assert_eq!(items[0].amount, dec("1500.00"));

        assert_eq!(items[1].description, "Laptop stand");
        assert_eq!(items[1].amount, dec("91.00"));
    }

    #[test]
    fn test_amount_bound_filters_rows() {
        let text = "\
Phone number row           1      555     5551234567
Zero amount row            1      0.00    0.00
Plausible row              1      20.00   20.00
";
        let items = extract_line_items(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Plausible row");
    }

    #[test]
    fn test_single_column_gap_is_not_a_row() {
        // One space between description and quantity: not a table row.
        let items = extract_line_items("Consulting 10 150.00 1500.00\n");
        assert!(items.is_empty());
    }

    #[test]
    fn test_no_rows_in_prose() {
        let text = "Thank you for your business.\nPlease remit payment within 30 days.\n";
        assert!(extract_line_items(text).is_empty());
    }
}
