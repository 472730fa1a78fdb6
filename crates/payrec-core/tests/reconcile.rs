//! End-to-end flow: raw OCR text through extraction, promotion, and
//! reconciliation against a payment register.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

use payrec_core::{
    reconcile, DraftExtractor, Invoice, MatchStatus, PaymentRecord, ReconcileError,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn record(id: &str, vendor: &str, expected: &str) -> PaymentRecord {
    PaymentRecord {
        id: id.to_string(),
        vendor_name: vendor.to_string(),
        expected_amount: dec(expected),
        due_date: None,
        reference_number: None,
        status: "unpaid".to_string(),
    }
}

const CLEAN_INVOICE: &str = "\
Acme Business Services
123 Commerce Street

Invoice #: INV-2024-0042
Invoice Date: 03/15/2024
Due Date: 04/14/2024

Consulting retainer        1      $2,000.00  $2,000.00
Travel expenses            1      $150.25    $150.25

Tax: $172.02
Total Due: $2,322.27
";

const SHORT_INVOICE: &str = "\
Billed by: Globex Industrial
Invoice No: GLX-77
Date: 2024-06-01
Total: $540.00
";

#[test]
fn test_extract_then_reconcile_clean_batch() {
    let extractor = DraftExtractor::new();
    let invoices = vec![
        Invoice::from_draft("inv-1", extractor.extract(CLEAN_INVOICE)),
        Invoice::from_draft("inv-2", extractor.extract(SHORT_INVOICE)),
    ];
    let register = vec![
        record("reg-1", "Acme Business Services Ltd", "2322.27"),
        record("reg-2", "GLOBEX INDUSTRIAL", "540.00"),
    ];

    let outcome = reconcile(&invoices, &register).unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].match_status, MatchStatus::Matched);
    assert_eq!(outcome.results[0].record_id.as_deref(), Some("reg-1"));
    assert_eq!(outcome.results[1].match_status, MatchStatus::Matched);
    assert_eq!(outcome.results[1].record_id.as_deref(), Some("reg-2"));

    assert_eq!(outcome.summary.matched, 2);
    assert_eq!(outcome.summary.missing_records, 0);
    assert!(outcome.missing_records.is_empty());
    assert_eq!(outcome.summary.total_amount_invoiced, dec("2862.27"));
    assert_eq!(outcome.summary.total_amount_expected, dec("2862.27"));
}

#[test]
fn test_mixed_batch_summary_is_consistent() {
    let extractor = DraftExtractor::new();
    let globex = extractor.extract(SHORT_INVOICE);

    let invoices = vec![
        // Two copies of the same document: the second is a duplicate.
        Invoice::from_draft("inv-1", extractor.extract(CLEAN_INVOICE)),
        Invoice::from_draft("inv-2", extractor.extract(CLEAN_INVOICE)),
        Invoice::from_draft("inv-3", globex),
    ];
    let register = vec![
        // Amount off by far more than 1%.
        record("reg-1", "Acme Business Services Ltd", "1000.00"),
        record("reg-2", "Initech Systems", "75.00"),
    ];

    let outcome = reconcile(&invoices, &register).unwrap();

    assert_eq!(outcome.results[0].match_status, MatchStatus::Mismatch);
    assert_eq!(outcome.results[1].match_status, MatchStatus::Duplicate);
    assert_eq!(outcome.results[2].match_status, MatchStatus::Missing);

    let summary = &outcome.summary;
    assert_eq!(summary.total_invoices, 3);
    assert_eq!(summary.matched, 0);
    assert_eq!(summary.mismatched, 1);
    assert_eq!(summary.duplicate, 1);
    assert_eq!(summary.missing_invoices, 1);
    assert_eq!(
        summary.matched + summary.mismatched + summary.duplicate + summary.missing_invoices,
        summary.total_invoices
    );

    // reg-1 was claimed by the mismatch; reg-2 was never touched.
    assert_eq!(outcome.missing_records.len(), 1);
    assert_eq!(outcome.missing_records[0].id, "reg-2");
}

#[test]
fn test_mismatch_result_carries_explanation() {
    let invoices = vec![Invoice::from_draft(
        "inv-1",
        DraftExtractor::new().extract(SHORT_INVOICE),
    )];
    let register = vec![record("reg-1", "Globex Industrial", "270.00")];

    let outcome = reconcile(&invoices, &register).unwrap();
    let result = &outcome.results[0];

    assert_eq!(result.match_status, MatchStatus::Mismatch);
    assert_eq!(result.discrepancy, dec("270.00"));
    let reason = result.flag_reason.as_deref().unwrap();
    assert!(reason.contains("Amount mismatch"), "reason: {reason}");
    assert!(reason.contains("540.00"), "reason: {reason}");
    assert!(reason.contains("270.00"), "reason: {reason}");
}

#[test]
fn test_unreadable_document_still_reconciles() {
    // Extraction never fails; a garbage page produces a zero-amount draft
    // with an unknown vendor, which reconciles as missing.
    let draft = DraftExtractor::new().extract("~~ smudged page ~~");
    assert_eq!(draft.confidence, 0);

    let invoices = vec![Invoice::from_draft("inv-1", draft)];
    let register = vec![record("reg-1", "Acme Corp", "100.00")];

    let outcome = reconcile(&invoices, &register).unwrap();
    assert_eq!(outcome.results[0].match_status, MatchStatus::Missing);
    assert_eq!(outcome.results[0].confidence_score, 0);
}

#[test]
fn test_contract_violations_are_rejected() {
    let register = vec![record("reg-1", "Acme Corp", "100.00")];
    assert!(matches!(
        reconcile(&[], &register),
        Err(ReconcileError::EmptyBatch)
    ));

    let mut invoice = Invoice::from_draft("ok", DraftExtractor::new().extract(SHORT_INVOICE));
    invoice.id = "   ".to_string();
    assert!(matches!(
        reconcile(&[invoice], &register),
        Err(ReconcileError::BlankInvoiceId(0))
    ));
}

#[test]
fn test_reconcile_with_empty_register() {
    let invoices = vec![Invoice::from_draft(
        "inv-1",
        DraftExtractor::new().extract(SHORT_INVOICE),
    )];

    let outcome = reconcile(&invoices, &[]).unwrap();
    assert_eq!(outcome.results[0].match_status, MatchStatus::Missing);
    assert!(outcome.results[0].suggestions.is_empty());
    assert_eq!(outcome.summary.total_amount_expected, Decimal::ZERO);
}
