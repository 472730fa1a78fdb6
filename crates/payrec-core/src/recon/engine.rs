//! Reconciliation orchestrator: duplicate detection, fuzzy candidate
//! ranking, and greedy one-to-one record assignment.
//!
//! Processing order is the input invoice order, and it is significant: it
//! decides which invoice in a duplicate pair is flagged, who claims an
//! ambiguous record first, and how ties break. A claimed record stays
//! claimed for the rest of the run even when the claim was a mismatch;
//! assignment is greedy, not globally optimal.

use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::ReconcileError;
use crate::models::invoice::Invoice;
use crate::models::register::{
    MatchResult, MatchStatus, PaymentRecord, Reconciliation, ReconciliationSummary, Suggestion,
};
use crate::normalize::vendor::normalize_vendor;

use super::fuzzy::VendorIndex;
use super::Result;

/// Relative tolerance for treating two amounts as equal (1%).
const AMOUNT_TOLERANCE: f64 = 0.01;
/// Vendor distance below which a candidate counts as a firm vendor match.
const VENDOR_MATCH_THRESHOLD: f64 = 0.3;
/// Candidates scored per invoice.
const MAX_CANDIDATES: usize = 10;
/// Alternatives reported on non-matched results.
const MAX_SUGGESTIONS: usize = 3;
/// Confidence floor for matched results.
const MATCHED_CONFIDENCE_FLOOR: u8 = 70;

/// Outcome of comparing an invoice amount against a record amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountMatch {
    /// Whether the relative difference is within tolerance.
    pub matches: bool,
    /// Absolute difference, reported regardless of outcome.
    pub discrepancy: Decimal,
    /// Relative difference as a rounded whole percent; `None` when the
    /// larger amount is zero.
    pub percent_diff: Option<u32>,
}

/// Compare two amounts under the 1% relative-tolerance rule.
pub fn amount_match(invoice_amount: Decimal, record_amount: Decimal) -> AmountMatch {
    let diff = (invoice_amount - record_amount).abs();
    let bigger = invoice_amount.max(record_amount);

    if bigger.is_zero() {
        return AmountMatch {
            matches: true,
            discrepancy: Decimal::ZERO,
            percent_diff: None,
        };
    }

    let fraction = (diff / bigger).to_f64().unwrap_or(1.0);
    AmountMatch {
        matches: fraction <= AMOUNT_TOLERANCE,
        discrepancy: diff,
        percent_diff: Some((fraction * 100.0).round() as u32),
    }
}

/// Match a batch of invoices against a payment register.
///
/// Returns one result per invoice in input order, a summary projection, and
/// the register records no invoice claimed. The inputs are never mutated;
/// all run state is local, so concurrent runs over separate batches need no
/// coordination.
pub fn reconcile(
    invoices: &[Invoice],
    payment_records: &[PaymentRecord],
) -> Result<Reconciliation> {
    if invoices.is_empty() {
        return Err(ReconcileError::EmptyBatch);
    }
    if let Some(position) = invoices.iter().position(|invoice| invoice.id.trim().is_empty()) {
        return Err(ReconcileError::BlankInvoiceId(position));
    }

    info!(
        "reconciling {} invoices against {} register records",
        invoices.len(),
        payment_records.len()
    );

    // Duplicate pre-pass: first occurrence of a number keeps it, every
    // later occurrence of the same non-empty key is flagged.
    let mut seen_numbers: HashSet<String> = HashSet::new();
    let mut duplicate_ids: HashSet<&str> = HashSet::new();
    for invoice in invoices {
        let key = invoice.invoice_number.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        if !seen_numbers.insert(key) {
            duplicate_ids.insert(invoice.id.as_str());
        }
    }

    let index = VendorIndex::build(payment_records);
    let mut used_record_ids: HashSet<&str> = HashSet::new();
    let mut results = Vec::with_capacity(invoices.len());

    for invoice in invoices {
        if duplicate_ids.contains(invoice.id.as_str()) {
            debug!("invoice {} duplicates number {}", invoice.id, invoice.invoice_number);
            results.push(MatchResult {
                invoice_id: invoice.id.clone(),
                record_id: None,
                match_status: MatchStatus::Duplicate,
                discrepancy: Decimal::ZERO,
                flag_reason: Some(format!(
                    "Duplicate invoice number: {}",
                    invoice.invoice_number
                )),
                confidence_score: 100,
                suggestions: Vec::new(),
            });
            continue;
        }

        results.push(match_invoice(
            invoice,
            payment_records,
            &index,
            &mut used_record_ids,
        ));
    }

    let missing_records: Vec<PaymentRecord> = payment_records
        .iter()
        .filter(|record| !used_record_ids.contains(record.id.as_str()))
        .cloned()
        .collect();

    let summary = summarize(invoices, payment_records, &results, missing_records.len());

    Ok(Reconciliation {
        results,
        summary,
        missing_records,
    })
}

/// One scored candidate for a single invoice.
struct ScoredCandidate<'a> {
    record: &'a PaymentRecord,
    amount: AmountMatch,
    vendor_score: f64,
    combined: f64,
    confidence: u8,
}

fn match_invoice<'a>(
    invoice: &Invoice,
    payment_records: &'a [PaymentRecord],
    index: &VendorIndex<'a>,
    used_record_ids: &mut HashSet<&'a str>,
) -> MatchResult {
    let query = normalize_vendor(&invoice.vendor_name);
    let invoice_amount = invoice.total_amount;
    let candidates = index.search(&query);

    if candidates.is_empty() {
        // No vendor is close enough; offer unused records whose amounts
        // line up as a manual-review starting point.
        let suggestions: Vec<Suggestion> = payment_records
            .iter()
            .filter(|record| !used_record_ids.contains(record.id.as_str()))
            .filter(|record| amount_match(invoice_amount, record.expected_amount).matches)
            .take(MAX_SUGGESTIONS)
            .map(|record| Suggestion {
                record: record.clone(),
                reason: "Matching amount".to_string(),
                confidence: 50,
            })
            .collect();

        return MatchResult {
            invoice_id: invoice.id.clone(),
            record_id: None,
            match_status: MatchStatus::Missing,
            discrepancy: invoice_amount,
            flag_reason: Some(format!(
                "No matching vendor found in payment register for: {}",
                invoice.vendor_name
            )),
            confidence_score: 0,
            suggestions,
        };
    }

    // Score the top candidates on the 0.6 vendor / 0.4 amount blend. Used
    // records still get scored for suggestions but cannot become the best
    // match. Strict comparison keeps the first of tied candidates.
    let mut scored: Vec<ScoredCandidate<'a>> = Vec::new();
    let mut best: Option<usize> = None;

    for candidate in candidates.iter().take(MAX_CANDIDATES) {
        let amount = amount_match(invoice_amount, candidate.record.expected_amount);
        let amount_score = amount
            .percent_diff
            .map(|percent| f64::from(percent) / 100.0)
            .unwrap_or(0.0);
        let combined = candidate.score * 0.6 + amount_score * 0.4;
        let confidence = confidence_from(combined);

        let is_unused = !used_record_ids.contains(candidate.record.id.as_str());
        let position = scored.len();
        scored.push(ScoredCandidate {
            record: candidate.record,
            amount,
            vendor_score: candidate.score,
            combined,
            confidence,
        });

        if is_unused {
            let replace = match best {
                Some(current) => combined < scored[current].combined,
                None => true,
            };
            if replace {
                best = Some(position);
            }
        }
    }

    let Some(best_position) = best else {
        let suggestions: Vec<Suggestion> = scored
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|candidate| Suggestion {
                record: candidate.record.clone(),
                reason: format!(
                    "Fuzzy vendor match ({}%) - Already linked to another invoice",
                    candidate.confidence
                ),
                confidence: candidate.confidence,
            })
            .collect();

        return MatchResult {
            invoice_id: invoice.id.clone(),
            record_id: None,
            match_status: MatchStatus::Missing,
            discrepancy: invoice_amount,
            flag_reason: Some(format!(
                "All potential matching records already used. Vendor: {}",
                invoice.vendor_name
            )),
            confidence_score: 0,
            suggestions,
        };
    };

    // Greedy claim: the record leaves the pool whether or not the outcome
    // is clean.
    let chosen = &scored[best_position];
    used_record_ids.insert(chosen.record.id.as_str());

    if chosen.amount.matches && chosen.vendor_score < VENDOR_MATCH_THRESHOLD {
        debug!(
            "invoice {} matched record {} (confidence {})",
            invoice.id, chosen.record.id, chosen.confidence
        );
        return MatchResult {
            invoice_id: invoice.id.clone(),
            record_id: Some(chosen.record.id.clone()),
            match_status: MatchStatus::Matched,
            discrepancy: chosen.amount.discrepancy,
            flag_reason: None,
            confidence_score: chosen.confidence.max(MATCHED_CONFIDENCE_FLOOR),
            suggestions: Vec::new(),
        };
    }

    let mut reasons = Vec::new();
    if !chosen.amount.matches {
        reasons.push(format!(
            "Amount mismatch: Invoice ${:.2} vs Expected ${:.2} ({}% difference)",
            invoice_amount,
            chosen.record.expected_amount,
            chosen.amount.percent_diff.unwrap_or(0)
        ));
    }
    if chosen.vendor_score >= VENDOR_MATCH_THRESHOLD {
        reasons.push(format!(
            "Vendor name fuzzy match confidence: {}%",
            confidence_from(chosen.vendor_score)
        ));
    }

    let suggestions: Vec<Suggestion> = scored
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != best_position)
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| Suggestion {
            record: candidate.record.clone(),
            reason: format!(
                "Alternative fuzzy match ({}% confidence)",
                candidate.confidence
            ),
            confidence: candidate.confidence,
        })
        .collect();

    MatchResult {
        invoice_id: invoice.id.clone(),
        record_id: Some(chosen.record.id.clone()),
        match_status: MatchStatus::Mismatch,
        discrepancy: chosen.amount.discrepancy,
        flag_reason: Some(reasons.join("; ")),
        confidence_score: chosen.confidence,
        suggestions,
    }
}

fn confidence_from(score: f64) -> u8 {
    ((1.0 - score) * 100.0).round().clamp(0.0, 100.0) as u8
}

fn summarize(
    invoices: &[Invoice],
    payment_records: &[PaymentRecord],
    results: &[MatchResult],
    missing_record_count: usize,
) -> ReconciliationSummary {
    let count = |status: MatchStatus| {
        results
            .iter()
            .filter(|result| result.match_status == status)
            .count()
    };

    ReconciliationSummary {
        total_invoices: invoices.len(),
        matched: count(MatchStatus::Matched),
        mismatched: count(MatchStatus::Mismatch),
        missing_invoices: count(MatchStatus::Missing),
        duplicate: count(MatchStatus::Duplicate),
        missing_records: missing_record_count,
        total_amount_invoiced: invoices.iter().map(|invoice| invoice.total_amount).sum(),
        total_amount_expected: payment_records
            .iter()
            .map(|record| record.expected_amount)
            .sum(),
    }
}
