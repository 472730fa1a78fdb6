//! Payment-register records and reconciliation results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_status() -> String {
    "unpaid".to_string()
}

/// One entry of the externally supplied payment register.
///
/// The engine never mutates a record; within one reconciliation run it only
/// marks a record's id as claimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Caller-assigned identifier.
    #[serde(default)]
    pub id: String,

    pub vendor_name: String,

    #[serde(default)]
    pub expected_amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    #[serde(default = "default_status")]
    pub status: String,
}

/// Outcome category of matching one invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Amounts agree within tolerance and the vendor match is firm.
    Matched,
    /// A record was claimed but amounts or vendor similarity disagree.
    Mismatch,
    /// No usable record was found in the register.
    Missing,
    /// The invoice repeats an invoice number seen earlier in the batch.
    Duplicate,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::Mismatch => "mismatch",
            MatchStatus::Missing => "missing",
            MatchStatus::Duplicate => "duplicate",
        }
    }
}

/// An alternative record offered alongside a non-matched result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub record: PaymentRecord,

    /// Human-readable explanation of why this record is plausible.
    pub reason: String,

    /// Confidence 0-100 for this alternative.
    pub confidence: u8,
}

/// The reconciliation verdict for a single invoice.
///
/// Created exactly once per invoice per run and never mutated afterwards;
/// a later manual override by the caller is a new, externally issued result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub invoice_id: String,

    /// Claimed register record, when one was assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    pub match_status: MatchStatus,

    /// Absolute amount difference, never negative.
    pub discrepancy: Decimal,

    /// Explanation for non-clean outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_reason: Option<String>,

    /// Confidence 0-100; matched results are floored at 70.
    pub confidence_score: u8,

    /// Up to 3 ranked alternatives, present only on non-matched results.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

/// Aggregate counts and totals over one run's results.
///
/// A pure projection of the result list; the amount totals sum over the
/// whole batch and register independently, for audit purposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub total_invoices: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub missing_invoices: usize,
    pub duplicate: usize,
    pub missing_records: usize,
    pub total_amount_invoiced: Decimal,
    pub total_amount_expected: Decimal,
}

/// Complete output of one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    /// One result per input invoice, in input order.
    pub results: Vec<MatchResult>,

    pub summary: ReconciliationSummary,

    /// Register records never claimed by any invoice.
    pub missing_records: Vec<PaymentRecord>,
}
