//! Approximate vendor-name search over payment records.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::register::PaymentRecord;
use crate::normalize::vendor::normalize_vendor;

/// Candidates scoring above this are not similar enough to return.
pub const RELEVANCE_THRESHOLD: f64 = 0.4;

/// Scores the distance between two normalized vendor names.
///
/// Contract: lower is better, bounded [0, 1]; 0.0 is a perfect match and
/// 1.0 is no similarity. The reconciliation engine depends only on this
/// contract, not on the backing algorithm.
pub trait VendorScorer {
    fn score(&self, query: &str, candidate: &str) -> f64;
}

/// Default scorer blending Jaro-Winkler with normalized Levenshtein
/// similarity. Jaro-Winkler favors shared prefixes, which suits vendor
/// names that mostly differ in their tails.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl VendorScorer for EditDistanceScorer {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        if query == candidate {
            return 0.0;
        }
        if query.is_empty() || candidate.is_empty() {
            return 1.0;
        }
        let similarity =
            jaro_winkler(query, candidate).max(normalized_levenshtein(query, candidate));
        (1.0 - similarity).clamp(0.0, 1.0)
    }
}

/// A payment record paired with its distance from the query.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub record: &'a PaymentRecord,
    pub score: f64,
}

/// Approximate-match index over normalized payment-record vendor names.
///
/// Built once per reconciliation run. Normalized keys are computed at build
/// time so both sides of every comparison go through the same normalizer.
pub struct VendorIndex<'a> {
    entries: Vec<(String, &'a PaymentRecord)>,
    scorer: Box<dyn VendorScorer>,
}

impl<'a> VendorIndex<'a> {
    /// Build an index with the default scorer.
    pub fn build(records: &'a [PaymentRecord]) -> Self {
        Self::with_scorer(records, Box::new(EditDistanceScorer))
    }

    pub fn with_scorer(records: &'a [PaymentRecord], scorer: Box<dyn VendorScorer>) -> Self {
        let entries = records
            .iter()
            .map(|record| (normalize_vendor(&record.vendor_name), record))
            .collect();
        Self { entries, scorer }
    }

    /// Return records whose normalized vendor name is within the relevance
    /// threshold of `query`, ascending by score. Ties keep register order,
    /// so results are deterministic for a fixed build order.
    pub fn search(&self, query: &str) -> Vec<Candidate<'a>> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate<'a>> = self
            .entries
            .iter()
            .map(|(name, record)| Candidate {
                record,
                score: self.scorer.score(query, name),
            })
            .filter(|candidate| candidate.score <= RELEVANCE_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates
    }
}
