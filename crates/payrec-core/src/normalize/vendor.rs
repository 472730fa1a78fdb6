//! Vendor name canonicalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Whole-word legal-entity suffixes, with an optional trailing dot.
    static ref LEGAL_SUFFIX: Regex = Regex::new(
        r"\b(ltd|limited|inc|incorporated|llc|corp|corporation|co|company|pvt|private)\b\.?"
    )
    .unwrap();
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Canonicalize a vendor name for comparison: case-fold, drop legal-entity
/// tokens as whole words, strip punctuation, collapse whitespace.
///
/// Idempotent, and total over empty input.
pub fn normalize_vendor(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = LEGAL_SUFFIX.replace_all(&lowered, "");
    let alnum = NON_ALNUM.replace_all(&stripped, "");
    WHITESPACE.replace_all(alnum.trim(), " ").to_string()
}
