//! Core library for OCR invoice reconciliation.
//!
//! This crate provides:
//! - Field extraction from raw OCR text into structured invoice drafts
//! - Line-item recovery via column-spacing heuristics
//! - Vendor and amount normalization
//! - Fuzzy vendor indexing and payment-register reconciliation with
//!   explainable match results
//!
//! The library is pure and synchronous: it performs no I/O and owns no
//! persistence. Callers supply in-memory inputs and receive in-memory
//! results; given the same input order, output is deterministic.

pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod recon;

pub use error::{PayrecError, ReconcileError, Result};
pub use extract::DraftExtractor;
pub use models::invoice::{Invoice, InvoiceDraft, LineItem};
pub use models::register::{
    MatchResult, MatchStatus, PaymentRecord, Reconciliation, ReconciliationSummary, Suggestion,
};
pub use normalize::{normalize_amount, normalize_vendor, parse_amount};
pub use recon::{amount_match, reconcile, AmountMatch};
