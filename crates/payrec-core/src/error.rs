//! Error types for the payrec-core library.
//!
//! Extraction has no error channel at all: noisy OCR input degrades to
//! documented defaults instead of failing. Errors here cover contract
//! violations on the reconciliation entry point only.

use thiserror::Error;

/// Main error type for the payrec library.
#[derive(Error, Debug)]
pub enum PayrecError {
    /// Reconciliation contract violation.
    #[error("reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// Errors raised when reconciliation inputs violate the caller contract.
///
/// These reject the batch before any matching happens; run-time data issues
/// (unparseable amounts, unknown vendors) never surface here.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The invoice batch was empty.
    #[error("invoice batch is empty")]
    EmptyBatch,

    /// An invoice arrived without a usable id.
    #[error("invoice at position {0} has a blank id")]
    BlankInvoiceId(usize),
}

/// Result type for the payrec library.
pub type Result<T> = std::result::Result<T, PayrecError>;
