//! Payment-register reconciliation module.

mod engine;
pub mod fuzzy;

pub use engine::{amount_match, reconcile, AmountMatch};
pub use fuzzy::{Candidate, EditDistanceScorer, VendorIndex, VendorScorer};

use crate::error::ReconcileError;

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
