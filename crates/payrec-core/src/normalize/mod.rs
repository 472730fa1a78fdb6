//! Normalization of amounts and vendor names.
//!
//! Both sides of every comparison go through the same normalizers;
//! asymmetric normalization is a correctness bug.

pub mod amount;
pub mod vendor;

pub use amount::{normalize_amount, parse_amount};
pub use vendor::normalize_vendor;
