//! Data models shared by extraction and reconciliation.

pub mod invoice;
pub mod register;
