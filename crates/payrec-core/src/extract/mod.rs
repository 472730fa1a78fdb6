//! Invoice field extraction module.

mod line_items;
mod parser;
pub mod patterns;

pub use line_items::extract_line_items;
pub use parser::DraftExtractor;
