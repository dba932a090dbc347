//! Utility modules shared across indices
//!
//! - Normalization: relative-to-max scaling and safe shares
//! - Tag parsing: literature cell splitting
//! - Frame helpers: column validation and typed column extraction

pub mod normalization;
pub mod tag_parser;
pub mod lazy_helpers;

// Re-export commonly used helpers
pub use normalization::{relative_to_max, share};
pub use tag_parser::{parse_literature, LiteratureTags};
pub use lazy_helpers::{binary_values, materialize_with_columns, require_columns, string_values};
