//! Utility functions shared across crates

pub mod validation;

pub use validation::{is_valid_email, mask_email};
