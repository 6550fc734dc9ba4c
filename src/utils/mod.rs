//! Utility modules: JSON conversion.
pub mod json;
