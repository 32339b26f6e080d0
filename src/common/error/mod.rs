//! Unified error types for typesniff.
//!
//! Detection itself never fails: every "no match" outcome is an absence value.
//! These errors only surface at construction and configuration boundaries,
//! such as building a pattern or loading custom type definitions.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
