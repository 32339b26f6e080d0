//! Common types shared across the crate.

pub mod error;
pub mod source;

pub use error::{Error, Result};
pub use source::ByteSource;
