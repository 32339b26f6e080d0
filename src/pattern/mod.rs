//! Magic byte patterns.
//!
//! A [`Pattern`] describes a byte value expected at a fixed position or inside
//! a bounded window of the content. Patterns form trees: a pattern may own
//! child patterns that must all match as well, each at its own absolute offset.
//!
//! Evaluation is split in two layers:
//!
//! - [`matcher`] checks a single pattern, ignoring its children
//! - [`evaluator`] walks pattern lists (OR) and child lists (AND)
//!
//! # Examples
//!
//! ```rust
//! use std::io::Cursor;
//! use typesniff::pattern::{Pattern, evaluator};
//!
//! // RIFF container whose form type is WEBP
//! let webp = Pattern::fixed(0, &b"RIFF"[..])?
//!     .with_child(Pattern::fixed(8, &b"WEBP"[..])?);
//!
//! let mut cursor = Cursor::new(&b"RIFF\x24\x00\x00\x00WEBPVP8 "[..]);
//! assert!(evaluator::matches(&mut cursor, std::slice::from_ref(&webp)));
//! # Ok::<(), typesniff::Error>(())
//! ```

pub mod definition;
pub mod evaluator;
pub mod matcher;

use bytes::Bytes;

use crate::common::error::{Error, Result};

/// Where a pattern's value must occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Offset {
    /// The value starts exactly at this byte position.
    Fixed(u64),
    /// The value starts anywhere in `start..=end`.
    Range { start: u64, end: u64 },
}

impl Offset {
    /// First byte position the value may start at.
    #[inline]
    pub fn start(&self) -> u64 {
        match *self {
            Offset::Fixed(pos) => pos,
            Offset::Range { start, .. } => start,
        }
    }
}

/// A single magic byte pattern and the children it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    offset: Offset,
    value: Bytes,
    children: Vec<Pattern>,
}

impl Pattern {
    /// Create a pattern matching `value` at exactly `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if `value` is empty.
    pub fn fixed(pos: u64, value: impl Into<Bytes>) -> Result<Self> {
        Self::new(Offset::Fixed(pos), value.into())
    }

    /// Create a pattern matching `value` starting anywhere in `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if `value` is empty or `end < start`.
    pub fn range(start: u64, end: u64, value: impl Into<Bytes>) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidPattern(format!(
                "range end {end} precedes start {start}"
            )));
        }
        Self::new(Offset::Range { start, end }, value.into())
    }

    fn new(offset: Offset, value: Bytes) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::InvalidPattern(
                "pattern value must not be empty".to_string(),
            ));
        }
        Ok(Self {
            offset,
            value,
            children: Vec::new(),
        })
    }

    /// Infallible constructor for the built-in tables, whose values are
    /// known to be valid at compile time.
    pub(crate) const fn from_static(offset: Offset, value: &'static [u8]) -> Self {
        Self {
            offset,
            value: Bytes::from_static(value),
            children: Vec::new(),
        }
    }

    /// Append a child pattern that must also match.
    pub fn with_child(mut self, child: Pattern) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child patterns that must all match.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Pattern>) -> Self {
        self.children.extend(children);
        self
    }

    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    #[inline]
    pub fn children(&self) -> &[Pattern] {
        &self.children
    }
}
