//! Declarative type definitions.
//!
//! A [`Definition`] is the serializable form of one registry extension: a
//! label plus optional extension, parent and pattern facets. Hosts usually
//! load a list of them from configuration at startup and apply them with
//! [`TypeRegistry::extend_with`](crate::TypeRegistry::extend_with).
//!
//! Pattern values are given either as `hex` (whitespace between byte pairs
//! is ignored) or as literal `text`. A pattern has either a fixed `offset` or
//! an inclusive `range` of start positions, defaulting to offset 0.
//!
//! ```yaml
//! - label: application/x-acme-archive
//!   extensions: [acme]
//!   parents: [application/zip]
//!   patterns:
//!     - hex: "50 4B 03 04"
//!       children:
//!         - text: "acme-manifest"
//!           range: [30, 512]
//! ```

use serde::Deserialize;

use super::Pattern;
use crate::common::error::{Error, Result};

/// One custom type to add to a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Definition {
    /// Type label, e.g. `application/x-acme-archive`
    pub label: String,
    /// Replacement extension set, if any
    pub extensions: Option<Vec<String>>,
    /// Replacement parent set, if any
    pub parents: Option<Vec<String>>,
    /// Alternative patterns, if any
    pub patterns: Option<Vec<PatternDefinition>>,
}

/// Serializable form of a [`Pattern`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternDefinition {
    pub offset: Option<u64>,
    pub range: Option<(u64, u64)>,
    pub hex: Option<String>,
    pub text: Option<String>,
    pub children: Vec<PatternDefinition>,
}

impl Definition {
    /// Create a definition with only a label set.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_extensions<S: Into<String>>(
        mut self,
        extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_parents<S: Into<String>>(mut self, parents: impl IntoIterator<Item = S>) -> Self {
        self.parents = Some(parents.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_pattern(mut self, pattern: PatternDefinition) -> Self {
        self.patterns.get_or_insert_with(Vec::new).push(pattern);
        self
    }

    /// Validate the definition and build its patterns.
    ///
    /// Returns `Ok(None)` when the definition has no pattern facet.
    pub fn compile_patterns(&self) -> Result<Option<Vec<Pattern>>> {
        if self.label.trim().is_empty() {
            return Err(self.invalid("label must not be empty"));
        }

        match &self.patterns {
            None => Ok(None),
            Some(defs) => defs
                .iter()
                .map(|def| def.compile(&self.label))
                .collect::<Result<Vec<_>>>()
                .map(Some),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidDefinition {
            label: self.label.clone(),
            reason: reason.into(),
        }
    }
}

impl PatternDefinition {
    /// A pattern matching hex-encoded bytes at a fixed offset.
    pub fn hex(offset: u64, hex: impl Into<String>) -> Self {
        Self {
            offset: Some(offset),
            hex: Some(hex.into()),
            ..Self::default()
        }
    }

    /// A pattern matching literal text anywhere in `start..=end`.
    pub fn text_in_range(start: u64, end: u64, text: impl Into<String>) -> Self {
        Self {
            range: Some((start, end)),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_child(mut self, child: PatternDefinition) -> Self {
        self.children.push(child);
        self
    }

    fn compile(&self, label: &str) -> Result<Pattern> {
        let invalid = |reason: String| Error::InvalidDefinition {
            label: label.to_string(),
            reason,
        };

        let value = match (&self.hex, &self.text) {
            (Some(hex), None) => {
                decode_hex(hex).ok_or_else(|| invalid(format!("malformed hex value '{hex}'")))?
            },
            (None, Some(text)) => text.as_bytes().to_vec(),
            (Some(_), Some(_)) => {
                return Err(invalid("pattern has both hex and text values".to_string()));
            },
            (None, None) => return Err(invalid("pattern has no value".to_string())),
        };

        let pattern = match (self.offset, self.range) {
            (Some(_), Some(_)) => {
                return Err(invalid("pattern has both offset and range".to_string()));
            },
            (None, Some((start, end))) => Pattern::range(start, end, value)?,
            (offset, None) => Pattern::fixed(offset.unwrap_or(0), value)?,
        };

        let children = self
            .children
            .iter()
            .map(|child| child.compile(label))
            .collect::<Result<Vec<_>>>()?;

        Ok(pattern.with_children(children))
    }
}

/// Decode hex digits, ignoring ASCII whitespace between byte pairs.
fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = hex.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return None;
    }

    digits
        .chunks_exact(2)
        .map(|pair| Some((hex_digit(pair[0])? << 4) | hex_digit(pair[1])?))
        .collect()
}

#[inline]
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
