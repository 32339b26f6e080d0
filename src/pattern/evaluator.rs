//! Recursive evaluation of pattern trees.
//!
//! Sibling patterns are alternatives (OR, first match wins). A pattern with
//! children additionally requires every child to match (AND). Child offsets
//! are absolute positions in the source, never relative to the parent.

use std::io::{Read, Seek};

use super::Pattern;
use super::matcher::matches_single;
use crate::common::source::ByteSource;

/// Return `true` as soon as one pattern in `patterns` matches.
///
/// Patterns are tried left to right.
pub fn match_any<R: Read + Seek + ?Sized>(
    source: &mut ByteSource<'_, R>,
    patterns: &[Pattern],
) -> bool {
    patterns.iter().any(|pattern| match_one(source, pattern))
}

/// Evaluate a pattern and, when it matches, all of its children.
pub fn match_one<R: Read + Seek + ?Sized>(
    source: &mut ByteSource<'_, R>,
    pattern: &Pattern,
) -> bool {
    if !rewind(source) || !matches_single(source, pattern) {
        return false;
    }

    // Each child is evaluated from the absolute start of the source
    pattern
        .children()
        .iter()
        .all(|child| rewind(source) && match_any(source, std::slice::from_ref(child)))
}

/// Evaluate `patterns` directly against a reader.
///
/// Convenience wrapper that builds a [`ByteSource`]. The reader's cursor is
/// not restored; use [`crate::Detector`] when that matters. A reader whose
/// length cannot be determined never matches.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use typesniff::pattern::{Pattern, evaluator};
///
/// let gif = [Pattern::fixed(0, &b"GIF87a"[..])?, Pattern::fixed(0, &b"GIF89a"[..])?];
/// assert!(evaluator::matches(&mut Cursor::new(&b"GIF89a\x01\x00"[..]), &gif));
/// assert!(!evaluator::matches(&mut Cursor::new(&b"GIF90a"[..]), &gif));
/// # Ok::<(), typesniff::Error>(())
/// ```
pub fn matches<R: Read + Seek + ?Sized>(reader: &mut R, patterns: &[Pattern]) -> bool {
    match ByteSource::new(reader) {
        Ok(mut source) => match_any(&mut source, patterns),
        Err(_) => false,
    }
}

#[inline]
fn rewind<R: Read + Seek + ?Sized>(source: &mut ByteSource<'_, R>) -> bool {
    source.seek_to(0).is_ok()
}
