//! Single-pattern byte matching.
//!
//! These functions look only at the pattern's own offset and value. Child
//! patterns are the evaluator's concern. Every failure mode (short content,
//! I/O error, offsets past the end) is reported as a plain non-match.

use std::io::{Read, Seek};

use memchr::memmem;

use super::{Offset, Pattern};
use crate::common::source::ByteSource;

/// Check whether `pattern` itself matches the source, ignoring children.
///
/// The source cursor may be left at any position.
#[inline]
pub fn matches_single<R: Read + Seek + ?Sized>(
    source: &mut ByteSource<'_, R>,
    pattern: &Pattern,
) -> bool {
    match pattern.offset() {
        Offset::Fixed(pos) => matches_fixed(source, pos, pattern.value()),
        Offset::Range { start, end } => matches_range(source, start, end, pattern.value()),
    }
}

/// Exact comparison of `value` against the bytes at `pos`.
pub fn matches_fixed<R: Read + Seek + ?Sized>(
    source: &mut ByteSource<'_, R>,
    pos: u64,
    value: &[u8],
) -> bool {
    if value.is_empty() {
        return false;
    }

    let needed = match pos.checked_add(value.len() as u64) {
        Some(needed) => needed,
        None => return false,
    };
    if source.len() < needed {
        return false;
    }

    match source.read_exactly(pos, value.len()) {
        Ok(window) => window.as_slice() == value,
        Err(_) => false,
    }
}

/// Substring search for `value` starting anywhere in `start..=end`.
///
/// The window read is `end - start + len(value)` bytes, clamped to the bytes
/// remaining after `start`.
pub fn matches_range<R: Read + Seek + ?Sized>(
    source: &mut ByteSource<'_, R>,
    start: u64,
    end: u64,
    value: &[u8],
) -> bool {
    if value.is_empty() || end < start || start >= source.len() {
        return false;
    }

    let wanted = (end - start).saturating_add(value.len() as u64);
    let available = source.len() - start;
    let window_len = wanted.min(available);
    if window_len < value.len() as u64 {
        return false;
    }

    let window_len = match usize::try_from(window_len) {
        Ok(len) => len,
        Err(_) => return false,
    };

    match source.read_exactly(start, window_len) {
        Ok(window) => memmem::find(&window, value).is_some(),
        Err(_) => false,
    }
}
