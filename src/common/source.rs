//! Random-access byte sources for pattern matching.
//!
//! A [`ByteSource`] wraps any `Read + Seek` value and records its total length
//! once, so pattern matching can reject out-of-range offsets without touching
//! the underlying reader.

use std::io::{self, Read, Seek, SeekFrom};

use smallvec::SmallVec;

/// Inline capacity for read windows. Most magic values are well under this.
const INLINE_WINDOW: usize = 64;

/// Bytes read from a [`ByteSource`] window.
pub type Window = SmallVec<[u8; INLINE_WINDOW]>;

/// A length-known, seekable view over a reader.
///
/// The cursor of the wrapped reader is moved by every read. Callers that care
/// about the position must save and restore it themselves (the detector does).
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use typesniff::common::source::ByteSource;
///
/// let mut cursor = Cursor::new(&b"GIF89a"[..]);
/// let mut source = ByteSource::new(&mut cursor)?;
/// assert_eq!(source.len(), 6);
///
/// let window = source.read_exactly(3, 3)?;
/// assert_eq!(&window[..], b"89a");
/// # Ok::<(), typesniff::Error>(())
/// ```
pub struct ByteSource<'a, R: Read + Seek + ?Sized> {
    reader: &'a mut R,
    len: u64,
}

impl<'a, R: Read + Seek + ?Sized> ByteSource<'a, R> {
    /// Wrap a reader, measuring its length by seeking to the end.
    ///
    /// The cursor is left at the start of the source.
    pub fn new(reader: &'a mut R) -> crate::Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        Ok(Self { reader, len })
    }

    /// Total number of bytes in the source.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the source holds no bytes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move the cursor to an absolute position.
    #[inline]
    pub fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(pos)).map(|_| ())
    }

    /// Read exactly `n` bytes starting at absolute position `pos`.
    ///
    /// Fails with `UnexpectedEof` when the source ends early.
    pub fn read_exactly(&mut self, pos: u64, n: usize) -> io::Result<Window> {
        let end = pos.checked_add(n as u64);
        if end.is_none_or(|end| end > self.len) {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read window extends past end of source",
            ));
        }

        self.seek_to(pos)?;
        let mut buffer = Window::from_elem(0, n);
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}
