//! Content type detection.
//!
//! The [`Detector`] combines three independent signals:
//!
//! - **content**: magic patterns matched against the bytes
//! - **declared type**: a header-style value supplied by the caller
//! - **extension**: the suffix of a file name or path
//!
//! Each signal can be queried on its own. [`Detector::detect`] collects all
//! three, in that order, and keeps the most specific label according to the
//! registry's type hierarchy.
//!
//! Detection never fails. Unreadable content, unknown extensions and malformed
//! declared types all simply contribute no candidate.

mod options;

pub use options::DetectOptions;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::trace;

use crate::common::source::ByteSource;
use crate::declared;
use crate::pattern::evaluator::match_any;
use crate::registry::TypeRegistry;
use crate::resolver::TypeResolver;

/// Detection entry points over a borrowed [`TypeRegistry`].
///
/// A detector is cheap to create and holds no state besides its options, so
/// one registry can back any number of detectors on any number of threads.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use typesniff::{Detector, TypeRegistry};
///
/// let registry = TypeRegistry::new();
/// let detector = Detector::new(&registry);
///
/// assert_eq!(detector.detect_bytes(b"\x89PNG\r\n\x1a\n"), Some("image/png"));
/// assert_eq!(detector.detect_path("photos/IMG_0001.JPG"), Some("image/jpeg"));
///
/// // ZIP content, narrowed by the declared type
/// let mut epub = Cursor::new(b"PK\x03\x04 not really an archive".to_vec());
/// let label = detector.detect(&mut epub, Some("application/epub+zip"), Some("book.zip"));
/// assert_eq!(label.as_deref(), Some("application/epub+zip"));
/// ```
#[derive(Debug, Clone)]
pub struct Detector<'r> {
    registry: &'r TypeRegistry,
    options: DetectOptions,
}

impl<'r> Detector<'r> {
    /// Create a detector with default options.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_options(registry, DetectOptions::default())
    }

    pub fn with_options(registry: &'r TypeRegistry, options: DetectOptions) -> Self {
        Self { registry, options }
    }

    #[inline]
    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    #[inline]
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    #[inline]
    pub fn resolver(&self) -> TypeResolver<'r> {
        TypeResolver::new(self.registry)
    }

    /// First label, in registry priority order, whose patterns match.
    ///
    /// The reader's cursor is restored before returning.
    pub fn detect_content<R: Read + Seek + ?Sized>(&self, reader: &mut R) -> Option<&'r str> {
        let label = with_source(reader, |source| {
            self.registry
                .labels_in_priority_order()
                .find(|(_, patterns)| match_any(source, patterns))
                .map(|(label, _)| label)
        });
        trace!(?label, "content detection");
        label
    }

    /// Every label whose patterns match, in registry priority order.
    ///
    /// The reader's cursor is restored before returning.
    pub fn detect_content_all<R: Read + Seek + ?Sized>(&self, reader: &mut R) -> Vec<&'r str> {
        let labels = with_source(reader, |source| {
            self.registry
                .labels_in_priority_order()
                .filter(|(_, patterns)| match_any(source, patterns))
                .map(|(label, _)| label)
                .collect::<Vec<_>>()
        });
        trace!(count = labels.len(), "content detection (all matches)");
        labels
    }

    /// [`detect_content`](Self::detect_content) over an in-memory buffer.
    pub fn detect_bytes(&self, bytes: &[u8]) -> Option<&'r str> {
        self.detect_content(&mut std::io::Cursor::new(bytes))
    }

    /// [`detect_content_all`](Self::detect_content_all) over an in-memory buffer.
    pub fn detect_bytes_all(&self, bytes: &[u8]) -> Vec<&'r str> {
        self.detect_content_all(&mut std::io::Cursor::new(bytes))
    }

    /// Label registered for an extension, with or without its leading dot.
    #[inline]
    pub fn detect_extension(&self, ext: &str) -> Option<&'r str> {
        self.registry.lookup_by_extension(ext)
    }

    /// Label for the extension of a path or file name.
    ///
    /// See [`extension_of`] for how the extension is found.
    pub fn detect_path(&self, path: &str) -> Option<&'r str> {
        extension_of(path).and_then(|ext| self.detect_extension(ext))
    }

    /// Combine content, declared type and file name into one label.
    ///
    /// Candidates are gathered in precedence order (content, declared,
    /// extension), each subject to [`DetectOptions`], and reduced with
    /// [`TypeResolver::most_specific`]. A declared type that does not parse
    /// is ignored, as is a declared `application/octet-stream` unless
    /// [`DetectOptions::ignore_unspecified`] is off.
    ///
    /// The reader's cursor is restored before returning.
    pub fn detect<R: Read + Seek + ?Sized>(
        &self,
        reader: &mut R,
        declared: Option<&str>,
        name: Option<&str>,
    ) -> Option<String> {
        let content = if self.options.use_content {
            self.detect_content(reader)
        } else {
            None
        };

        let declared = declared
            .filter(|_| self.options.use_declared)
            .and_then(declared::parse_declared)
            .filter(|label| !(self.options.ignore_unspecified && declared::is_unspecified(label)));

        let extension = name
            .filter(|_| self.options.use_extension)
            .and_then(|name| self.detect_path(name));

        let label = self
            .resolver()
            .most_specific([content, declared.as_deref(), extension])
            .map(str::to_string);

        trace!(?content, ?declared, ?extension, ?label, "resolved content type");
        label
    }

    /// Open a file and run [`detect`](Self::detect) with its name.
    ///
    /// A file that cannot be opened yields `None`.
    pub fn detect_file<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        let path = path.as_ref();
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                trace!(path = %path.display(), %err, "cannot open file for detection");
                return None;
            },
        };

        let name = path.file_name().and_then(|name| name.to_str());
        self.detect(&mut file, None, name)
    }

    /// Shorthand for [`TypeResolver::is_child_of`].
    #[inline]
    pub fn is_child_of(&self, candidate: &str, ancestor: &str) -> bool {
        self.resolver().is_child_of(candidate, ancestor)
    }
}

/// Extension of the final component of `path`, without the dot.
///
/// Both `/` and `\` separate components. A component without a dot is taken
/// as a bare extension, so `"png"` and `"photo.png"` resolve alike. A trailing
/// dot yields `None`.
///
/// ```rust
/// use typesniff::detection::extension_of;
///
/// assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
/// assert_eq!(extension_of(r"C:\Docs\Report.DOCX"), Some("DOCX"));
/// assert_eq!(extension_of("png"), Some("png"));
/// assert_eq!(extension_of("dir.d/"), None);
/// ```
pub fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit(['/', '\\']).next()?;
    let ext = match name.rfind('.') {
        Some(dot) => &name[dot + 1..],
        None => name,
    };
    (!ext.trim().is_empty()).then_some(ext)
}

/// Run `f` over a [`ByteSource`] for `reader`, restoring the cursor after.
///
/// Readers whose position or length cannot be determined produce the
/// default (empty) result.
fn with_source<R, T, F>(reader: &mut R, f: F) -> T
where
    R: Read + Seek + ?Sized,
    T: Default,
    F: FnOnce(&mut ByteSource<'_, R>) -> T,
{
    let original = match reader.stream_position() {
        Ok(pos) => pos,
        Err(_) => return T::default(),
    };

    let result = match ByteSource::new(reader) {
        Ok(mut source) => f(&mut source),
        Err(_) => T::default(),
    };

    if let Err(err) = reader.seek(SeekFrom::Start(original)) {
        trace!(position = original, %err, "cannot restore reader position");
    }
    result
}

#[cfg(test)]
mod tests;
