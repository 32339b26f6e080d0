use super::*;
use crate::pattern::Pattern;
use std::io::{Cursor, Write};

const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10";
const PNG: &[u8] = b"\x89\x50\x4E\x47\x0D\x0A\x1A\x0A";

fn zip_with_first_member(name: &[u8], extra: &[u8]) -> Vec<u8> {
    let mut data = b"PK\x03\x04".to_vec();
    data.resize(30, 0);
    data.extend_from_slice(name);
    data.extend_from_slice(extra);
    data
}

#[test]
fn test_content_jpeg_and_png() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    assert_eq!(detector.detect_bytes(JPEG), Some("image/jpeg"));
    assert_eq!(detector.detect_bytes(PNG), Some("image/png"));
}

#[test]
fn test_content_builtin_samples() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let mut tar = vec![0u8; 512];
    tar[257..263].copy_from_slice(b"ustar\x00");

    let samples: &[(&[u8], &str)] = &[
        (b"GIF89a\x01\x00\x01\x00", "image/gif"),
        (b"RIFF\x24\x00\x00\x00WEBPVP8 ", "image/webp"),
        (b"RIFF\x24\x00\x00\x00WAVEfmt ", "audio/wav"),
        (b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n", "application/pdf"),
        (b"%PDF-1.5\n%Creator: Adobe Illustrator(R) 24.0\n", "application/illustrator"),
        (b"\x00\x00\x00\x20ftypisom\x00\x00\x02\x00", "video/mp4"),
        (b"\x00\x00\x00\x1CftypM4A \x00\x00\x00\x00", "audio/mp4"),
        (b"\x1F\x8B\x08\x00\x00\x00\x00\x00", "application/gzip"),
        (b"\x7FELF\x02\x01\x01", "application/x-executable"),
        (b"\x00asm\x01\x00\x00\x00", "application/wasm"),
        (b"SQLite format 3\x00\x10\x00", "application/vnd.sqlite3"),
        (b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1\x00\x00", "application/x-ole-storage"),
        (b"<?xml version=\"1.0\"?><svg xmlns=\"http://www.w3.org/2000/svg\"/>", "image/svg+xml"),
        (b"<?xml version=\"1.0\"?><note/>", "application/xml"),
        (b"\xEF\xBB\xBF<?xml version=\"1.0\"?><note/>", "application/xml"),
        (b"<!DOCTYPE html>\n<html><body></body></html>", "text/html"),
        (
            b"<!DOCTYPE html>\n<html><body><svg width=\"10\"></svg></body></html>",
            "text/html",
        ),
        (b"<html><svg viewBox=\"0 0 1 1\"/></html>", "text/html"),
        (b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>", "image/svg+xml"),
        (b"{\\rtf1\\ansi Hello}", "application/rtf"),
        (b"BM\x36\x00\x0C\x00", "image/bmp"),
        (&tar, "application/x-tar"),
    ];

    for (data, expected) in samples {
        assert_eq!(detector.detect_bytes(data), Some(*expected), "sample for {expected}");
    }
}

#[test]
fn test_content_zip_family() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let epub = zip_with_first_member(b"mimetype", b"application/epub+zip");
    assert_eq!(detector.detect_bytes(&epub), Some("application/epub+zip"));

    let docx = zip_with_first_member(b"[Content_Types].xml", b"....PK\x03\x04....word/document.xml");
    assert_eq!(
        detector.detect_bytes(&docx),
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
    );

    let plain = zip_with_first_member(b"readme.txt", b"hello");
    assert_eq!(detector.detect_bytes(&plain), Some("application/zip"));
}

#[test]
fn test_content_all_in_priority_order() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let epub = zip_with_first_member(b"mimetype", b"application/epub+zip");
    assert_eq!(
        detector.detect_bytes_all(&epub),
        ["application/epub+zip", "application/zip"]
    );

    let ai = b"%PDF-1.4\n%Adobe Illustrator\n";
    assert_eq!(
        detector.detect_bytes_all(ai),
        ["application/illustrator", "application/pdf"]
    );
    assert!(detector.detect_bytes_all(b"nothing to see").is_empty());
}

#[test]
fn test_empty_source_resolves_through_other_signals() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    assert_eq!(detector.detect_bytes(b""), None);
    assert!(detector.detect_bytes_all(b"").is_empty());

    let mut empty = Cursor::new(Vec::new());
    assert_eq!(detector.detect(&mut empty, None, Some("notes.txt")).as_deref(), Some("text/plain"));
    assert_eq!(
        detector.detect(&mut empty, Some("application/json"), None).as_deref(),
        Some("application/json")
    );
    assert_eq!(detector.detect(&mut empty, None, None), None);
}

#[test]
fn test_declared_type_parameters_are_stripped() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let mut empty = Cursor::new(Vec::new());
    let label = detector.detect(&mut empty, Some("text/html; charset=utf-8"), None);
    assert_eq!(label.as_deref(), Some("text/html"));
}

#[test]
fn test_unspecified_declared_type_yields_to_extension() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let mut empty = Cursor::new(Vec::new());
    let label = detector.detect(&mut empty, Some("application/octet-stream"), Some("report.pdf"));
    assert_eq!(label.as_deref(), Some("application/pdf"));

    // Taken at face value when the option is off
    let strict = Detector::with_options(&registry, DetectOptions::new().with_ignore_unspecified(false));
    let label = strict.detect(&mut empty, Some("application/octet-stream"), Some("report.pdf"));
    assert_eq!(label.as_deref(), Some("application/octet-stream"));
}

#[test]
fn test_signals_narrow_to_most_specific() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    // OLE content cannot tell Word from Excel; the extension can
    let mut ole = Cursor::new(b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1\x00\x00\x00\x00".to_vec());
    assert_eq!(
        detector.detect(&mut ole, None, Some("letter.doc")).as_deref(),
        Some("application/msword")
    );

    // Content wins over an unrelated extension
    let mut png = Cursor::new(PNG.to_vec());
    assert_eq!(
        detector.detect(&mut png, Some("text/plain"), Some("image.gif")).as_deref(),
        Some("image/png")
    );

    // Declared subtype of the detected XML
    let mut xml = Cursor::new(b"<?xml version=\"1.0\"?>\n<!-- drawing -->".to_vec());
    assert_eq!(
        detector.detect(&mut xml, Some("image/svg+xml"), Some("drawing.xml")).as_deref(),
        Some("image/svg+xml")
    );
}

#[test]
fn test_options_disable_signals() {
    let registry = TypeRegistry::new();
    let mut png = Cursor::new(PNG.to_vec());

    let no_content = Detector::with_options(&registry, DetectOptions::new().with_content(false));
    assert_eq!(
        no_content.detect(&mut png, None, Some("image.gif")).as_deref(),
        Some("image/gif")
    );

    let content_only = Detector::with_options(
        &registry,
        DetectOptions::new().with_declared(false).with_extension(false),
    );
    assert_eq!(
        content_only.detect(&mut png, Some("application/pdf"), Some("image.gif")).as_deref(),
        Some("image/png")
    );
    assert!(!content_only.options().use_declared);
}

#[test]
fn test_cursor_is_restored() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let mut cursor = Cursor::new(b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec());
    cursor.set_position(6);

    assert_eq!(detector.detect_content(&mut cursor), Some("audio/wav"));
    assert_eq!(cursor.position(), 6);

    assert_eq!(detector.detect_content_all(&mut cursor), ["audio/wav"]);
    assert_eq!(cursor.position(), 6);

    assert_eq!(detector.detect(&mut cursor, None, Some("a.wav")).as_deref(), Some("audio/wav"));
    assert_eq!(cursor.position(), 6);
}

/// Cursor that refuses to seek to one absolute position.
struct StickyCursor {
    inner: Cursor<Vec<u8>>,
    refused: u64,
}

impl std::io::Read for StickyCursor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for StickyCursor {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        if pos == SeekFrom::Start(self.refused) {
            return Err(std::io::Error::other("seek refused"));
        }
        self.inner.seek(pos)
    }
}

#[test]
fn test_failed_restore_keeps_result() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let mut inner = Cursor::new(b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec());
    inner.set_position(5);
    let mut reader = StickyCursor { inner, refused: 5 };

    assert_eq!(detector.detect_content(&mut reader), Some("audio/wav"));
    assert_eq!(
        detector.detect(&mut reader, None, Some("clip.wav")).as_deref(),
        Some("audio/wav")
    );
}

#[test]
fn test_custom_pattern_takes_priority() {
    let mut registry = TypeRegistry::new();
    registry.extend(
        "image/x-custom-jpeg",
        None,
        None,
        Some(vec![Pattern::fixed(0, &b"\xFF\xD8"[..]).unwrap()]),
    );

    let detector = Detector::new(&registry);
    assert_eq!(detector.detect_bytes(JPEG), Some("image/x-custom-jpeg"));
    assert_eq!(detector.detect_bytes_all(JPEG), ["image/x-custom-jpeg", "image/jpeg"]);
}

#[test]
fn test_custom_type_round_trip() {
    let mut registry = TypeRegistry::new();
    registry.extend(
        "custom",
        Some(&["cst"][..]),
        Some(&["image/png"][..]),
        Some(vec![Pattern::fixed(0, PNG).unwrap()]),
    );
    {
        let detector = Detector::new(&registry);
        assert_eq!(detector.detect_bytes(PNG), Some("custom"));
        assert_eq!(detector.detect_path("x.cst"), Some("custom"));
        assert!(detector.is_child_of("custom", "image/png"));
    }

    registry.remove("custom");
    let detector = Detector::new(&registry);
    assert_eq!(detector.detect_bytes(PNG), Some("image/png"));
    assert_eq!(detector.detect_path("x.cst"), None);
    assert!(!detector.is_child_of("custom", "image/png"));
}

#[test]
fn test_extension_and_path() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    assert_eq!(detector.detect_extension(".Docx"), registry.lookup_by_extension("docx"));
    assert_eq!(detector.detect_extension(""), None);
    assert_eq!(detector.detect_path("/var/www/index.HTML"), Some("text/html"));
    assert_eq!(detector.detect_path(r"C:\tmp\archive.tar.gz"), Some("application/gzip"));
    assert_eq!(detector.detect_path("svg"), Some("image/svg+xml"));
    assert_eq!(detector.detect_path("file.unknownext"), None);
    assert_eq!(detector.detect_path("trailing."), None);
    assert_eq!(detector.detect_path(""), None);
}

#[test]
fn test_extension_of() {
    assert_eq!(extension_of("a/b/c.tar.gz"), Some("gz"));
    assert_eq!(extension_of(".bashrc"), Some("bashrc"));
    assert_eq!(extension_of("dir.d/file"), Some("file"));
    assert_eq!(extension_of("dir/"), None);
    assert_eq!(extension_of("name. "), None);
}

#[test]
fn test_detect_file() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.bin");
    let mut file = File::create(&path).unwrap();
    file.write_all(PNG).unwrap();
    file.write_all(&[0u8; 32]).unwrap();
    drop(file);

    // Content wins over the unrelated generic extension
    assert_eq!(detector.detect_file(&path).as_deref(), Some("image/png"));

    let text = dir.path().join("notes.md");
    std::fs::write(&text, "# Notes\n").unwrap();
    assert_eq!(detector.detect_file(&text).as_deref(), Some("text/markdown"));

    assert_eq!(detector.detect_file(dir.path().join("missing.png")), None);
}

#[test]
fn test_detector_is_shareable_across_threads() {
    let registry = TypeRegistry::new();
    let detector = Detector::new(&registry);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| detector.detect_bytes(JPEG)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some("image/jpeg"));
        }
    });
}
