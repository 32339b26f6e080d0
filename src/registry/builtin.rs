//! Built-in type tables.
//!
//! Three tables seed every [`TypeRegistry`](super::TypeRegistry):
//!
//! - [`EXTENSIONS`]: extension → label
//! - [`PARENTS`]: label → parent labels
//! - [`entries`]: labels with their magic patterns, in detection priority order
//!
//! Priority order matters: content detection reports the first label whose
//! patterns match, so narrow formats are listed ahead of the containers they
//! are built on (EPUB before ZIP, WebP before nothing-but-RIFF, SVG before XML).

use phf::phf_map;

use super::TypeEntry;
use crate::pattern::{Offset, Pattern};

/// The generic binary label, also used as the "no declared type" sentinel.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension → label.
pub static EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    // Images
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "jpe" => "image/jpeg",
    "jfif" => "image/jpeg",
    "png" => "image/png",
    "gif" => "image/gif",
    "bmp" => "image/bmp",
    "dib" => "image/bmp",
    "tif" => "image/tiff",
    "tiff" => "image/tiff",
    "ico" => "image/x-icon",
    "webp" => "image/webp",
    "psd" => "image/vnd.adobe.photoshop",
    "avif" => "image/avif",
    "heic" => "image/heic",
    "svg" => "image/svg+xml",
    "svgz" => "image/svg+xml",

    // Audio and video
    "wav" => "audio/wav",
    "mp3" => "audio/mpeg",
    "flac" => "audio/flac",
    "ogg" => "audio/ogg",
    "oga" => "audio/ogg",
    "mid" => "audio/midi",
    "midi" => "audio/midi",
    "m4a" => "audio/mp4",
    "avi" => "video/x-msvideo",
    "mp4" => "video/mp4",
    "m4v" => "video/mp4",
    "mov" => "video/quicktime",
    "mkv" => "video/x-matroska",
    "webm" => "video/webm",

    // Documents
    "pdf" => "application/pdf",
    "ai" => "application/illustrator",
    "ps" => "application/postscript",
    "eps" => "application/postscript",
    "rtf" => "application/rtf",
    "doc" => "application/msword",
    "dot" => "application/msword",
    "xls" => "application/vnd.ms-excel",
    "ppt" => "application/vnd.ms-powerpoint",
    "msg" => "application/vnd.ms-outlook",
    "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "odt" => "application/vnd.oasis.opendocument.text",
    "ods" => "application/vnd.oasis.opendocument.spreadsheet",
    "epub" => "application/epub+zip",

    // Archives and compression
    "zip" => "application/zip",
    "jar" => "application/java-archive",
    "gz" => "application/gzip",
    "tgz" => "application/gzip",
    "bz2" => "application/x-bzip2",
    "xz" => "application/x-xz",
    "7z" => "application/x-7z-compressed",
    "rar" => "application/vnd.rar",
    "tar" => "application/x-tar",

    // Executables and databases
    "exe" => "application/x-msdownload",
    "dll" => "application/x-msdownload",
    "elf" => "application/x-executable",
    "so" => "application/x-sharedlib",
    "wasm" => "application/wasm",
    "sqlite" => "application/vnd.sqlite3",
    "sqlite3" => "application/vnd.sqlite3",
    "db" => "application/vnd.sqlite3",
    "bin" => OCTET_STREAM,

    // Fonts
    "woff" => "font/woff",
    "woff2" => "font/woff2",
    "otf" => "font/otf",
    "ttf" => "font/ttf",

    // Text
    "txt" => "text/plain",
    "text" => "text/plain",
    "log" => "text/plain",
    "htm" => "text/html",
    "html" => "text/html",
    "xhtml" => "application/xhtml+xml",
    "xml" => "application/xml",
    "xsl" => "application/xml",
    "json" => "application/json",
    "css" => "text/css",
    "csv" => "text/csv",
    "js" => "text/javascript",
    "mjs" => "text/javascript",
    "md" => "text/markdown",
    "markdown" => "text/markdown",
};

/// Label → parent labels. A label may descend from several ancestors.
pub static PARENTS: &[(&str, &[&str])] = &[
    ("application/illustrator", &["application/pdf"]),
    ("application/msword", &["application/x-ole-storage"]),
    ("application/vnd.ms-excel", &["application/x-ole-storage"]),
    ("application/vnd.ms-powerpoint", &["application/x-ole-storage"]),
    ("application/vnd.ms-outlook", &["application/x-ole-storage"]),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &["application/zip"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &["application/zip"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        &["application/zip"],
    ),
    ("application/vnd.oasis.opendocument.text", &["application/zip"]),
    ("application/vnd.oasis.opendocument.spreadsheet", &["application/zip"]),
    ("application/epub+zip", &["application/zip"]),
    ("application/java-archive", &["application/zip"]),
    ("application/x-sharedlib", &["application/x-executable"]),
    ("video/webm", &["video/x-matroska"]),
    ("image/svg+xml", &["application/xml"]),
    ("application/xhtml+xml", &["application/xml", "text/html"]),
    ("application/xml", &["text/plain"]),
    ("text/html", &["text/plain"]),
    ("text/css", &["text/plain"]),
    ("text/csv", &["text/plain"]),
    ("text/javascript", &["text/plain"]),
    ("text/markdown", &["text/plain"]),
    ("application/json", &["text/plain"]),
    ("application/rtf", &["text/plain"]),
];

const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";
const OLE_HEADER: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Offset of the first member name in a ZIP local file header.
const ZIP_FIRST_NAME: u64 = 30;

#[inline]
fn at(pos: u64, value: &'static [u8]) -> Pattern {
    Pattern::from_static(Offset::Fixed(pos), value)
}

#[inline]
fn within(start: u64, end: u64, value: &'static [u8]) -> Pattern {
    Pattern::from_static(Offset::Range { start, end }, value)
}

fn riff(form: &'static [u8]) -> Pattern {
    at(0, b"RIFF").with_child(at(8, form))
}

fn zip_member(name: &'static [u8]) -> Pattern {
    at(0, ZIP_LOCAL_HEADER).with_child(within(ZIP_FIRST_NAME, 4096, name))
}

/// First ZIP member is an uncompressed `mimetype` file holding `mime`.
fn zip_mimetype(mime: &'static [u8]) -> Pattern {
    at(0, ZIP_LOCAL_HEADER)
        .with_child(at(ZIP_FIRST_NAME, b"mimetype"))
        .with_child(within(ZIP_FIRST_NAME + 8, ZIP_FIRST_NAME + 64, mime))
}

fn entry(label: &str, patterns: Vec<Pattern>) -> TypeEntry {
    TypeEntry {
        label: label.to_string(),
        patterns,
    }
}

/// Built-in pattern entries in detection priority order.
pub fn entries() -> Vec<TypeEntry> {
    vec![
        // PDF family
        entry(
            "application/illustrator",
            vec![at(0, b"%PDF").with_child(within(0, 1024, b"Adobe Illustrator"))],
        ),
        entry("application/pdf", vec![at(0, b"%PDF-")]),
        entry("application/postscript", vec![at(0, b"%!PS")]),
        // RIFF containers
        entry("image/webp", vec![riff(b"WEBP")]),
        entry("audio/wav", vec![riff(b"WAVE")]),
        entry("video/x-msvideo", vec![riff(b"AVI ")]),
        // Images
        entry("image/png", vec![at(0, b"\x89PNG\r\n\x1A\n")]),
        entry("image/jpeg", vec![at(0, b"\xFF\xD8\xFF")]),
        entry("image/gif", vec![at(0, b"GIF87a"), at(0, b"GIF89a")]),
        entry("image/tiff", vec![at(0, b"II*\x00"), at(0, b"MM\x00*")]),
        entry("image/x-icon", vec![at(0, b"\x00\x00\x01\x00")]),
        entry("image/vnd.adobe.photoshop", vec![at(0, b"8BPS")]),
        // ISO base media
        entry("image/avif", vec![at(4, b"ftypavif"), at(4, b"ftypavis")]),
        entry("image/heic", vec![at(4, b"ftypheic"), at(4, b"ftypheix")]),
        entry("audio/mp4", vec![at(4, b"ftypM4A ")]),
        entry("video/quicktime", vec![at(4, b"ftypqt  "), at(4, b"moov")]),
        entry("video/mp4", vec![at(4, b"ftyp")]),
        // EBML
        entry(
            "video/webm",
            vec![at(0, b"\x1A\x45\xDF\xA3").with_child(within(0, 64, b"webm"))],
        ),
        entry("video/x-matroska", vec![at(0, b"\x1A\x45\xDF\xA3")]),
        // Audio
        entry(
            "audio/mpeg",
            vec![at(0, b"ID3"), at(0, b"\xFF\xFB"), at(0, b"\xFF\xF3"), at(0, b"\xFF\xF2")],
        ),
        entry("audio/flac", vec![at(0, b"fLaC")]),
        entry("audio/ogg", vec![at(0, b"OggS")]),
        entry("audio/midi", vec![at(0, b"MThd")]),
        // ZIP based
        entry(
            "application/epub+zip",
            vec![zip_mimetype(b"application/epub+zip")],
        ),
        entry(
            "application/vnd.oasis.opendocument.text",
            vec![zip_mimetype(b"application/vnd.oasis.opendocument.text")],
        ),
        entry(
            "application/vnd.oasis.opendocument.spreadsheet",
            vec![zip_mimetype(b"application/vnd.oasis.opendocument.spreadsheet")],
        ),
        entry(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            vec![zip_member(b"word/")],
        ),
        entry(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            vec![zip_member(b"xl/")],
        ),
        entry(
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            vec![zip_member(b"ppt/")],
        ),
        entry("application/java-archive", vec![zip_member(b"META-INF/MANIFEST.MF")]),
        entry(
            "application/zip",
            vec![at(0, ZIP_LOCAL_HEADER), at(0, b"PK\x05\x06"), at(0, b"PK\x07\x08")],
        ),
        // Compression
        entry("application/gzip", vec![at(0, b"\x1F\x8B")]),
        entry("application/x-bzip2", vec![at(0, b"BZh")]),
        entry("application/x-xz", vec![at(0, b"\xFD7zXZ\x00")]),
        entry("application/x-7z-compressed", vec![at(0, b"7z\xBC\xAF\x27\x1C")]),
        entry("application/vnd.rar", vec![at(0, b"Rar!\x1A\x07")]),
        entry("application/x-tar", vec![at(257, b"ustar")]),
        // Executables and databases
        entry("application/x-executable", vec![at(0, b"\x7FELF")]),
        entry("application/x-msdownload", vec![at(0, b"MZ")]),
        entry("application/wasm", vec![at(0, b"\x00asm")]),
        entry("application/vnd.sqlite3", vec![at(0, b"SQLite format 3\x00")]),
        // Fonts
        entry("font/woff", vec![at(0, b"wOFF")]),
        entry("font/woff2", vec![at(0, b"wOF2")]),
        entry("font/otf", vec![at(0, b"OTTO")]),
        entry("font/ttf", vec![at(0, b"\x00\x01\x00\x00\x00")]),
        // Text based
        entry("application/rtf", vec![at(0, b"{\\rtf")]),
        entry("application/x-ole-storage", vec![at(0, OLE_HEADER)]),
        // Anchored, so an inline <svg> inside an HTML page stays HTML
        entry(
            "image/svg+xml",
            vec![
                at(0, b"<svg"),
                at(0, b"<?xml").with_child(within(0, 256, b"<svg")),
            ],
        ),
        entry(
            "text/html",
            vec![
                within(0, 256, b"<!DOCTYPE html"),
                within(0, 256, b"<!doctype html"),
                within(0, 256, b"<html"),
                within(0, 256, b"<HTML"),
            ],
        ),
        entry(
            "application/xml",
            vec![
                at(0, b"<?xml"),
                at(0, b"\xEF\xBB\xBF").with_child(at(3, b"<?xml")),
            ],
        ),
        // Weak two-byte signature, checked last
        entry("image/bmp", vec![at(0, b"BM")]),
    ]
}
