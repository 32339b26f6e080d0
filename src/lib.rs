//! Typesniff - A Rust library for identifying content types
//!
//! This library decides what kind of data a byte stream holds by combining
//! three signals: magic byte patterns in the content, a declared media type
//! (as sent in an HTTP `Content-Type` header) and the file name extension.
//!
//! # Features
//!
//! - **Magic patterns**: Fixed-offset and ranged signatures with conjunctive
//!   sub-patterns, evaluated over any `Read + Seek` source
//! - **Type hierarchy**: Labels may descend from several parents, so an EPUB
//!   is also a ZIP and an SVG is also XML
//! - **Extensible registry**: Register, replace or remove types at runtime,
//!   from code or from YAML definitions
//! - **Never fails**: Unreadable input contributes no candidate instead of an error
//!
//! # Example - Detecting content
//!
//! ```rust
//! use typesniff::{Detector, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let detector = Detector::new(&registry);
//!
//! assert_eq!(detector.detect_bytes(b"\xFF\xD8\xFF\xE0\x00\x10JFIF"), Some("image/jpeg"));
//! assert_eq!(detector.detect_bytes(b"plain words"), None);
//! ```
//!
//! # Example - Combining signals
//!
//! ```rust
//! use std::io::Cursor;
//! use typesniff::{Detector, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let detector = Detector::new(&registry);
//!
//! // OLE content is shared by all legacy Office formats; the name narrows it
//! let mut doc = Cursor::new(b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1".to_vec());
//! let label = detector.detect(&mut doc, Some("application/octet-stream"), Some("memo.doc"));
//! assert_eq!(label.as_deref(), Some("application/msword"));
//! ```
//!
//! # Example - Registering a custom type
//!
//! ```rust
//! use typesniff::{Detector, TypeRegistry};
//! use typesniff::pattern::Pattern;
//!
//! # fn main() -> typesniff::Result<()> {
//! let mut registry = TypeRegistry::new();
//! registry.extend(
//!     "application/x-acme",
//!     Some(&["acme"][..]),
//!     Some(&["application/zip"][..]),
//!     Some(vec![Pattern::fixed(0, &b"ACME"[..])?]),
//! );
//!
//! let detector = Detector::new(&registry);
//! assert_eq!(detector.detect_bytes(b"ACME\x01\x02"), Some("application/x-acme"));
//! assert_eq!(detector.detect_path("backup.acme"), Some("application/x-acme"));
//! assert!(detector.is_child_of("application/x-acme", "application/zip"));
//! # Ok(())
//! # }
//! ```

/// Shared error type and byte source access
pub mod common;

/// Declared media type parsing
pub mod declared;

/// Detection entry points combining all signals
pub mod detection;

/// Magic patterns and their evaluation
pub mod pattern;

/// Type registry: extensions, parents and patterns per label
pub mod registry;

/// Type hierarchy queries
pub mod resolver;

// Re-export commonly used types for convenience
pub use common::error::{Error, Result};
pub use detection::{DetectOptions, Detector};
pub use registry::TypeRegistry;
pub use resolver::TypeResolver;
