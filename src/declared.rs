//! Declared media type parsing.
//!
//! Declared types usually come from header-style values such as an HTTP
//! `Content-Type`: `text/html; charset=utf-8`. Only the bare `type/subtype`
//! token takes part in detection.

use crate::registry::builtin::OCTET_STREAM;

/// Extract the bare, lowercased `type/subtype` token from a declared value.
///
/// The token is the first segment delimited by `;`, `,` or whitespace. It must
/// contain exactly one `/` with text on both sides, otherwise `None`.
///
/// # Examples
///
/// ```rust
/// use typesniff::declared::parse_declared;
///
/// assert_eq!(parse_declared("text/html; charset=utf-8"), Some("text/html".to_string()));
/// assert_eq!(parse_declared("  Image/PNG "), Some("image/png".to_string()));
/// assert_eq!(parse_declared("not-a-type"), None);
/// assert_eq!(parse_declared("a/b/c"), None);
/// ```
pub fn parse_declared(value: &str) -> Option<String> {
    let token = value
        .trim()
        .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
        .next()?;

    let (kind, subtype) = token.split_once('/')?;
    if kind.is_empty() || subtype.is_empty() || subtype.contains('/') {
        return None;
    }

    Some(token.to_ascii_lowercase())
}

/// Whether `label` is the generic "unspecified binary" type.
///
/// A declared value naming this type says nothing about the content, so the
/// detector treats it like no declared type at all.
#[inline]
pub fn is_unspecified(label: &str) -> bool {
    label.eq_ignore_ascii_case(OCTET_STREAM)
}

/// Parse a declared value, dropping the unspecified-binary sentinel.
pub fn parse_specific(value: &str) -> Option<String> {
    parse_declared(value).filter(|label| !is_unspecified(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_parameters() {
        assert_eq!(
            parse_declared("text/html; charset=utf-8"),
            Some("text/html".to_string())
        );
        assert_eq!(
            parse_declared("application/json,text/plain"),
            Some("application/json".to_string())
        );
        assert_eq!(
            parse_declared("image/svg+xml charset=x"),
            Some("image/svg+xml".to_string())
        );
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert_eq!(parse_declared(""), None);
        assert_eq!(parse_declared("   "), None);
        assert_eq!(parse_declared("; charset=utf-8"), None);
        assert_eq!(parse_declared("text"), None);
        assert_eq!(parse_declared("/html"), None);
        assert_eq!(parse_declared("text/"), None);
        assert_eq!(parse_declared("text/html/extra"), None);
    }

    #[test]
    fn test_unspecified_sentinel() {
        assert!(is_unspecified("application/octet-stream"));
        assert!(is_unspecified("Application/Octet-Stream"));
        assert!(!is_unspecified("application/pdf"));

        assert_eq!(parse_specific("application/octet-stream; name=x"), None);
        assert_eq!(parse_specific("application/pdf"), Some("application/pdf".to_string()));
    }
}
