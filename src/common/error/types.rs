//! Unified error types for typesniff.
use thiserror::Error;

/// Main error type for typesniff operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A pattern violates its invariants (empty value, inverted range)
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// A custom type definition is incomplete or malformed
    #[error("Invalid definition for '{label}': {reason}")]
    InvalidDefinition { label: String, reason: String },

    /// Configuration document could not be deserialized
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for typesniff operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidPattern("pattern value must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid pattern: pattern value must not be empty");

        let err = Error::InvalidDefinition {
            label: "image/x-custom".to_string(),
            reason: "missing value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid definition for 'image/x-custom': missing value"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
