//! Error types for the URL-payload codecs.
//!
//! Hard failures (malformed base64, corrupt gzip streams, bad length
//! headers) are typed variants of [`UrlPackError`]. "Not the format I
//! handle" is deliberately NOT an error: multi-format probing (typed-bytes
//! decode, recovery parsing, ref-code lookup) returns `Option::None` on a
//! miss so the fallback chain stays cheap.

use thiserror::Error;

/// URL-payload codec errors.
#[derive(Error, Debug)]
pub enum UrlPackError {
    /// Compression operation failed.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Decompression operation failed (corrupt or truncated stream).
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// Input does not match the expected textual format (e.g. non-digit
    /// characters in a decimal payload).
    #[error("Format error: {0}")]
    Format(String),

    /// Decoded value needs more bytes than the declared length.
    #[error("Length mismatch: value needs {needed} bytes, expected {expected}")]
    LengthMismatch {
        /// Bytes the decoded value actually occupies.
        needed: usize,
        /// Bytes the caller declared.
        expected: usize,
    },

    /// Payload or final URL exceeds a configured byte budget.
    #[error("Payload too large: {size} bytes exceeds maximum {max}")]
    TooLarge {
        /// Actual size in bytes.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Short-URL token has a bad magic, version digit, or length header.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Decoded token did not reconstruct a well-formed http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Media payload matched neither the compact nor the legacy form.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Chat payload failed structural validation.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for URL-payload codec operations
pub type Result<T> = std::result::Result<T, UrlPackError>;

impl From<base64::DecodeError> for UrlPackError {
    fn from(err: base64::DecodeError) -> Self {
        UrlPackError::Decompression(format!("Base64 decode error: {err}"))
    }
}

impl From<toml::de::Error> for UrlPackError {
    fn from(err: toml::de::Error) -> Self {
        UrlPackError::Config(err.to_string())
    }
}
