//! Base64 transcoding with URL-safe alphabet normalization.
//!
//! Every token family in this crate rides on base64: the compact formats
//! use the URL-safe alphabet without padding (so tokens survive fragments
//! and query strings verbatim), while the gzip engine produces standard
//! base64 first and transforms it. The two alphabets differ only in
//! `+`/`-` and `/`/`_` plus padding, so normalization is a pure character
//! map followed by re-padding.

use base64::engine::general_purpose::{STANDARD as BASE64, URL_SAFE_NO_PAD as BASE64_URL};
use base64::Engine;

use crate::error::Result;

/// Encode bytes as standard base64.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode standard base64 to bytes.
///
/// Fails with a decode error on any character outside the standard
/// alphabet or bad padding.
pub fn base64_to_bytes(s: &str) -> Result<Vec<u8>> {
    Ok(BASE64.decode(s)?)
}

/// Encode bytes directly in the URL-safe alphabet, unpadded.
pub fn bytes_to_base64_url(bytes: &[u8]) -> String {
    BASE64_URL.encode(bytes)
}

/// Decode unpadded URL-safe base64 to bytes.
pub fn base64_url_to_bytes(s: &str) -> Result<Vec<u8>> {
    Ok(BASE64_URL.decode(s)?)
}

/// Rewrite a standard base64 string into the URL-safe alphabet and strip
/// padding. Inverse of [`normalize_url_safe`].
pub fn to_url_safe(s: &str) -> String {
    s.replace('+', "-").replace('/', "_").replace('=', "")
}

/// Rewrite a URL-safe base64 string back to the standard alphabet and
/// re-pad to a multiple of 4. Must be applied before a standard decode of
/// any URL-safe token.
pub fn normalize_url_safe(s: &str) -> String {
    let mut out = s.replace('-', "+").replace('_', "/");
    let rem = out.len() % 4;
    if rem != 0 {
        out.extend(std::iter::repeat('=').take(4 - rem));
    }
    out
}

/// Check that every character belongs to the URL-safe base64 alphabet.
pub fn is_url_safe_alphabet(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
