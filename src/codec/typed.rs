//! Typed-bytes payload codec.
//!
//! Minimal fixed-overhead wrapper for media blobs: one type-tag byte
//! prepended to the raw bytes, URL-safe base64 encoded, prefixed with
//! `b-`. Compared to embedding a percent-encoded data-URL this avoids
//! the mime boilerplate and the 3x escaping blowup.
//!
//! Wire format: `b-<base64url(tag_byte ++ bytes)>`
//!
//! Decode returns `None` rather than an error when the input is not in
//! this format, so callers can probe cheaply before falling back to
//! legacy encodings.

use super::base64::{base64_url_to_bytes, bytes_to_base64_url, is_url_safe_alphabet};

/// Wire prefix for the compact typed-bytes format.
pub const TYPED_PREFIX: &str = "b-";

/// A decoded typed-bytes payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedPayload {
    /// Type tag from the owning codec's closed table; 0 means unknown/raw.
    pub type_id: u8,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

/// Encode a type tag and raw bytes as a compact `b-` token.
pub fn encode(type_id: u8, bytes: &[u8]) -> String {
    let mut payload = Vec::with_capacity(bytes.len() + 1);
    payload.push(type_id);
    payload.extend_from_slice(bytes);
    format!("{TYPED_PREFIX}{}", bytes_to_base64_url(&payload))
}

/// Decode a compact `b-` token.
///
/// Soft-miss contract: returns `None` when the prefix is absent, the
/// body contains characters outside the URL-safe alphabet, or the body
/// decodes to zero bytes (no room for the tag).
pub fn decode(token: &str) -> Option<TypedPayload> {
    let body = token.strip_prefix(TYPED_PREFIX)?;
    if body.is_empty() || !is_url_safe_alphabet(body) {
        return None;
    }
    let decoded = base64_url_to_bytes(body).ok()?;
    let (&type_id, bytes) = decoded.split_first()?;
    Some(TypedPayload {
        type_id,
        bytes: bytes.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let bytes = [0x89, 0x50, 0x4E, 0x47];
        let token = encode(1, &bytes);
        assert!(token.starts_with("b-"));

        let payload = decode(&token).unwrap();
        assert_eq!(payload.type_id, 1);
        assert_eq!(payload.bytes, bytes);
    }

    #[test]
    fn test_roundtrip_all_tags() {
        for tag in [0u8, 1, 127, 128, 255] {
            let payload = decode(&encode(tag, b"data")).unwrap();
            assert_eq!(payload.type_id, tag);
            assert_eq!(payload.bytes, b"data");
        }
    }

    #[test]
    fn test_empty_bytes() {
        let payload = decode(&encode(7, &[])).unwrap();
        assert_eq!(payload.type_id, 7);
        assert!(payload.bytes.is_empty());
    }

    #[test]
    fn test_soft_miss_wrong_prefix() {
        assert_eq!(decode("x-AQID"), None);
        assert_eq!(decode("AQID"), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn test_soft_miss_bad_alphabet() {
        assert_eq!(decode("b-abc+def"), None);
        assert_eq!(decode("b-abc="), None);
        assert_eq!(decode("b-"), None);
    }
}
