//! The `AT` short-URL token family.
//!
//! A token is the magic `AT` followed by one version digit and a
//! version-specific payload:
//!
//! | Version | Payload | Notes |
//! |---------|---------|-------|
//! | `0` | 6-digit length + decimal digits of the raw UTF-8 URL | legacy |
//! | `1` | 6-digit length + decimal digits of the gzipped URL   | legacy |
//! | `2` | base64url(gzip(dict_id byte ++ UTF-8 remainder))     | current |
//!
//! Version 2 is the only encode default; 0 and 1 are still emitted on
//! request for consumers that cannot carry base64 characters. Every
//! decode path lives forever: links already shared must keep working, so
//! variants are never removed, only added.

use crate::codec::base64::{bytes_to_base64_url, is_url_safe_alphabet, base64_url_to_bytes};
use crate::codec::bigint::{bytes_to_decimal, decimal_to_bytes};
use crate::codec::compress::{gunzip_bytes, gzip_bytes};
use crate::error::{Result, UrlPackError};
use crate::shorturl::dictionary;

/// Token magic prefix.
pub const TOKEN_MAGIC: &str = "AT";

/// Maximum payload the 6-digit legacy length field can describe. The
/// compact format keeps the same ceiling for token-family consistency.
pub const MAX_PAYLOAD_BYTES: usize = 999_999;

/// Width of the legacy length header.
const LENGTH_DIGITS: usize = 6;

/// Token format versions. A closed set: decode support is never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVersion {
    /// Legacy raw decimal (version digit `0`).
    Legacy0,
    /// Legacy gzipped decimal (version digit `1`).
    Legacy1,
    /// Compact dictionary + gzip + base64url (version digit `2`).
    Compact2,
}

impl TokenVersion {
    /// Version digit as it appears on the wire.
    pub fn digit(self) -> char {
        match self {
            TokenVersion::Legacy0 => '0',
            TokenVersion::Legacy1 => '1',
            TokenVersion::Compact2 => '2',
        }
    }

    /// Identify the version of a token without decoding it.
    ///
    /// Soft-miss: `None` for strings that are not `AT` tokens at all.
    pub fn from_token(token: &str) -> Option<TokenVersion> {
        let rest = token.strip_prefix(TOKEN_MAGIC)?;
        match rest.chars().next()? {
            '0' => Some(TokenVersion::Legacy0),
            '1' => Some(TokenVersion::Legacy1),
            '2' => Some(TokenVersion::Compact2),
            _ => None,
        }
    }
}

/// Encoding mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeMode {
    /// Dictionary + gzip + base64url (version 2). The default.
    #[default]
    Compact,
    /// Digit-only legacy encoding (version 0 or 1, whichever is smaller).
    Digits,
}

/// Check whether a string is a short-URL token of any known version.
/// Cheap prefix test, no decoding.
pub fn is_short_url_token(candidate: &str) -> bool {
    TokenVersion::from_token(candidate).is_some()
}

/// Encode a URL as a compact version-2 token.
pub fn encode_short_url(url: &str) -> Result<String> {
    encode_short_url_with_mode(url, EncodeMode::Compact)
}

/// Encode a URL in the requested mode.
pub fn encode_short_url_with_mode(url: &str, mode: EncodeMode) -> Result<String> {
    match mode {
        EncodeMode::Compact => encode_compact(url),
        EncodeMode::Digits => encode_digits(url),
    }
}

fn encode_compact(url: &str) -> Result<String> {
    let matched = dictionary::find_best_match(url);
    tracing::debug!(dict_id = matched.id, "encoding compact short-url token");

    let mut payload = Vec::with_capacity(matched.remainder.len() + 1);
    payload.push(matched.id);
    payload.extend_from_slice(matched.remainder.as_bytes());

    let compressed = gzip_bytes(&payload)?;
    if compressed.len() > MAX_PAYLOAD_BYTES {
        return Err(UrlPackError::TooLarge {
            size: compressed.len(),
            max: MAX_PAYLOAD_BYTES,
        });
    }

    Ok(format!(
        "{TOKEN_MAGIC}{}{}",
        TokenVersion::Compact2.digit(),
        bytes_to_base64_url(&compressed)
    ))
}

fn encode_digits(url: &str) -> Result<String> {
    let raw = url.as_bytes();
    let gzipped = gzip_bytes(raw)?;

    // Gzip only pays off past a length the header overhead amortizes;
    // pick whichever body is shorter and stamp the matching version.
    let (version, body): (TokenVersion, &[u8]) = if gzipped.len() < raw.len() {
        (TokenVersion::Legacy1, &gzipped)
    } else {
        (TokenVersion::Legacy0, raw)
    };

    if body.len() > MAX_PAYLOAD_BYTES {
        return Err(UrlPackError::TooLarge {
            size: body.len(),
            max: MAX_PAYLOAD_BYTES,
        });
    }

    Ok(format!(
        "{TOKEN_MAGIC}{}{:0width$}{}",
        version.digit(),
        body.len(),
        bytes_to_decimal(body),
        width = LENGTH_DIGITS
    ))
}

/// Decode any version of `AT` token back to the original URL.
pub fn decode_short_url(token: &str) -> Result<String> {
    let rest = token
        .strip_prefix(TOKEN_MAGIC)
        .ok_or_else(|| UrlPackError::InvalidToken("missing AT magic".to_string()))?;

    let version = TokenVersion::from_token(token)
        .ok_or_else(|| UrlPackError::InvalidToken("unknown version digit".to_string()))?;
    let body = &rest[1..];

    let url = match version {
        TokenVersion::Compact2 => decode_compact(body)?,
        TokenVersion::Legacy0 => decode_digits(body, false)?,
        TokenVersion::Legacy1 => decode_digits(body, true)?,
    };

    validate_http_url(&url)?;
    Ok(url)
}

fn decode_compact(body: &str) -> Result<String> {
    if body.is_empty() || !is_url_safe_alphabet(body) {
        return Err(UrlPackError::InvalidToken(
            "compact body is not base64url".to_string(),
        ));
    }
    // A body that passes the alphabet check can still have an invalid
    // base64 length; that is a malformed token, not a stream failure.
    let compressed = base64_url_to_bytes(body)
        .map_err(|e| UrlPackError::InvalidToken(format!("compact body: {e}")))?;
    let payload = gunzip_bytes(&compressed)?;
    let (&dict_id, remainder) = payload
        .split_first()
        .ok_or_else(|| UrlPackError::InvalidToken("empty compact payload".to_string()))?;

    let remainder = std::str::from_utf8(remainder)
        .map_err(|e| UrlPackError::InvalidToken(format!("remainder not UTF-8: {e}")))?;
    Ok(format!("{}{}", dictionary::prefix_by_id(dict_id), remainder))
}

fn decode_digits(body: &str, gzipped: bool) -> Result<String> {
    if body.len() <= LENGTH_DIGITS {
        return Err(UrlPackError::InvalidToken("token too short".to_string()));
    }
    let (header, digits) = body.split_at(LENGTH_DIGITS);
    let expected_len: usize = header.parse().map_err(|_| {
        UrlPackError::InvalidToken(format!("bad length header {header:?}"))
    })?;

    let bytes = decimal_to_bytes(digits, Some(expected_len)).map_err(|e| match e {
        UrlPackError::Format(msg) => UrlPackError::InvalidToken(msg),
        other => other,
    })?;

    let raw = if gzipped { gunzip_bytes(&bytes)? } else { bytes };
    String::from_utf8(raw)
        .map_err(|e| UrlPackError::InvalidToken(format!("payload not UTF-8: {e}")))
}

fn validate_http_url(candidate: &str) -> Result<()> {
    let parsed = url::Url::parse(candidate)
        .map_err(|e| UrlPackError::InvalidUrl(format!("{candidate:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(UrlPackError::InvalidUrl(format!(
            "unsupported scheme {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_roundtrip_dictionary_hit() {
        let url = "https://github.com/foo/bar";
        let token = encode_short_url(url).unwrap();
        assert!(token.starts_with("AT2"));
        assert_eq!(decode_short_url(&token).unwrap(), url);
    }

    #[test]
    fn test_compact_roundtrip_no_dictionary_hit() {
        // Only the bare "https://" prefix matches; the rest rides as
        // the gzipped remainder.
        let url = "https://obscure-host.example:8443/deep/path?q=1#frag";
        let token = encode_short_url(url).unwrap();
        assert_eq!(decode_short_url(&token).unwrap(), url);
    }

    #[test]
    fn test_digits_roundtrip_both_versions() {
        // Short URL: gzip overhead dominates, expect version 0
        let short = "https://x.com/a";
        let token = encode_short_url_with_mode(short, EncodeMode::Digits).unwrap();
        assert!(token.starts_with("AT0"));
        assert!(token[2..].bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(decode_short_url(&token).unwrap(), short);

        // Long repetitive URL: gzip wins, expect version 1
        let long = format!("https://example.com/{}", "segment/".repeat(40));
        let token = encode_short_url_with_mode(&long, EncodeMode::Digits).unwrap();
        assert!(token.starts_with("AT1"));
        assert_eq!(decode_short_url(&token).unwrap(), long);
    }

    #[test]
    fn test_version_detection() {
        assert_eq!(TokenVersion::from_token("AT2abcd"), Some(TokenVersion::Compact2));
        assert_eq!(TokenVersion::from_token("AT0000005123"), Some(TokenVersion::Legacy0));
        assert_eq!(TokenVersion::from_token("AT9zzz"), None);
        assert_eq!(TokenVersion::from_token("XY2abcd"), None);
        assert!(is_short_url_token("AT2abcd"));
        assert!(!is_short_url_token("https://example.com"));
    }

    #[test]
    fn test_bad_magic_and_version() {
        assert!(matches!(
            decode_short_url("QR2abcd"),
            Err(UrlPackError::InvalidToken(_))
        ));
        assert!(matches!(
            decode_short_url("AT7abcd"),
            Err(UrlPackError::InvalidToken(_))
        ));
        assert!(matches!(
            decode_short_url("AT"),
            Err(UrlPackError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_legacy_length_header_mismatch() {
        // Declared length 2 but the value needs more bytes
        let token = format!("AT0{:06}{}", 2, bytes_to_decimal(b"https://a.example/"));
        assert!(matches!(
            decode_short_url(&token),
            Err(UrlPackError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_legacy_non_digit_payload() {
        assert!(matches!(
            decode_short_url("AT0000004abcd"),
            Err(UrlPackError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_non_url_payload_rejected() {
        // Build a valid compact token whose payload is not an http(s) URL
        let mut payload = vec![0u8];
        payload.extend_from_slice(b"not a url at all");
        let compressed = gzip_bytes(&payload).unwrap();
        let token = format!("AT2{}", bytes_to_base64_url(&compressed));
        assert!(matches!(
            decode_short_url(&token),
            Err(UrlPackError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_corrupt_compact_body() {
        assert!(decode_short_url("AT2!!!!").is_err());
        assert!(decode_short_url("AT2AAAAAAAA").is_err());
    }

    #[test]
    fn test_compact_bad_base64_length_is_invalid_token() {
        // 5 body chars: URL-safe alphabet, impossible base64 length
        assert!(matches!(
            decode_short_url("AT2AAAAA"),
            Err(UrlPackError::InvalidToken(_))
        ));
    }
}
