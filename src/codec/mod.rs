//! Core codec primitives for URL-embedded payloads.
//!
//! Layered bottom-up; each layer only calls the ones below it:
//!
//! | Layer | Wire form | Module |
//! |-------|-----------|--------|
//! | Base64 / URL-safe transcoding | `-`/`_` alphabet, no padding | [`base64`] |
//! | Big-integer decimal           | pure decimal digits          | [`bigint`] |
//! | Gzip engine                   | url-safe base64 of gzip      | [`compress`] |
//! | Typed-bytes payload           | `b-<base64url>`              | [`typed`] |
//! | Media codecs                  | `b-…` or percent-encoded     | [`media`] |

pub mod base64;
pub mod bigint;
pub mod compress;
pub mod media;
pub mod typed;

pub use media::{decode as decode_media, encode_data_url, DecodedMedia, MediaKind};
pub use typed::TypedPayload;

/// Gzip magic bytes (`1f 8b`) re-encoded in base64 always start with this.
pub const GZIP_BASE64_PREFIX: &str = "H4sI";

/// Check whether a payload looks like a gzip stream that went through the
/// base64 step, i.e. a candidate for the compressed-token fallback probes.
/// Length gate filters out short strings that start with `H4sI` by chance.
pub fn looks_like_gzip_blob(payload: &str) -> bool {
    payload.len() >= 16 && payload.starts_with(GZIP_BASE64_PREFIX)
}
