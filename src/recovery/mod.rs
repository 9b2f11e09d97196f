//! Recovery parser: from an arbitrary URL or payload string back to
//! typed content.
//!
//! This is the union point of every codec in the crate. Links in the
//! wild come in several historical shapes (fragment carriers, query
//! carriers, raw data-URLs, tagged compressed payloads, bare compressed
//! blobs with no tag at all) and all of them must keep decoding forever.
//!
//! The parser is an ordered chain of pure probe functions. Each probe
//! either recognizes the payload and returns [`RecoveryInfo`] or returns
//! `None` so the next probe runs. A probe never partially succeeds:
//! corrupt input inside a recognized format is a miss, not an error, so
//! the caller can keep trying cheaper interpretations.
//!
//! [`parse_recovery_hash`] runs only the strict probes (explicit
//! formats); [`parse_recovery_input`] adds the permissive second pass
//! (type hints from the surrounding URL, typed-bytes probing, gzip-blob
//! sniffing).

pub mod sniff;
pub mod types;

use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::codec::base64::base64_to_bytes;
use crate::codec::compress::{decompress_to_bytes, decompress_to_string};
use crate::codec::{looks_like_gzip_blob, typed};
pub use types::{content_type_for_mime, decode_platform_type, encode_platform_type, ContentType};

lazy_static! {
    static ref DATA_URL: Regex =
        Regex::new(r"^data:([A-Za-z0-9.+/-]+);base64,(.*)$").unwrap();
}

/// Markers that carry a payload inside a larger URL. All four are
/// accepted on decode; new links should emit `#d=`, the shortest pair.
const FRAGMENT_MARKERS: &[&str] = &["#d=", "#data="];
const QUERY_MARKERS: &[&str] = &["?d=", "?data=", "&d=", "&data="];

/// Recovered payload body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveredData {
    /// Textual payload (possibly still compressed, see
    /// [`RecoveryInfo::is_compressed`]).
    Text(String),
    /// Raw binary payload, already decoded.
    Bytes(Vec<u8>),
}

/// Result of a successful recovery parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryInfo {
    /// Normalized content type (1-char codes resolved to full tags).
    pub content_type: ContentType,
    /// The payload body.
    pub data: RecoveredData,
    /// Whether `data` still needs a decompression pass.
    pub is_compressed: bool,
}

/// Input shared by all probes.
struct ProbeCtx<'a> {
    /// Payload substring, extracted from markers and percent-decoded.
    payload: &'a str,
    /// Content-type hint inferred from the surrounding URL, if any.
    hint: Option<ContentType>,
}

type Probe = fn(&ProbeCtx<'_>) -> Option<RecoveryInfo>;

/// Strict probes: explicit self-describing formats only.
static STRICT_PROBES: &[Probe] = &[probe_data_url, probe_tagged];

/// Full chain: strict probes plus the permissive fallbacks.
static ALL_PROBES: &[Probe] = &[
    probe_data_url,
    probe_tagged,
    probe_typed_media,
    probe_gzip_text,
    probe_gzip_bytes,
];

/// Parse a fragment, query string, URL, or bare payload in strict mode.
///
/// Recognizes marker-carried payloads, raw `data:` URLs, and tagged
/// compressed payloads (`html-...`, `h-...`). Returns `None` for
/// anything else; callers then decide whether to run the permissive
/// [`parse_recovery_input`] pass.
pub fn parse_recovery_hash(input: &str) -> Option<RecoveryInfo> {
    let payload = extract_payload(input);
    run_probes(STRICT_PROBES, &ProbeCtx { payload: &payload, hint: None })
}

/// Permissive second pass over the same input.
///
/// Adds three best-effort strategies on top of the strict probes: a
/// content-type hint scraped from `/render/<kind>` or `type=<kind>` in
/// the surrounding URL, typed-bytes probing for media hints (the `b-`
/// prefix is synthesized when absent), and gzip-blob detection with
/// content sniffing for payloads that lost their tag.
pub fn parse_recovery_input(input: &str) -> Option<RecoveryInfo> {
    let payload = extract_payload(input);
    let hint = infer_type_hint(input);
    run_probes(ALL_PROBES, &ProbeCtx { payload: &payload, hint })
}

fn run_probes(probes: &[Probe], ctx: &ProbeCtx<'_>) -> Option<RecoveryInfo> {
    for probe in probes {
        if let Some(info) = probe(ctx) {
            tracing::debug!(content_type = %info.content_type, "recovery probe matched");
            return Some(info);
        }
    }
    tracing::debug!("no recovery probe matched");
    None
}

/// Pull the payload substring out of a larger string via the known
/// markers, then percent-decode it when it looks percent-encoded.
fn extract_payload(input: &str) -> String {
    let mut payload = input;

    for marker in FRAGMENT_MARKERS {
        if let Some(pos) = input.find(marker) {
            // Fragment payloads run to the end of the string
            payload = &input[pos + marker.len()..];
            return maybe_percent_decode(payload);
        }
    }
    for marker in QUERY_MARKERS {
        if let Some(pos) = input.find(marker) {
            let rest = &input[pos + marker.len()..];
            // Query payloads stop at the next parameter or fragment
            let end = rest.find(['&', '#']).unwrap_or(rest.len());
            payload = &rest[..end];
            return maybe_percent_decode(payload);
        }
    }

    maybe_percent_decode(payload)
}

fn maybe_percent_decode(payload: &str) -> String {
    if looks_percent_encoded(payload) {
        if let Ok(decoded) = percent_decode_str(payload).decode_utf8() {
            return decoded.into_owned();
        }
    }
    payload.to_string()
}

fn looks_percent_encoded(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.windows(3).any(|w| {
        w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit()
    })
}

/// Scrape a content-type hint from the surrounding URL: a
/// `/render/<kind>` path segment or a `type=<kind>` query parameter.
fn infer_type_hint(input: &str) -> Option<ContentType> {
    if let Some(pos) = input.find("/render/") {
        let rest = &input[pos + "/render/".len()..];
        let end = rest.find(['/', '?', '#', '&']).unwrap_or(rest.len());
        if let Some(t) = decode_platform_type(&rest[..end]) {
            return Some(t);
        }
    }
    if let Some(pos) = input.find("type=") {
        let rest = &input[pos + "type=".len()..];
        let end = rest.find(['&', '#']).unwrap_or(rest.len());
        if let Some(t) = decode_platform_type(&rest[..end]) {
            return Some(t);
        }
    }
    None
}

fn probe_data_url(ctx: &ProbeCtx<'_>) -> Option<RecoveryInfo> {
    let caps = DATA_URL.captures(ctx.payload)?;
    let mime = caps.get(1)?.as_str();
    let body = caps.get(2)?.as_str();
    // Malformed base64 is a miss, not an error: let later probes try
    let bytes = base64_to_bytes(body).ok()?;
    Some(RecoveryInfo {
        content_type: content_type_for_mime(mime),
        data: RecoveredData::Bytes(bytes),
        is_compressed: false,
    })
}

fn probe_tagged(ctx: &ProbeCtx<'_>) -> Option<RecoveryInfo> {
    let (tag, body) = ctx.payload.split_once('-')?;
    let content_type = decode_platform_type(tag)?;
    Some(RecoveryInfo {
        content_type,
        data: RecoveredData::Text(body.to_string()),
        is_compressed: true,
    })
}

fn probe_typed_media(ctx: &ProbeCtx<'_>) -> Option<RecoveryInfo> {
    let hint = ctx.hint.filter(|t| t.is_media())?;
    let payload = typed::decode(ctx.payload)
        .or_else(|| typed::decode(&format!("{}{}", typed::TYPED_PREFIX, ctx.payload)))?;
    Some(RecoveryInfo {
        content_type: hint,
        data: RecoveredData::Bytes(payload.bytes),
        is_compressed: false,
    })
}

fn probe_gzip_text(ctx: &ProbeCtx<'_>) -> Option<RecoveryInfo> {
    if !looks_like_gzip_blob(ctx.payload) {
        return None;
    }
    let text = decompress_to_string(ctx.payload).ok()?;
    // Binary formats that happen to be valid UTF-8 (zip headers, ASCII
    // PDFs with NULs) must fall through to the magic-byte probe.
    if has_binary_controls(&text) {
        return None;
    }
    Some(RecoveryInfo {
        content_type: sniff::sniff_text(&text),
        data: RecoveredData::Text(text),
        is_compressed: false,
    })
}

fn has_binary_controls(text: &str) -> bool {
    text.bytes()
        .any(|b| b.is_ascii_control() && !matches!(b, b'\t' | b'\n' | b'\r'))
}

fn probe_gzip_bytes(ctx: &ProbeCtx<'_>) -> Option<RecoveryInfo> {
    if !looks_like_gzip_blob(ctx.payload) {
        return None;
    }
    let bytes = decompress_to_bytes(ctx.payload).ok()?;
    Some(RecoveryInfo {
        content_type: sniff::sniff_bytes(&bytes),
        data: RecoveredData::Bytes(bytes),
        is_compressed: false,
    })
}

/// Build the shortest tagged payload for a new link:
/// `<1-char code>-<compressed>`.
pub fn build_tagged_payload(content_type: ContentType, compressed: &str) -> String {
    format!("{}-{}", encode_platform_type(content_type), compressed)
}

/// Wrap a payload in the preferred fragment carrier.
pub fn fragment_for(payload: &str) -> String {
    format!("#d={payload}")
}
