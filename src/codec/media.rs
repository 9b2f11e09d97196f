//! Per-media codecs: image, pdf, audio, video.
//!
//! Each media family owns a small closed mime ↔ type-id table and
//! translates between browser data-URLs and compact typed-bytes tokens.
//! The tables are append-only: a type id, once shipped, must decode to
//! the same mime forever, because issued links never expire.
//!
//! Encoding never fails for well-formed string input. A data-URL that
//! does not match the family's anchored regex falls back to the legacy
//! percent-encoded form, which older decoders already understand.
//! Decoding tries the compact form first and, on success, hands back raw
//! bytes WITHOUT re-materializing a base64 data-URL string; large media
//! must not be inflated twice in memory.

use lazy_static::lazy_static;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use super::base64::base64_to_bytes;
use super::typed;
use crate::error::{Result, UrlPackError};

/// Percent-encode set matching JavaScript `encodeURIComponent`: everything
/// except alphanumerics and `- _ . ! ~ * ' ( )`.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

lazy_static! {
    static ref IMAGE_DATA_URL: Regex =
        Regex::new(r"^data:image/([a-zA-Z0-9.+-]+);base64,(.*)$").unwrap();
    static ref PDF_DATA_URL: Regex =
        Regex::new(r"^data:application/pdf;base64,(.*)$").unwrap();
    static ref AUDIO_DATA_URL: Regex =
        Regex::new(r"^data:audio/([a-zA-Z0-9.+-]+);base64,(.*)$").unwrap();
    static ref VIDEO_DATA_URL: Regex =
        Regex::new(r"^data:video/([a-zA-Z0-9.+-]+);base64,(.*)$").unwrap();
}

/// Media families with a compact typed-bytes representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Raster and vector images.
    Image,
    /// PDF documents.
    Pdf,
    /// Audio clips.
    Audio,
    /// Video clips.
    Video,
}

/// One row of a media family's closed type table.
///
/// `subtype` is the mime subtype under the family prefix (`png` under
/// `image/`); `extension` is the download filename extension.
struct TypeEntry {
    id: u8,
    subtype: &'static str,
    extension: &'static str,
}

// Append-only. Never renumber: issued tokens embed these ids.
static IMAGE_TYPES: &[TypeEntry] = &[
    TypeEntry { id: 1, subtype: "png", extension: "png" },
    TypeEntry { id: 2, subtype: "jpeg", extension: "jpg" },
    TypeEntry { id: 3, subtype: "jpg", extension: "jpg" },
    TypeEntry { id: 4, subtype: "gif", extension: "gif" },
    TypeEntry { id: 5, subtype: "webp", extension: "webp" },
    TypeEntry { id: 6, subtype: "svg+xml", extension: "svg" },
];

static PDF_TYPES: &[TypeEntry] = &[
    TypeEntry { id: 1, subtype: "pdf", extension: "pdf" },
];

static AUDIO_TYPES: &[TypeEntry] = &[
    TypeEntry { id: 1, subtype: "mpeg", extension: "mp3" },
    TypeEntry { id: 2, subtype: "mp3", extension: "mp3" },
    TypeEntry { id: 3, subtype: "wav", extension: "wav" },
    TypeEntry { id: 4, subtype: "ogg", extension: "ogg" },
    TypeEntry { id: 5, subtype: "webm", extension: "webm" },
    TypeEntry { id: 6, subtype: "aac", extension: "aac" },
    TypeEntry { id: 7, subtype: "flac", extension: "flac" },
    TypeEntry { id: 8, subtype: "x-m4a", extension: "m4a" },
];

static VIDEO_TYPES: &[TypeEntry] = &[
    TypeEntry { id: 1, subtype: "mp4", extension: "mp4" },
    TypeEntry { id: 2, subtype: "webm", extension: "webm" },
    TypeEntry { id: 3, subtype: "ogg", extension: "ogv" },
    TypeEntry { id: 4, subtype: "quicktime", extension: "mov" },
    TypeEntry { id: 5, subtype: "x-m4v", extension: "m4v" },
];

impl MediaKind {
    /// Mime family prefix, e.g. `image/`.
    pub fn mime_prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Pdf => "application/",
            MediaKind::Audio => "audio/",
            MediaKind::Video => "video/",
        }
    }

    /// Default download extension when the type is unknown.
    pub fn default_extension(self) -> &'static str {
        match self {
            MediaKind::Image => "png",
            MediaKind::Pdf => "pdf",
            MediaKind::Audio => "mp3",
            MediaKind::Video => "mp4",
        }
    }

    fn table(self) -> &'static [TypeEntry] {
        match self {
            MediaKind::Image => IMAGE_TYPES,
            MediaKind::Pdf => PDF_TYPES,
            MediaKind::Audio => AUDIO_TYPES,
            MediaKind::Video => VIDEO_TYPES,
        }
    }

    fn data_url_regex(self) -> &'static Regex {
        match self {
            MediaKind::Image => &IMAGE_DATA_URL,
            MediaKind::Pdf => &PDF_DATA_URL,
            MediaKind::Audio => &AUDIO_DATA_URL,
            MediaKind::Video => &VIDEO_DATA_URL,
        }
    }

    fn type_id_for_subtype(self, subtype: &str) -> u8 {
        self.table()
            .iter()
            .find(|e| e.subtype == subtype)
            .map_or(0, |e| e.id)
    }

    fn entry_by_id(self, id: u8) -> Option<&'static TypeEntry> {
        self.table().iter().find(|e| e.id == id)
    }

    /// Full default mime for the family (used for type id 0).
    fn default_mime(self) -> String {
        match self {
            MediaKind::Pdf => "application/pdf".to_string(),
            _ => format!("{}{}", self.mime_prefix(), self.default_extension()),
        }
    }
}

/// Decoded media payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMedia {
    /// Full mime type, e.g. `image/png`.
    pub mime_type: String,
    /// Download extension, e.g. `png`.
    pub extension: String,
    /// Raw bytes. Present for compact tokens; absent for the legacy
    /// data-URL path, which keeps the string form instead.
    pub bytes: Option<Vec<u8>>,
    /// Original data-URL. Only present on the legacy path; the compact
    /// path never rebuilds it.
    pub data_url: Option<String>,
}

/// Encode a data-URL as a compact typed-bytes token.
///
/// Falls back to `encodeURIComponent`-style escaping of the input
/// verbatim when it is not a well-formed base64 data-URL of this family.
/// That degraded path is legacy-compatible and intentionally not an
/// error: encode never fails for string input.
pub fn encode_data_url(kind: MediaKind, data_url: &str) -> String {
    if let Some(caps) = kind.data_url_regex().captures(data_url) {
        // PDF regex has no subtype group; the body is the last group.
        let (subtype, body) = match kind {
            MediaKind::Pdf => ("pdf", caps.get(1).map_or("", |m| m.as_str())),
            _ => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
        };
        if let Ok(bytes) = base64_to_bytes(body) {
            let type_id = kind.type_id_for_subtype(subtype);
            return typed::encode(type_id, &bytes);
        }
    }
    tracing::debug!(kind = ?kind, "not a data-URL, using percent-encoded fallback");
    utf8_percent_encode(data_url, URI_COMPONENT).to_string()
}

/// Decode a media token produced by [`encode_data_url`].
///
/// Tries the compact typed-bytes form first, then the legacy
/// percent-encoded data-URL form.
pub fn decode(kind: MediaKind, token: &str) -> Result<DecodedMedia> {
    if let Some(payload) = typed::decode(token) {
        let (mime_type, extension) = match kind.entry_by_id(payload.type_id) {
            Some(entry) => (
                format!("{}{}", kind.mime_prefix(), entry.subtype),
                entry.extension.to_string(),
            ),
            None => (kind.default_mime(), kind.default_extension().to_string()),
        };
        return Ok(DecodedMedia {
            mime_type,
            extension,
            bytes: Some(payload.bytes),
            data_url: None,
        });
    }

    // Legacy path: percent-encoded data-URL
    let unescaped = percent_decode_str(token)
        .decode_utf8()
        .map_err(|e| UrlPackError::InvalidData(format!("bad percent-encoding: {e}")))?
        .to_string();
    if let Some(caps) = kind.data_url_regex().captures(&unescaped) {
        let subtype = match kind {
            MediaKind::Pdf => "pdf",
            _ => caps.get(1).map_or("", |m| m.as_str()),
        };
        let extension = kind
            .table()
            .iter()
            .find(|e| e.subtype == subtype)
            .map_or_else(|| kind.default_extension().to_string(), |e| e.extension.to_string());
        let mime_type = match kind {
            MediaKind::Pdf => "application/pdf".to_string(),
            _ => format!("{}{}", kind.mime_prefix(), subtype),
        };
        return Ok(DecodedMedia {
            mime_type,
            extension,
            bytes: None,
            data_url: Some(unescaped),
        });
    }

    Err(UrlPackError::InvalidData(format!(
        "neither compact nor data-URL {:?} payload",
        kind
    )))
}

/// Build a download filename from an extension, sanitized to `[a-z0-9]`.
pub fn download_filename(kind: MediaKind, extension: &str) -> String {
    let clean: String = extension
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    let ext = if clean.is_empty() {
        kind.default_extension()
    } else {
        &clean
    };
    format!("download.{ext}")
}
