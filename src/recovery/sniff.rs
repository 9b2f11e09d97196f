//! Content sniffing for untagged payloads.
//!
//! Two flavors: magic-byte signatures for binary buffers and cheap
//! syntactic heuristics for text. Both are last-resort probes; a payload
//! with an explicit tag never gets here.

use super::types::ContentType;

/// One magic-byte rule: `signature` expected at `offset`.
///
/// Matched in declaration order; keep the table data-driven so new
/// formats are additive.
struct MagicRule {
    offset: usize,
    signature: &'static [u8],
    content_type: ContentType,
}

static MAGIC_RULES: &[MagicRule] = &[
    MagicRule { offset: 0, signature: b"%PDF", content_type: ContentType::Pdf },
    // PNG / JPEG / GIF
    MagicRule { offset: 0, signature: &[0x89, 0x50, 0x4E, 0x47], content_type: ContentType::Image },
    MagicRule { offset: 0, signature: &[0xFF, 0xD8, 0xFF], content_type: ContentType::Image },
    MagicRule { offset: 0, signature: b"GIF8", content_type: ContentType::Image },
    // ISO BMFF (mp4/mov family) carries "ftyp" after the box length
    MagicRule { offset: 4, signature: b"ftyp", content_type: ContentType::Video },
    // EBML header (webm/mkv)
    MagicRule { offset: 0, signature: &[0x1A, 0x45, 0xDF, 0xA3], content_type: ContentType::Video },
    MagicRule { offset: 0, signature: b"OggS", content_type: ContentType::Audio },
    // RIFF container (wav)
    MagicRule { offset: 0, signature: b"RIFF", content_type: ContentType::Audio },
    // ZIP local-file header: the whole OOXML office family. Telling
    // xlsx/docx/pptx apart needs central-directory inspection; xlsx is
    // the default approximation.
    MagicRule { offset: 0, signature: b"PK", content_type: ContentType::Xlsx },
];

/// Identify a binary buffer by magic bytes; [`ContentType::Txt`] when no
/// rule matches.
pub fn sniff_bytes(data: &[u8]) -> ContentType {
    for rule in MAGIC_RULES {
        let end = rule.offset + rule.signature.len();
        if data.len() >= end && &data[rule.offset..end] == rule.signature {
            return rule.content_type;
        }
    }
    ContentType::Txt
}

/// Classify decompressed text as html, markdown, csv, or plain text.
pub fn sniff_text(text: &str) -> ContentType {
    let trimmed = text.trim_start();
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("<!doctype html")
        || lower.starts_with("<html")
        || lower.contains("<body")
        || lower.contains("<div")
        || lower.contains("</p>")
    {
        return ContentType::Html;
    }

    let has_heading = text
        .lines()
        .any(|line| line.starts_with('#') && line.trim_start_matches('#').starts_with(' '));
    let has_link = text.contains("](");
    if has_heading || has_link {
        return ContentType::Md;
    }

    // Commas on multiple lines with a consistent-looking first row
    if text.contains(',') && text.contains('\n') {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        if let (Some(first), Some(second)) = (lines.next(), lines.next()) {
            if first.contains(',') && second.contains(',') {
                return ContentType::Csv;
            }
        }
    }

    ContentType::Txt
}
