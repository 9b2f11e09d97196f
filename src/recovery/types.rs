//! Content-type tags and the 1-character code bijection.
//!
//! Tagged payloads carry their type as either the full name (`html-...`)
//! or a single-letter code (`h-...`). New links prefer the code form,
//! which saves up to four characters of budget per link; decode accepts
//! both forever. The letter assignment is bijective and case-sensitive
//! (`d` = docx, `D` = doc) and, like every table in this crate,
//! append-only.

use phf::phf_map;

/// Exact-mime mappings for document formats. Media families are matched
/// on their mime prefix instead, see [`content_type_for_mime`].
static MIME_TAGS: phf::Map<&'static str, ContentType> = phf_map! {
    "application/pdf" => ContentType::Pdf,
    "text/html" => ContentType::Html,
    "text/markdown" => ContentType::Md,
    "text/csv" => ContentType::Csv,
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => ContentType::Xlsx,
    "application/vnd.ms-excel" => ContentType::Xls,
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ContentType::Docx,
    "application/msword" => ContentType::Doc,
    "application/vnd.openxmlformats-officedocument.presentationml.presentation" => ContentType::Pptx,
    "application/vnd.ms-powerpoint" => ContentType::Ppt,
};

/// Closed set of content types a payload can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// HTML documents.
    Html,
    /// Markdown documents.
    Md,
    /// Comma-separated tables.
    Csv,
    /// Plain text (also the sniffing fallback).
    Txt,
    /// Excel workbook (OOXML).
    Xlsx,
    /// Excel workbook (legacy binary).
    Xls,
    /// Word document (OOXML).
    Docx,
    /// Word document (legacy binary).
    Doc,
    /// PowerPoint deck (OOXML).
    Pptx,
    /// PowerPoint deck (legacy binary).
    Ppt,
    /// PDF documents.
    Pdf,
    /// Images of any supported subtype.
    Image,
    /// Video clips.
    Video,
    /// Audio clips.
    Audio,
    /// Chat transcripts.
    Chat,
}

impl ContentType {
    /// All members, for table-coverage tests and iteration.
    pub const ALL: &'static [ContentType] = &[
        ContentType::Html,
        ContentType::Md,
        ContentType::Csv,
        ContentType::Txt,
        ContentType::Xlsx,
        ContentType::Xls,
        ContentType::Docx,
        ContentType::Doc,
        ContentType::Pptx,
        ContentType::Ppt,
        ContentType::Pdf,
        ContentType::Image,
        ContentType::Video,
        ContentType::Audio,
        ContentType::Chat,
    ];

    /// Full tag name as it appears in `<tag>-<payload>` tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Html => "html",
            ContentType::Md => "md",
            ContentType::Csv => "csv",
            ContentType::Txt => "txt",
            ContentType::Xlsx => "xlsx",
            ContentType::Xls => "xls",
            ContentType::Docx => "docx",
            ContentType::Doc => "doc",
            ContentType::Pptx => "pptx",
            ContentType::Ppt => "ppt",
            ContentType::Pdf => "pdf",
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::Chat => "chat",
        }
    }

    /// One-character code. Case-sensitive: OOXML formats take the
    /// lowercase letter, their legacy predecessors the uppercase one.
    pub fn short_code(self) -> &'static str {
        match self {
            ContentType::Html => "h",
            ContentType::Md => "m",
            ContentType::Csv => "c",
            ContentType::Txt => "t",
            ContentType::Xlsx => "x",
            ContentType::Xls => "l",
            ContentType::Docx => "d",
            ContentType::Doc => "D",
            ContentType::Pptx => "p",
            ContentType::Ppt => "P",
            ContentType::Pdf => "f",
            ContentType::Image => "i",
            ContentType::Video => "v",
            ContentType::Audio => "a",
            ContentType::Chat => "k",
        }
    }

    /// Whether this type's payload is a media/typed-bytes family member.
    pub fn is_media(self) -> bool {
        matches!(
            self,
            ContentType::Pdf | ContentType::Image | ContentType::Video | ContentType::Audio
        )
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a tag that may be a full name or a 1-char code. Identity on
/// full names; `None` for anything outside the closed set.
pub fn decode_platform_type(tag: &str) -> Option<ContentType> {
    ContentType::ALL
        .iter()
        .copied()
        .find(|t| t.as_str() == tag || t.short_code() == tag)
}

/// Shortest tag for a type, for building new links.
pub fn encode_platform_type(content_type: ContentType) -> &'static str {
    content_type.short_code()
}

/// Map a data-URL mime type onto a content-type tag.
///
/// Media families match on their prefix; document formats on the exact
/// mime. Everything unrecognized falls back to [`ContentType::Txt`].
pub fn content_type_for_mime(mime: &str) -> ContentType {
    if let Some(&t) = MIME_TAGS.get(mime) {
        return t;
    }
    if mime.starts_with("image/") {
        ContentType::Image
    } else if mime.starts_with("video/") {
        ContentType::Video
    } else if mime.starts_with("audio/") {
        ContentType::Audio
    } else {
        ContentType::Txt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_bijective() {
        let mut seen = std::collections::HashSet::new();
        for &t in ContentType::ALL {
            assert!(
                seen.insert(t.short_code()),
                "code {} assigned twice",
                t.short_code()
            );
            assert_eq!(t.short_code().len(), 1);
        }
    }

    #[test]
    fn test_decode_accepts_both_forms() {
        for &t in ContentType::ALL {
            assert_eq!(decode_platform_type(t.as_str()), Some(t));
            assert_eq!(decode_platform_type(t.short_code()), Some(t));
        }
        assert_eq!(decode_platform_type("unknown"), None);
        assert_eq!(decode_platform_type(""), None);
    }

    #[test]
    fn test_case_sensitive_office_codes() {
        assert_eq!(decode_platform_type("d"), Some(ContentType::Docx));
        assert_eq!(decode_platform_type("D"), Some(ContentType::Doc));
        assert_eq!(decode_platform_type("p"), Some(ContentType::Pptx));
        assert_eq!(decode_platform_type("P"), Some(ContentType::Ppt));
    }

    #[test]
    fn test_codes_are_stable() {
        // Issued links embed these letters; they can never change.
        let expected = [
            ("html", "h"),
            ("md", "m"),
            ("csv", "c"),
            ("txt", "t"),
            ("xlsx", "x"),
            ("xls", "l"),
            ("docx", "d"),
            ("doc", "D"),
            ("pptx", "p"),
            ("ppt", "P"),
            ("pdf", "f"),
            ("image", "i"),
            ("video", "v"),
            ("audio", "a"),
            ("chat", "k"),
        ];
        for (name, code) in expected {
            let t = decode_platform_type(name).unwrap();
            assert_eq!(encode_platform_type(t), code);
        }
    }

    #[test]
    fn test_mime_mapping() {
        assert_eq!(content_type_for_mime("application/pdf"), ContentType::Pdf);
        assert_eq!(content_type_for_mime("image/webp"), ContentType::Image);
        assert_eq!(content_type_for_mime("video/mp4"), ContentType::Video);
        assert_eq!(content_type_for_mime("audio/ogg"), ContentType::Audio);
        assert_eq!(content_type_for_mime("text/html"), ContentType::Html);
        assert_eq!(
            content_type_for_mime("application/octet-stream"),
            ContentType::Txt
        );
    }
}
