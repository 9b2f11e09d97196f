//! Stability guarantees: every table in the crate is an append-only log.
//! These tests pin shipped assignments so a refactor that renumbers an
//! id, recodes a letter, or alters a wire prefix fails loudly here
//! instead of silently breaking links already in the wild.

use urlpack::codec::bigint::bytes_to_decimal;
use urlpack::codec::typed;
use urlpack::recovery::{decode_platform_type, encode_platform_type, ContentType};
use urlpack::shorturl::refcode::{decode as decode_ref, RefTarget};
use urlpack::shorturl::{decode_short_url, find_best_match, prefix_by_id, TokenVersion};

#[test]
fn token_magic_and_versions_are_pinned() {
    assert_eq!(TokenVersion::from_token("AT0000015whatever"), Some(TokenVersion::Legacy0));
    assert_eq!(TokenVersion::from_token("AT1000015whatever"), Some(TokenVersion::Legacy1));
    assert_eq!(TokenVersion::from_token("AT2H4sIAAAA"), Some(TokenVersion::Compact2));
    assert_eq!(TokenVersion::from_token("AT3future"), None);
    assert_eq!(TokenVersion::Legacy0.digit(), '0');
    assert_eq!(TokenVersion::Legacy1.digit(), '1');
    assert_eq!(TokenVersion::Compact2.digit(), '2');
}

#[test]
fn legacy_v0_token_layout_is_pinned() {
    // A v0 token is reconstructible by hand: magic, version digit,
    // 6-digit zero-padded length, decimal digits of the raw UTF-8 URL.
    let url = "https://x.com/a";
    let token = format!("AT0{:06}{}", url.len(), bytes_to_decimal(url.as_bytes()));
    assert_eq!(decode_short_url(&token).unwrap(), url);
}

#[test]
fn dictionary_ids_are_pinned() {
    for (id, prefix) in [
        (1u8, "https://www.youtube.com/watch?v="),
        (2, "https://www.youtube.com/"),
        (3, "https://youtu.be/"),
        (4, "https://github.com/"),
        (24, "https://www."),
        (25, "https://"),
        (26, "http://www."),
        (27, "http://"),
    ] {
        assert_eq!(prefix_by_id(id), prefix, "dictionary id {id} changed");
    }
}

#[test]
fn dictionary_longest_match_is_deterministic() {
    let m = find_best_match("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(m.id, 1);
    assert_eq!(m.remainder, "dQw4w9WgXcQ");
}

#[test]
fn refcodes_are_pinned() {
    for (input, expected) in [
        ("yt-abc", RefTarget::Absolute("https://www.youtube.com/watch?v=abc".to_string())),
        ("gh-rust-lang/rust", RefTarget::Absolute("https://github.com/rust-lang/rust".to_string())),
        ("wk-Rust_(programming_language)", RefTarget::Absolute(
            "https://en.wikipedia.org/wiki/Rust_(programming_language)".to_string(),
        )),
        ("r-image?d=abc", RefTarget::Path("/render/image/?d=abc".to_string())),
        ("k-", RefTarget::Path("/chat-link/".to_string())),
    ] {
        assert_eq!(decode_ref(input), Some(expected), "refcode {input} changed");
    }
}

#[test]
fn platform_type_codes_are_pinned() {
    let pinned = [
        (ContentType::Html, "html", "h"),
        (ContentType::Md, "md", "m"),
        (ContentType::Csv, "csv", "c"),
        (ContentType::Txt, "txt", "t"),
        (ContentType::Xlsx, "xlsx", "x"),
        (ContentType::Xls, "xls", "l"),
        (ContentType::Docx, "docx", "d"),
        (ContentType::Doc, "doc", "D"),
        (ContentType::Pptx, "pptx", "p"),
        (ContentType::Ppt, "ppt", "P"),
        (ContentType::Pdf, "pdf", "f"),
        (ContentType::Image, "image", "i"),
        (ContentType::Video, "video", "v"),
        (ContentType::Audio, "audio", "a"),
        (ContentType::Chat, "chat", "k"),
    ];
    assert_eq!(pinned.len(), ContentType::ALL.len(), "type added without pinning");
    for (content_type, name, code) in pinned {
        assert_eq!(content_type.as_str(), name);
        assert_eq!(encode_platform_type(content_type), code);
        assert_eq!(decode_platform_type(name), Some(content_type));
        assert_eq!(decode_platform_type(code), Some(content_type));
    }
}

#[test]
fn typed_bytes_prefix_is_pinned() {
    // The compact media wire format: "b-" then base64url(tag ++ bytes).
    // AQID = [1, 2, 3] - tag 1 with payload [2, 3].
    let payload = typed::decode("b-AQID").unwrap();
    assert_eq!(payload.type_id, 1);
    assert_eq!(payload.bytes, vec![2, 3]);
    assert_eq!(typed::encode(1, &[2, 3]), "b-AQID");
}
