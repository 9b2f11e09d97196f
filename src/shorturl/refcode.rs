//! Reference codes: 1–3 character mnemonics for known URL prefixes.
//!
//! Unlike the numeric dictionary (an internal detail of the compact
//! token), reference codes are user-visible: `yt-abc123` reads as "the
//! YouTube video abc123". The canonical table is one-to-one and a code's
//! prefix never changes after release. Additional historical prefixes
//! can be folded onto an existing code through the alias list, which is
//! consulted on ENCODE only; decode always reconstructs from the
//! canonical prefix.

use crate::shorturl::insert_slash_before_query;

/// Decoded reference-code target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// A full external URL.
    Absolute(String),
    /// A site-relative path on the hosting origin.
    Path(String),
}

// Canonical table. Append-only; a shipped code keeps its prefix forever.
static REF_CODES: &[(&str, &str)] = &[
    ("yt", "https://www.youtube.com/watch?v="),
    ("ytc", "https://www.youtube.com/"),
    ("gh", "https://github.com/"),
    ("gd", "https://docs.google.com/document/d/"),
    ("gs", "https://docs.google.com/spreadsheets/d/"),
    ("wk", "https://en.wikipedia.org/wiki/"),
    ("tw", "https://x.com/"),
    ("r", "/render/"),
    ("k", "/chat-link/"),
    ("n", "/notepad/"),
];

// Encode-time aliases: many historical prefixes map onto one canonical
// code. Decode never consults this list.
static REF_ALIASES: &[(&str, &str)] = &[
    ("yt", "https://m.youtube.com/watch?v="),
    ("yt", "https://youtu.be/"),
    ("ytc", "https://m.youtube.com/"),
    ("tw", "https://twitter.com/"),
    ("tw", "https://mobile.twitter.com/"),
];

/// Encode a URL as `<code>-<remainder>` using the longest matching
/// canonical or alias prefix. Returns `None` when no prefix matches.
///
/// Three candidate spellings of the URL are tried: the URL as given, the
/// URL with `/` inserted before a bare `?`/`#` (trailing-slash route
/// variants), and, for absolute URLs, just its path+query+fragment.
pub fn encode(url: &str) -> Option<String> {
    let mut candidates: Vec<String> = vec![url.to_string()];

    let slashed = insert_slash_before_query(url);
    if slashed != url {
        candidates.push(slashed);
    }

    if let Ok(parsed) = url::Url::parse(url) {
        if parsed.scheme() == "http" || parsed.scheme() == "https" {
            let mut local = parsed.path().to_string();
            if let Some(q) = parsed.query() {
                local.push('?');
                local.push_str(q);
            }
            if let Some(f) = parsed.fragment() {
                local.push('#');
                local.push_str(f);
            }
            candidates.push(local);
        }
    }

    let mut best: Option<(&str, String)> = None;
    let mut best_len = 0;
    for candidate in &candidates {
        for &(code, prefix) in REF_CODES.iter().chain(REF_ALIASES) {
            if candidate.starts_with(prefix) && prefix.len() > best_len {
                best_len = prefix.len();
                best = Some((code, candidate[prefix.len()..].to_string()));
            }
        }
    }

    best.map(|(code, rest)| format!("{code}-{rest}"))
}

/// Decode a `<code>-<remainder>` string back to its target.
///
/// The code is matched case-insensitively against the canonical table.
/// Soft-miss contract: `None` for anything that is not a known
/// reference code.
pub fn decode(input: &str) -> Option<RefTarget> {
    let (code_raw, rest) = input.split_once('-')?;
    if code_raw.is_empty() || code_raw.len() > 3 {
        return None;
    }
    if !code_raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let code = code_raw.to_ascii_lowercase();
    let prefix = REF_CODES
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, p)| p)?;

    let target = format!("{prefix}{rest}");
    if target.starts_with("http://") || target.starts_with("https://") {
        Some(RefTarget::Absolute(target))
    } else {
        // The static host serves directory-style routes; without the
        // trailing slash it redirects and drops the fragment.
        Some(RefTarget::Path(insert_slash_before_query(&target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_roundtrip() {
        let encoded = encode("https://www.youtube.com/watch?v=abc123").unwrap();
        assert_eq!(encoded, "yt-abc123");
        assert_eq!(
            decode("yt-abc123"),
            Some(RefTarget::Absolute(
                "https://www.youtube.com/watch?v=abc123".to_string()
            ))
        );
    }

    #[test]
    fn test_alias_encodes_to_canonical_code() {
        // youtu.be is an encode-time alias of yt; decode reconstructs the
        // canonical watch?v= form.
        let encoded = encode("https://youtu.be/abc123").unwrap();
        assert_eq!(encoded, "yt-abc123");

        let encoded = encode("https://twitter.com/someone").unwrap();
        assert_eq!(encoded, "tw-someone");
        assert_eq!(
            decode("tw-someone"),
            Some(RefTarget::Absolute("https://x.com/someone".to_string()))
        );
    }

    #[test]
    fn test_longest_prefix_wins_over_shorter_code() {
        // Both yt (watch?v=) and ytc (site root) match; yt's prefix is
        // longer, so it must win.
        assert_eq!(
            encode("https://www.youtube.com/watch?v=xyz").unwrap(),
            "yt-xyz"
        );
        assert_eq!(
            encode("https://www.youtube.com/playlist?list=PL1").unwrap(),
            "ytc-playlist?list=PL1"
        );
    }

    #[test]
    fn test_absolute_url_matches_local_path_prefix() {
        let encoded = encode("https://pack.example/render/pdf?data=abc").unwrap();
        assert_eq!(encoded, "r-pdf?data=abc");
    }

    #[test]
    fn test_path_decode_gains_trailing_slash() {
        assert_eq!(
            decode("r-pdf?data=abc"),
            Some(RefTarget::Path("/render/pdf/?data=abc".to_string()))
        );
        // Already-slashed paths are untouched
        assert_eq!(
            decode("k-#d=chat-xyz"),
            Some(RefTarget::Path("/chat-link/#d=chat-xyz".to_string()))
        );
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(
            decode("YT-abc"),
            Some(RefTarget::Absolute(
                "https://www.youtube.com/watch?v=abc".to_string()
            ))
        );
    }

    #[test]
    fn test_soft_miss() {
        assert_eq!(encode("https://no-known-prefix.example/x"), None);
        assert_eq!(decode("zzz-payload"), None);
        assert_eq!(decode("toolong-payload"), None);
        assert_eq!(decode("nodash"), None);
    }

    #[test]
    fn test_codes_unique_and_well_formed() {
        let mut seen = std::collections::HashSet::new();
        for &(code, prefix) in REF_CODES {
            assert!(
                (1..=3).contains(&code.len()),
                "code {code:?} must be 1-3 chars"
            );
            assert!(code.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
            assert!(seen.insert(code), "duplicate code {code}");
            assert!(!prefix.is_empty());
        }
        // Every alias points at an existing canonical code
        for &(code, _) in REF_ALIASES {
            assert!(
                REF_CODES.iter().any(|&(c, _)| c == code),
                "alias targets unknown code {code}"
            );
        }
    }

    #[test]
    fn test_table_is_stable() {
        // Shipped codes keep their canonical prefix forever.
        for (code, prefix) in [
            ("yt", "https://www.youtube.com/watch?v="),
            ("gh", "https://github.com/"),
            ("r", "/render/"),
            ("k", "/chat-link/"),
        ] {
            assert_eq!(
                REF_CODES.iter().find(|&&(c, _)| c == code).map(|&(_, p)| p),
                Some(prefix)
            );
        }
    }
}
