//! Prefix dictionary for the compact short-URL token.
//!
//! A URL that starts with a known prefix is encoded as a one-byte
//! dictionary id plus the remainder, which is usually the bulk of the
//! savings before gzip even runs. The table is an append-only log:
//! ids 1..=255 are assigned once and never reused or renumbered, because
//! tokens already in the wild embed them. Id 0 is reserved for "no
//! match" and maps to the empty prefix.

/// A dictionary hit: the id to embed and the unmatched remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMatch<'a> {
    /// Dictionary id, 0 when nothing matched.
    pub id: u8,
    /// The part of the URL after the matched prefix (the whole URL for
    /// id 0).
    pub remainder: &'a str,
}

// Append-only. New entries go at the end with the next free id.
static PREFIXES: &[(u8, &str)] = &[
    (1, "https://www.youtube.com/watch?v="),
    (2, "https://www.youtube.com/"),
    (3, "https://youtu.be/"),
    (4, "https://github.com/"),
    (5, "https://docs.google.com/document/d/"),
    (6, "https://docs.google.com/spreadsheets/d/"),
    (7, "https://docs.google.com/presentation/d/"),
    (8, "https://drive.google.com/"),
    (9, "https://www.google.com/maps/"),
    (10, "https://www.google.com/"),
    (11, "https://en.wikipedia.org/wiki/"),
    (12, "https://www.wikipedia.org/"),
    (13, "https://twitter.com/"),
    (14, "https://x.com/"),
    (15, "https://www.linkedin.com/in/"),
    (16, "https://www.linkedin.com/"),
    (17, "https://www.instagram.com/"),
    (18, "https://www.facebook.com/"),
    (19, "https://www.reddit.com/r/"),
    (20, "https://www.reddit.com/"),
    (21, "https://www.amazon.com/"),
    (22, "https://medium.com/"),
    (23, "https://stackoverflow.com/questions/"),
    (24, "https://www."),
    (25, "https://"),
    (26, "http://www."),
    (27, "http://"),
];

/// Find the longest dictionary prefix of `url`.
///
/// Scans every entry and keeps the longest literal prefix match; id 0
/// with the full URL as remainder when nothing matches. Entries are
/// distinct strings, so "longest wins" is deterministic.
pub fn find_best_match(url: &str) -> DictionaryMatch<'_> {
    let mut best: Option<&(u8, &str)> = None;
    for entry in PREFIXES {
        if url.starts_with(entry.1) {
            match best {
                Some(b) if b.1.len() >= entry.1.len() => {},
                _ => best = Some(entry),
            }
        }
    }
    match best {
        Some(&(id, prefix)) => DictionaryMatch {
            id,
            remainder: &url[prefix.len()..],
        },
        None => DictionaryMatch { id: 0, remainder: url },
    }
}

/// Prefix for a dictionary id; empty string for 0 or an unknown id.
pub fn prefix_by_id(id: u8) -> &'static str {
    PREFIXES
        .iter()
        .find(|&&(entry_id, _)| entry_id == id)
        .map_or("", |&(_, prefix)| prefix)
}
