//! Short-URL token subsystem.
//!
//! Three cooperating pieces:
//!
//! - [`dictionary`]: longest-prefix table that swaps a known URL prefix
//!   for a one-byte id inside the compact token.
//! - [`refcode`]: human-readable 1–3 character mnemonic codes for known
//!   prefixes (`yt-abc123`).
//! - [`token`]: the `AT`-prefixed token family itself, covering the
//!   current compact format and both legacy decimal formats.

pub mod dictionary;
pub mod refcode;
pub mod token;

pub use dictionary::{find_best_match, prefix_by_id, DictionaryMatch};
pub use refcode::RefTarget;
pub use token::{
    decode_short_url, encode_short_url, encode_short_url_with_mode, is_short_url_token,
    EncodeMode, TokenVersion,
};

/// Insert a `/` before the first bare `?` or `#`.
///
/// `"/render/pdf?x"` becomes `"/render/pdf/?x"`; already-slashed routes
/// and strings without a query/fragment are returned unchanged. Needed
/// because directory-style static hosts redirect `path?q` to `path/?q`,
/// losing the fragment on the way.
pub(crate) fn insert_slash_before_query(s: &str) -> String {
    match s.find(['?', '#']) {
        Some(idx) if idx > 0 && s.as_bytes()[idx - 1] != b'/' => {
            format!("{}/{}", &s[..idx], &s[idx..])
        }
        _ => s.to_string(),
    }
}
