//! # urlpack - Self-contained URL-payload codecs
//!
//! Deterministic, reversible encodings that pack typed content (documents,
//! tables, media, chat transcripts, arbitrary URLs) into the smallest
//! possible URL-safe string. A link built with this crate carries its
//! entire payload in the fragment or query string: no server, no database,
//! no lookup. Whoever receives the URL can reconstruct the original bytes
//! with nothing but this library.
//!
//! ## Wire formats
//!
//! Every format is self-describing and decodable forever; variants are
//! added, never removed.
//!
//! | Format | Wire form | Produced by |
//! |--------|-----------|-------------|
//! | Short-URL token | `AT<version><payload>` | [`shorturl::token`] |
//! | Typed-bytes payload | `b-<base64url(tag ++ bytes)>` | [`codec::typed`] |
//! | Tagged compressed payload | `<tag>-<base64url-gzip>` | [`recovery`] |
//! | Reference code | `<1-3 char code>-<remainder>` | [`shorturl::refcode`] |
//! | Fragment carriers | `#d=` `#data=` `?d=` `?data=` | [`recovery`] |
//!
//! ## Layering
//!
//! Leaves first; higher components only call lower ones. The recovery
//! parser sits on top and must know about every codec below it.
//!
//! ```text
//! recovery ──────────────┐
//!   chat                 │
//!   shorturl::token      │
//!     shorturl::dictionary, shorturl::refcode
//!   codec::media         │
//!     codec::typed       │
//!   codec::compress ─────┤
//!     codec::base64, codec::bigint
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use urlpack::shorturl::{encode_short_url, decode_short_url};
//!
//! let token = encode_short_url("https://github.com/foo/bar")?;
//! assert!(token.starts_with("AT2"));
//! assert_eq!(decode_short_url(&token)?, "https://github.com/foo/bar");
//! ```
//!
//! ```rust,ignore
//! use urlpack::recovery::{parse_recovery_hash, ContentType};
//!
//! let info = parse_recovery_hash("https://host/app/#d=html-H4sIAAA...").unwrap();
//! assert_eq!(info.content_type, ContentType::Html);
//! ```
//!
//! ## Guarantees
//!
//! - **Bit-exact round-trips**: every encode has a decode that returns the
//!   original bytes or string, including empty and all-zero inputs.
//! - **Table stability**: dictionary ids, reference codes, media type ids,
//!   and type-code letters are append-only logs; issued links never break.
//! - **No hidden state**: all lookup tables are immutable after module
//!   initialization; every operation is a pure, synchronous transform.
//! - **Fail closed**: corrupt input yields a typed error or a soft miss,
//!   never partially decoded data.

pub mod chat;
pub mod codec;
pub mod config;
pub mod error;
pub mod recovery;
pub mod shorturl;

// Re-exports for convenience
pub use codec::{DecodedMedia, MediaKind, TypedPayload};
pub use config::{LinkCategory, LinkLimits};
pub use error::{Result, UrlPackError};
pub use recovery::{
    parse_recovery_hash, parse_recovery_input, ContentType, RecoveredData, RecoveryInfo,
};
pub use shorturl::{decode_short_url, encode_short_url, EncodeMode, TokenVersion};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
