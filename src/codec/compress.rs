//! Gzip compression engine.
//!
//! The workhorse behind every compact token: UTF-8 (for text) → gzip →
//! standard base64 → URL-safe transform. Output is safe to embed verbatim
//! in a fragment or query string. Decompression inverts each step and
//! fails on corrupt or truncated streams rather than returning partial
//! data.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::base64::{base64_to_bytes, bytes_to_base64, normalize_url_safe, to_url_safe};
use crate::error::{Result, UrlPackError};

/// Gzip-compress raw bytes.
pub fn gzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| UrlPackError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| UrlPackError::Compression(e.to_string()))
}

/// Inflate a gzip stream.
pub fn gunzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| UrlPackError::Decompression(e.to_string()))?;
    Ok(out)
}

/// Compress bytes into a URL-safe base64 string.
pub fn compress_bytes(data: &[u8]) -> Result<String> {
    let compressed = gzip_bytes(data)?;
    Ok(to_url_safe(&bytes_to_base64(&compressed)))
}

/// Compress a UTF-8 string into a URL-safe base64 string.
pub fn compress_str(text: &str) -> Result<String> {
    compress_bytes(text.as_bytes())
}

/// Decompress a URL-safe base64 string back to bytes.
pub fn decompress_to_bytes(token: &str) -> Result<Vec<u8>> {
    let compressed = base64_to_bytes(&normalize_url_safe(token))?;
    gunzip_bytes(&compressed)
}

/// Decompress a URL-safe base64 string back to a UTF-8 string.
pub fn decompress_to_string(token: &str) -> Result<String> {
    let bytes = decompress_to_bytes(token)?;
    String::from_utf8(bytes)
        .map_err(|e| UrlPackError::Decompression(format!("Invalid UTF-8: {e}")))
}
