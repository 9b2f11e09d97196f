//! Big-integer decimal codec for the legacy short-URL path.
//!
//! Legacy tokens carry their payload as a pure decimal digit string so
//! they survive any transport that mangles non-digit characters. The
//! byte buffer is treated as a big-endian unsigned integer and converted
//! with little-endian limbs in base 10^7: a limb times 256 plus a carry
//! stays well inside u64 range, so no bignum crate is needed.
//!
//! Leading zero bytes vanish in the integer representation, which is why
//! [`decimal_to_bytes`] takes an expected length and left-pads the result.
//! Decoding without the hint returns the minimal byte form.

use crate::error::{Result, UrlPackError};

/// Limb base. 10^7 keeps `limb * 256 + carry` under 2^62.
const LIMB_BASE: u64 = 10_000_000;

/// Decimal digits per limb.
const LIMB_DIGITS: usize = 7;

/// Convert a byte buffer (big-endian unsigned integer) to its decimal
/// string representation. The empty buffer encodes as `"0"`.
pub fn bytes_to_decimal(bytes: &[u8]) -> String {
    // limbs[0] is the least significant limb
    let mut limbs: Vec<u64> = vec![0];

    for &byte in bytes {
        let mut carry = u64::from(byte);
        for limb in &mut limbs {
            let value = *limb * 256 + carry;
            *limb = value % LIMB_BASE;
            carry = value / LIMB_BASE;
        }
        while carry > 0 {
            limbs.push(carry % LIMB_BASE);
            carry /= LIMB_BASE;
        }
    }

    let mut out = String::new();
    for (i, &limb) in limbs.iter().rev().enumerate() {
        if i == 0 {
            out.push_str(&limb.to_string());
        } else {
            out.push_str(&format!("{limb:0width$}", width = LIMB_DIGITS));
        }
    }
    out
}

/// Convert a decimal digit string back to bytes via repeated
/// divide-by-256.
///
/// When `expected_len` is given the result is left-padded with zero bytes
/// to that length; if the decoded value needs more bytes the call fails
/// with [`UrlPackError::LengthMismatch`]. Non-digit input fails with
/// [`UrlPackError::Format`].
pub fn decimal_to_bytes(digits: &str, expected_len: Option<usize>) -> Result<Vec<u8>> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        let preview: String = digits.chars().take(16).collect();
        return Err(UrlPackError::Format(format!(
            "not a decimal digit string: {preview:?}"
        )));
    }

    // Parse into little-endian limbs, 7 digits at a time from the right.
    let mut limbs: Vec<u64> = Vec::with_capacity(digits.len() / LIMB_DIGITS + 1);
    let bytes = digits.as_bytes();
    let mut end = bytes.len();
    while end > 0 {
        let start = end.saturating_sub(LIMB_DIGITS);
        // Safe: all-digit ASCII checked above
        let chunk = std::str::from_utf8(&bytes[start..end])
            .map_err(|e| UrlPackError::Format(e.to_string()))?;
        let limb: u64 = chunk
            .parse()
            .map_err(|e| UrlPackError::Format(format!("bad limb {chunk:?}: {e}")))?;
        limbs.push(limb);
        end = start;
    }

    // Repeatedly divide the limb array by 256; each pass yields the next
    // least-significant output byte.
    let mut out_rev: Vec<u8> = Vec::new();
    while limbs.iter().any(|&l| l != 0) {
        let mut remainder: u64 = 0;
        for limb in limbs.iter_mut().rev() {
            let value = remainder * LIMB_BASE + *limb;
            *limb = value / 256;
            remainder = value % 256;
        }
        out_rev.push(remainder as u8);
        while limbs.len() > 1 && *limbs.last().unwrap_or(&0) == 0 {
            limbs.pop();
        }
    }

    let mut out: Vec<u8> = out_rev.into_iter().rev().collect();

    if let Some(expected) = expected_len {
        if out.len() > expected {
            return Err(UrlPackError::LengthMismatch {
                needed: out.len(),
                expected,
            });
        }
        if out.len() < expected {
            let mut padded = vec![0u8; expected - out.len()];
            padded.extend_from_slice(&out);
            out = padded;
        }
    }

    Ok(out)
}
