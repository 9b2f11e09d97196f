//! Chat-transcript codec.
//!
//! A conversation is serialized as JSON, gzip-compressed, and carried as
//! a `chat-` tagged payload in the URL fragment. Decode is deliberately
//! lenient: a message missing any required field is dropped rather than
//! failing the whole transcript, so a link produced by a future schema
//! revision still opens as a partial conversation instead of an error
//! page. Each drop is logged so corruption stays observable.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::compress::{compress_str, decompress_to_string};
use crate::error::{Result, UrlPackError};

/// The only schema version ever issued. Bumping it is a breaking change
/// for every link in the wild; add optional fields instead.
pub const CHAT_SCHEMA_VERSION: u64 = 1;

/// A full transcript payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    /// Schema version, always [`CHAT_SCHEMA_VERSION`].
    pub v: u64,
    /// Messages in display order.
    pub messages: Vec<ChatMessage>,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Stable message id, referenced by replies.
    pub id: String,
    /// Sender display name.
    pub name: String,
    /// Message body.
    pub text: String,
    /// Send time in epoch milliseconds (UTC).
    pub sent_at_epoch_ms: i64,
    /// Sender's UTC offset at send time, in minutes.
    pub tz_offset_minutes: i32,
    /// Id of the message this replies to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

impl ChatPayload {
    /// Build a payload with the current schema version.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            v: CHAT_SCHEMA_VERSION,
            messages,
        }
    }
}

/// Serialize and compress a transcript.
pub fn encode(payload: &ChatPayload) -> Result<String> {
    let json = serde_json::to_string(payload)?;
    compress_str(&json)
}

/// Decompress and parse a transcript, sanitizing each message.
///
/// Fails with [`UrlPackError::InvalidPayload`] only on structural
/// problems: wrong schema version or `messages` not being an array.
/// Individual malformed messages are dropped, not fatal.
pub fn decode(compressed: &str) -> Result<ChatPayload> {
    let json = decompress_to_string(compressed)?;
    let value: Value = serde_json::from_str(&json)?;

    if value.get("v").and_then(Value::as_u64) != Some(CHAT_SCHEMA_VERSION) {
        return Err(UrlPackError::InvalidPayload(
            "unsupported chat schema version".to_string(),
        ));
    }
    let raw_messages = value
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| UrlPackError::InvalidPayload("messages is not an array".to_string()))?;

    let mut messages = Vec::with_capacity(raw_messages.len());
    for (index, raw) in raw_messages.iter().enumerate() {
        match sanitize_message(raw) {
            Some(msg) => messages.push(msg),
            None => {
                tracing::warn!(index, "dropping malformed chat message");
            }
        }
    }

    Ok(ChatPayload {
        v: CHAT_SCHEMA_VERSION,
        messages,
    })
}

/// Coerce one raw message, returning `None` when a required field is
/// missing or empty.
fn sanitize_message(raw: &Value) -> Option<ChatMessage> {
    let id = coerce_string(raw.get("id")?)?;
    let name = coerce_string(raw.get("name")?)?;
    let text = coerce_string(raw.get("text")?)?;
    let sent_at_epoch_ms = coerce_epoch_ms(raw.get("sentAtEpochMs")?)?;
    let tz_offset_minutes = raw
        .get("tzOffsetMinutes")
        .and_then(Value::as_i64)
        .unwrap_or(0) as i32;
    let reply_to_id = raw.get("replyToId").and_then(coerce_string);

    Some(ChatMessage {
        id,
        name,
        text,
        sent_at_epoch_ms,
        tz_offset_minutes,
        reply_to_id,
    })
}

fn coerce_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn coerce_epoch_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        _ => None,
    }
}

/// Build the shareable chat link for an already-compressed payload.
pub fn build_url(origin: &str, compressed: &str) -> String {
    format!("{}/chat-link/#d=chat-{compressed}", origin.trim_end_matches('/'))
}

/// The sender's wall-clock time, reconstructed from the epoch timestamp
/// and the recorded UTC offset, in a fixed UTC display zone.
///
/// Every viewer sees the sender's original local time verbatim, not a
/// rendering in their own timezone.
pub fn sender_wall_clock(message: &ChatMessage) -> Option<DateTime<Utc>> {
    let adjusted = message
        .sent_at_epoch_ms
        .checked_sub(i64::from(message.tz_offset_minutes) * 60_000)?;
    Utc.timestamp_millis_opt(adjusted).single()
}
