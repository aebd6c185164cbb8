//! Encoding of the message log as it lives in the repository: a base64-wrapped,
//! pretty-printed JSON array.
//!
//! Existing entries are kept as raw JSON values so whatever is already in the
//! file is written back untouched.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use serde_json::Value;

use crate::error::{GuestlogError, Result};
use crate::model::{Message, RemoteFile};

pub type MessageLog = Vec<Value>;

/// Decode the `content` field of a contents API response into the log.
///
/// GitHub wraps base64 at 60 columns, so newlines are stripped first. An empty
/// file is an empty log.
pub fn decode(content: &str) -> Result<MessageLog> {
    let compact: String = content.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(GuestlogError::stored_log)?;
    let text = String::from_utf8(bytes).map_err(GuestlogError::stored_log)?;
    let text = if text.is_empty() { "[]" } else { text.as_str() };

    match serde_json::from_str::<Value>(text).map_err(GuestlogError::stored_log)? {
        Value::Array(entries) => Ok(entries),
        other => Err(GuestlogError::stored_log(format!(
            "expected a JSON array, found {}",
            kind(&other)
        ))),
    }
}

/// Decode a fetched file, refusing content the API did not inline as base64.
/// Treating such a file as empty would make the next write drop every entry.
pub fn decode_file(file: &RemoteFile) -> Result<MessageLog> {
    match file.encoding.as_deref() {
        None | Some("base64") => decode(&file.content),
        Some(other) => Err(GuestlogError::stored_log(format!(
            "content delivered with encoding '{other}', not base64"
        ))),
    }
}

/// Serialize the log with two-space indentation and base64 it for a PUT.
pub fn encode(log: &[Value]) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    log.serialize(&mut ser)?;
    Ok(BASE64.encode(out))
}

pub fn push(log: &mut MessageLog, message: &Message) -> Result<()> {
    log.push(serde_json::to_value(message)?);
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
