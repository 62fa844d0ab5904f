//! Decode a `{"commands": [...]}` object embedded anywhere in the text
//!
//! The object is located with a brace/string aware scan rather than a
//! pattern match, so nested objects and braces inside string values do not
//! confuse the boundaries. Only the located region is handed to
//! `serde_json`, which lets the reply carry prose on either side.

use crate::extract::command::Command;
use serde_json::Value;
use thiserror::Error;

const COMMANDS_KEY: &str = "commands";

/// Why the structured tier produced nothing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("no object with a \"commands\" array found")]
    NoCommandsObject,

    #[error("\"commands\" object is never closed")]
    Unbalanced,

    #[error("\"commands\" object is not valid JSON: {0}")]
    Malformed(String),

    #[error("\"commands\" is missing or not an array")]
    NotAnArray,
}

/// Find the innermost brace region holding a `"commands": [` key
///
/// Quotes are only tracked inside braces, so apostrophes and stray quotes
/// in surrounding prose are ignored. The first such key wins.
pub fn locate_commands_object(text: &str) -> Result<&str, DecodeFailure> {
    let bytes = text.as_bytes();
    let mut open: Vec<usize> = Vec::new();
    let mut candidate: Option<usize> = None;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => open.push(i),
            b'}' => {
                // A closing brace with nothing open belongs to the prose
                if let Some(start) = open.pop() {
                    if candidate == Some(start) {
                        return Ok(&text[start..=i]);
                    }
                }
            }
            b'"' if !open.is_empty() => {
                let Some(end) = string_end(bytes, i) else {
                    break;
                };
                if candidate.is_none()
                    && &text[i + 1..end] == COMMANDS_KEY
                    && array_follows(bytes, end + 1)
                {
                    candidate = open.last().copied();
                }
                i = end;
            }
            _ => {}
        }
        i += 1;
    }

    match candidate {
        Some(_) => Err(DecodeFailure::Unbalanced),
        None => Err(DecodeFailure::NoCommandsObject),
    }
}

/// Decode the commands object in `text`
///
/// `Ok` with an empty vector is a real answer: the model sent
/// `"commands": []` (or only blank entries).
pub fn decode_commands(text: &str) -> Result<Vec<Command>, DecodeFailure> {
    let region = locate_commands_object(text)?;
    let value: Value =
        serde_json::from_str(region).map_err(|e| DecodeFailure::Malformed(e.to_string()))?;

    let items = value
        .get(COMMANDS_KEY)
        .and_then(Value::as_array)
        .ok_or(DecodeFailure::NotAnArray)?;

    Ok(items
        .iter()
        .filter_map(element_text)
        .filter_map(|text| Command::new(&text))
        .collect())
}

/// Text form of one array element; models do not always send strings
fn element_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Index of the quote closing the string opened at `start`
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// True if `bytes[pos..]` continues with `:` then `[`, whitespace allowed
fn array_follows(bytes: &[u8], pos: usize) -> bool {
    let mut rest = bytes.get(pos..).unwrap_or_default().iter().copied();
    let mut next_token = || rest.find(|b| !b.is_ascii_whitespace());
    next_token() == Some(b':') && next_token() == Some(b'[')
}
