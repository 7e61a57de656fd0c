//! Decoding of raw stream records into `DeviationEvent`s.
//!
//! A record is free text with a JSON object embedded somewhere in it, e.g.
//! `noise-prefix{"id":42,"deviation":3.5,"value":97.2,"timestamp":1690000000000}`.
//! The object starts at the first `{` and runs to the end of the text.

use crate::core::DeviationEvent;
use crate::error::MalformedRecordError;
use serde_json::Value;
use tracing::debug;

/// Returns the JSON fragment of `text`, starting at its first opening brace.
pub fn extract_fragment(text: &str) -> Result<&str, MalformedRecordError> {
    text.find('{')
        .map(|index| &text[index..])
        .ok_or(MalformedRecordError::MissingPayload)
}

/// Parses a JSON object into a `DeviationEvent`.
///
/// All four fields are required. `id` and `timestamp` must be integers, while
/// `value` and `deviation` accept any JSON number. Unknown keys are ignored,
/// and when a key repeats the last occurrence wins.
pub fn parse_event(fragment: &str) -> Result<DeviationEvent, MalformedRecordError> {
    let object: Value = serde_json::from_str(fragment)
        .map_err(|e| MalformedRecordError::InvalidPayload(e.to_string()))?;
    serde_json::from_value(object).map_err(|e| MalformedRecordError::InvalidPayload(e.to_string()))
}

/// Decodes a raw record into a `DeviationEvent`.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn parse_record(record: &[u8]) -> Result<DeviationEvent, MalformedRecordError> {
    let text = String::from_utf8_lossy(record);
    debug!(received = %text, "Received record");

    let event = parse_event(extract_fragment(&text)?)?;
    debug!(?event, "Parsed deviation event");
    Ok(event)
}
