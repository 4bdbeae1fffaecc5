//! Transcript segments imported from an Opencast media package.

use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One searchable segment of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedSegment {
    pub index: u32,
    /// Start offset in milliseconds.
    pub time: u64,
    /// Length in milliseconds.
    pub duration: u64,
    #[serde(default)]
    pub relevance: u32,
    #[serde(default)]
    pub hit: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Reads the segments of a full media package.
///
/// Returns `Ok(None)` when the package has no `segments.segment` entry, so
/// the caller can leave the object alone. Opencast collapses single-element
/// lists into a bare object; both shapes are accepted.
pub fn segments_from_media_package(media_package: &Value) -> ModelResult<Option<Vec<EmbeddedSegment>>> {
    let Some(raw) = media_package.pointer("/segments/segment") else {
        return Ok(None);
    };

    let segments = match raw {
        Value::Array(items) => items.iter().map(segment_from_value).collect::<ModelResult<Vec<_>>>()?,
        Value::Object(_) => vec![segment_from_value(raw)?],
        Value::Null => return Ok(None),
        other => {
            return Err(ModelError::InvalidSegment(format!(
                "expected a list of segments, found {other}"
            )));
        }
    };
    Ok(Some(segments))
}

fn segment_from_value(value: &Value) -> ModelResult<EmbeddedSegment> {
    if !value.is_object() {
        return Err(ModelError::InvalidSegment(format!("segment is not an object: {value}")));
    }

    Ok(EmbeddedSegment {
        index: required_u64(value, "index")?
            .try_into()
            .map_err(|_| ModelError::InvalidSegment("index out of range".into()))?,
        time: required_u64(value, "time")?,
        duration: required_u64(value, "duration")?,
        relevance: optional_u64(value, "relevance")?
            .unwrap_or(0)
            .try_into()
            .map_err(|_| ModelError::InvalidSegment("relevance out of range".into()))?,
        hit: value.get("hit").is_some_and(truthy),
        text: value
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        preview: value
            .pointer("/previews/preview/$")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn required_u64(value: &Value, field: &str) -> ModelResult<u64> {
    optional_u64(value, field)?
        .ok_or_else(|| ModelError::InvalidSegment(format!("missing field `{field}`")))
}

// Opencast serialises numbers either as JSON numbers or as strings.
fn optional_u64(value: &Value, field: &str) -> ModelResult<Option<u64>> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| ModelError::InvalidSegment(format!("`{field}` is not a non-negative integer"))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ModelError::InvalidSegment(format!("`{field}` is not a number: {s:?}"))),
        Some(other) => Err(ModelError::InvalidSegment(format!("`{field}` has unexpected type: {other}"))),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"),
        _ => false,
    }
}
