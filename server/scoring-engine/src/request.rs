//! Validate raw JSON requests into typed engine inputs.
//!
//! This is where caller contract violations surface: a `text` that is not a
//! string, or dimension ratings that are not integers, are rejected as
//! `InvalidInput` rather than coerced.

use serde_json::{Map, Value};

use crate::complexity::DimensionScores;
use crate::error::ScoringError;

/// A validated request. At least one of `text` / `dimensions` is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
  pub text: Option<String>,
  /// Score against this type instead of the classified one.
  pub type_id: Option<String>,
  pub dimensions: Option<DimensionScores>,
}

/// Parse and validate one JSON request document. Unknown fields are ignored.
pub fn parse(raw: &str) -> Result<Request, ScoringError> {
  let value: Value = serde_json::from_str(raw)?;
  from_value(&value)
}

pub fn from_value(value: &Value) -> Result<Request, ScoringError> {
  let obj = value
    .as_object()
    .ok_or_else(|| ScoringError::invalid_input("request", "expected a JSON object"))?;

  let text = optional_string(obj, "text")?;
  let type_id = optional_string(obj, "type_id")?;
  let dimensions = match obj.get("dimensions") {
    None | Some(Value::Null) => None,
    Some(Value::Object(map)) => Some(dimension_scores(map)?),
    Some(other) => {
      return Err(ScoringError::invalid_input(
        "dimensions",
        &format!("expected an object, got {}", kind(other)),
      ))
    }
  };

  if text.is_none() && dimensions.is_none() {
    return Err(ScoringError::invalid_input(
      "request",
      "expected \"text\" and/or \"dimensions\"",
    ));
  }
  if type_id.is_some() && text.is_none() {
    return Err(ScoringError::invalid_input("type_id", "requires \"text\""));
  }

  Ok(Request {
    text,
    type_id,
    dimensions,
  })
}

fn optional_string(obj: &Map<String, Value>, field: &str) -> Result<Option<String>, ScoringError> {
  match obj.get(field) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(other) => Err(ScoringError::invalid_input(
      field,
      &format!("expected a string, got {}", kind(other)),
    )),
  }
}

fn dimension_scores(map: &Map<String, Value>) -> Result<DimensionScores, ScoringError> {
  let pairs = map
    .iter()
    .map(|(key, value)| {
      value
        .as_i64()
        .map(|v| (key.as_str(), v))
        .ok_or_else(|| {
          ScoringError::invalid_input(key, &format!("expected an integer, got {}", kind(value)))
        })
    })
    .collect::<Result<Vec<_>, ScoringError>>()?;
  DimensionScores::from_pairs(pairs)
}

fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
