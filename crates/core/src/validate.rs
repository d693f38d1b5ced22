//! Parse raw log lines into [`Document`]s.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::document::{Document, FieldValue, Fields, TIMESTAMP_FIELD};
use crate::error::ValidationError;

/// Convert a JSON [`Value`] to our typed [`FieldValue`].
fn json_to_field_value(v: &Value) -> FieldValue {
    match v {
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                // Fallback: render as text
                FieldValue::Text(n.to_string())
            }
        }
        Value::Bool(b) => FieldValue::Boolean(*b),
        Value::Null => FieldValue::Null,
        // Arrays and objects: keep their JSON text rendering
        other => FieldValue::Text(other.to_string()),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate one raw line into a [`Document`].
///
/// The line must be a JSON object carrying a string `timestamp` field in
/// RFC 3339 form. On success the timestamp is replaced by its parsed value;
/// every other field is preserved untouched, in source order. Pure and
/// deterministic: the same line always yields the same document or error.
pub fn validate(line: &str) -> Result<Document, ValidationError> {
    let json: Value = serde_json::from_str(line)
        .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;

    let obj = json.as_object().ok_or_else(|| {
        ValidationError::MalformedPayload(format!(
            "expected an object, got {}",
            json_type_name(&json)
        ))
    })?;

    let raw_ts = obj
        .get(TIMESTAMP_FIELD)
        .ok_or(ValidationError::MissingTimestamp)?;

    let ts_text = raw_ts
        .as_str()
        .ok_or_else(|| ValidationError::InvalidTimestampType {
            found: json_type_name(raw_ts),
        })?;

    let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(ts_text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ValidationError::UnparsableTimestamp {
            value: ts_text.to_string(),
            source: e,
        })?;

    let fields: Fields = obj
        .iter()
        .map(|(k, v)| {
            let value = if k == TIMESTAMP_FIELD {
                FieldValue::Timestamp(timestamp)
            } else {
                json_to_field_value(v)
            };
            (k.clone(), value)
        })
        .collect();

    Ok(Document::new(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate_typed_fields() {
        let line = r#"{
            "timestamp": "2025-06-14T12:00:00Z",
            "level": "error",
            "code": 500,
            "elapsed": 1.25,
            "retried": false,
            "trace": null
        }"#;
        let doc = validate(line).unwrap();

        assert_eq!(doc.get("level"), Some(&FieldValue::Text("error".into())));
        assert_eq!(doc.get("code"), Some(&FieldValue::Integer(500)));
        assert_eq!(doc.get("elapsed"), Some(&FieldValue::Float(1.25)));
        assert_eq!(doc.get("retried"), Some(&FieldValue::Boolean(false)));
        assert_eq!(doc.get("trace"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_validate_replaces_timestamp_with_parsed_value() {
        let doc = validate(r#"{"timestamp":"2025-06-14T12:00:00Z","level":"info"}"#).unwrap();

        let want = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();
        assert_eq!(doc.get(TIMESTAMP_FIELD), Some(&FieldValue::Timestamp(want)));
        assert_eq!(doc.timestamp(), Some(want));
    }

    #[test]
    fn test_validate_normalizes_offset_to_utc() {
        let doc = validate(r#"{"timestamp":"2025-06-14T14:00:00+02:00"}"#).unwrap();

        let want = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();
        assert_eq!(doc.timestamp(), Some(want));
    }

    #[test]
    fn test_validate_preserves_field_order() {
        let doc = validate(
            r#"{"zebra":"z","timestamp":"2025-06-14T12:00:00Z","alpha":"a","mid":"m"}"#,
        )
        .unwrap();

        let keys: Vec<&str> = doc.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zebra", "timestamp", "alpha", "mid"]);
    }

    #[test]
    fn test_validate_nested_values_kept_as_json_text() {
        let doc =
            validate(r#"{"timestamp":"2025-06-14T12:00:00Z","ctx":{"a":1},"tags":[1,2]}"#).unwrap();

        assert!(matches!(doc.get("ctx"), Some(FieldValue::Text(_))));
        assert!(matches!(doc.get("tags"), Some(FieldValue::Text(_))));
    }

    #[test]
    fn test_validate_missing_timestamp() {
        let err = validate(r#"{"level":"info"}"#).unwrap_err();

        assert!(matches!(err, ValidationError::MissingTimestamp));
        assert_eq!(err.kind(), "missing_timestamp");
    }

    #[test]
    fn test_validate_malformed_json() {
        let err = validate("not json").unwrap_err();

        assert!(matches!(err, ValidationError::MalformedPayload(_)));
        assert_eq!(err.kind(), "malformed_payload");
    }

    #[test]
    fn test_validate_non_object_payload() {
        let err = validate("[1,2,3]").unwrap_err();

        assert!(matches!(err, ValidationError::MalformedPayload(_)));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_validate_non_string_timestamp() {
        let err = validate(r#"{"timestamp":12345}"#).unwrap_err();

        assert!(matches!(
            err,
            ValidationError::InvalidTimestampType { found: "number" }
        ));
        assert_eq!(err.kind(), "invalid_timestamp_type");
    }

    #[test]
    fn test_validate_unparsable_timestamp() {
        let err = validate(r#"{"timestamp":"yesterday at noon"}"#).unwrap_err();

        match err {
            ValidationError::UnparsableTimestamp { ref value, .. } => {
                assert_eq!(value, "yesterday at noon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), "unparsable_timestamp");
    }

    #[test]
    fn test_validate_is_deterministic() {
        let line = r#"{"timestamp":"2025-06-14T12:00:00Z","level":"warn","code":42}"#;

        assert_eq!(validate(line).unwrap(), validate(line).unwrap());

        let bad = r#"{"timestamp":true}"#;
        assert_eq!(
            validate(bad).unwrap_err().kind(),
            validate(bad).unwrap_err().kind()
        );
    }
}
