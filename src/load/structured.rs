//! JSON decoder.

use serde_json::Value;

use crate::error::LoadError;
use crate::record::RawRecord;

/// Accepts a bare array or an object with an `issues` array.
pub(super) fn decode(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    let data: Value = serde_json::from_str(text)
        .map_err(|e| LoadError::MalformedInput(format!("Invalid JSON: {e}")))?;

    let items = match data {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("issues") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(LoadError::MalformedInput("'issues' must be an array".to_string()))
            }
            None => return Err(shape_error()),
        },
        _ => return Err(shape_error()),
    };

    Ok(items.into_iter().map(RawRecord::new).collect())
}

fn shape_error() -> LoadError {
    LoadError::MalformedInput("JSON must be array or object with 'issues' key".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wrapped_and_bare_forms_decode_identically() {
        let records =
            r#"[{"title": "A", "body": "b", "labels": ["x"]}, {"title": "B", "body": "c"}]"#;
        let bare = decode(records).unwrap();
        let wrapped = decode(&format!(r#"{{"issues": {records}}}"#)).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 2);
    }

    #[test]
    fn rejects_scalar_top_level() {
        let err = decode("42").unwrap_err();
        assert!(err.to_string().contains("array or object"));
    }

    #[test]
    fn rejects_object_without_issues_key() {
        let err = decode(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput(_)));
    }

    #[test]
    fn rejects_non_array_issues() {
        let err = decode(r#"{"issues": {"title": "A"}}"#).unwrap_err();
        assert!(err.to_string().contains("'issues' must be an array"));
    }

    #[test]
    fn syntax_error_carries_position() {
        let err = decode("[{\"title\": }]").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid JSON"));
        assert!(msg.contains("line 1"));
    }

    #[test]
    fn non_object_records_are_kept_for_the_validator() {
        let records = decode(r#"["just a string"]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].title().is_none());
    }
}
