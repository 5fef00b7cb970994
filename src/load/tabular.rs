//! CSV decoder.
//!
//! Rows are lifted into the same document shape as JSON records so the
//! validator treats both formats alike.

use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::record::RawRecord;

const REQUIRED_COLUMNS: [&str; 2] = ["title", "body"];
const LIST_COLUMNS: [&str; 2] = ["labels", "assignees"];

pub(super) fn decode(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    // Short rows leave trailing columns absent; cells past the header are ignored.
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(malformed)?.clone();
    if headers.is_empty() {
        return Err(LoadError::MalformedInput("CSV file is empty or has no header".to_string()));
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MalformedInput(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(malformed)?;
        let mut map = Map::new();
        for list in LIST_COLUMNS {
            map.insert(list.to_string(), Value::Array(Vec::new()));
        }
        for (header, cell) in headers.iter().zip(row.iter()) {
            match header {
                "title" | "body" => {
                    map.insert(header.to_string(), Value::String(cell.to_string()));
                }
                "labels" | "assignees" => {
                    map.insert(header.to_string(), split_list(cell));
                }
                "milestone" if !cell.trim().is_empty() => {
                    map.insert(header.to_string(), Value::String(cell.to_string()));
                }
                _ => {}
            }
        }
        records.push(RawRecord::new(Value::Object(map)));
    }
    Ok(records)
}

/// Split a comma-separated cell into trimmed, non-empty tokens.
fn split_list(cell: &str) -> Value {
    Value::Array(
        cell.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Value::String(token.to_string()))
            .collect(),
    )
}

fn malformed(err: csv::Error) -> LoadError {
    LoadError::MalformedInput(format!("Invalid CSV: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_labels_trimmed_in_order() {
        let records = decode("title,body,labels\nFix login,Broken,\"bug, urgent\"\n").unwrap();
        assert_eq!(records[0].field("labels"), Some(&json!(["bug", "urgent"])));
    }

    #[test]
    fn empty_or_absent_list_cells_are_empty() {
        let records = decode("title,body,assignees\nA,b,\n").unwrap();
        assert_eq!(records[0].field("assignees"), Some(&json!([])));
        assert_eq!(records[0].field("labels"), Some(&json!([])));
    }

    #[test]
    fn drops_empty_tokens() {
        let records = decode("title,body,assignees\nA,b,\"alice,, bob ,\"\n").unwrap();
        assert_eq!(records[0].field("assignees"), Some(&json!(["alice", "bob"])));
    }

    #[test]
    fn empty_milestone_is_absent() {
        let records = decode("title,body,milestone\nA,b,\nB,c,v1.0\n").unwrap();
        assert!(records[0].field("milestone").is_none());
        assert_eq!(records[1].field("milestone"), Some(&json!("v1.0")));
    }

    #[test]
    fn missing_required_columns() {
        let err = decode("title,labels\nA,bug\n").unwrap_err();
        assert_eq!(err.to_string(), "Malformed input: Missing required columns: body");
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = decode("").unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput(_)));
    }

    #[test]
    fn short_row_missing_list_cells_are_empty() {
        let records = decode("title,body,labels\nA,b\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("title"), Some(&json!("A")));
        assert_eq!(records[0].field("labels"), Some(&json!([])));
        assert_eq!(records[0].field("assignees"), Some(&json!([])));
    }

    #[test]
    fn short_row_without_body_leaves_it_absent() {
        let records = decode("title,body\nA\n").unwrap();
        assert!(records[0].field("body").is_none());
    }

    #[test]
    fn cells_past_the_header_are_ignored() {
        let records = decode("title,body\nA,b,extra\n").unwrap();
        assert_eq!(records[0].field("body"), Some(&json!("b")));
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let records = decode("title,body,priority\nA,b,high\n").unwrap();
        assert!(records[0].field("priority").is_none());
    }
}
