//! Input parsing for batch item files.

use crate::batch::error::BatchError;
use crate::batch::formats::{InputFormat, detect_format};
use serde_json::Value;
use std::path::Path;

/// Parse a batch input file into items.
///
/// Auto-detects format (line-delimited or JSON array) and parses accordingly.
pub fn parse_input_file(file_path: &Path) -> Result<Vec<String>, BatchError> {
    if !file_path.exists() {
        return Err(BatchError::InvalidConfig(format!(
            "File not found: {}",
            file_path.display()
        )));
    }

    let content = std::fs::read_to_string(file_path).map_err(|e| {
        BatchError::InvalidConfig(format!(
            "Failed to read file {}: {}",
            file_path.display(),
            e
        ))
    })?;

    parse_input(&content)
}

/// Parse batch input from a string.
pub fn parse_input(content: &str) -> Result<Vec<String>, BatchError> {
    match detect_format(content)? {
        InputFormat::LineDelimited => parse_line_delimited(content),
        InputFormat::JsonArray => parse_json_array(content),
    }
}

/// Each non-empty trimmed line becomes an item.
fn parse_line_delimited(content: &str) -> Result<Vec<String>, BatchError> {
    let items: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        Err(BatchError::InvalidConfig("No items found in input".to_string()))
    } else {
        Ok(items)
    }
}

/// Parse JSON array format.
///
/// String elements are used verbatim; any other element becomes its compact
/// JSON text:
/// ```json
/// ["https://a.example", {"id": 7}, 42]
/// ```
fn parse_json_array(content: &str) -> Result<Vec<String>, BatchError> {
    let json: Value = serde_json::from_str(content).map_err(|e| {
        BatchError::InvalidConfig(format!("Invalid JSON: {} (at line {})", e, e.line()))
    })?;

    let array = json
        .as_array()
        .ok_or_else(|| BatchError::InvalidConfig("JSON root must be an array".to_string()))?;

    if array.is_empty() {
        return Err(BatchError::InvalidConfig("JSON array is empty".to_string()));
    }

    Ok(array
        .iter()
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_line_delimited() {
        let content = "item 1\n  item 2  \n\nitem 3\n";
        let result = parse_line_delimited(content).unwrap();
        assert_eq!(result, vec!["item 1", "item 2", "item 3"]);
    }

    #[test]
    fn test_parse_json_array_mixed() {
        let content = r#"["plain", {"id": 7}, 42]"#;
        let result = parse_json_array(content).unwrap();
        assert_eq!(result, vec!["plain", r#"{"id":7}"#, "42"]);
    }

    #[test]
    fn test_parse_json_array_empty() {
        assert!(parse_json_array("[]").is_err());
    }

    #[test]
    fn test_parse_json_invalid() {
        let err = parse_input("[\"unterminated").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_parse_input_file_line_delimited() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a").unwrap();
        writeln!(file, "b").unwrap();
        file.flush().unwrap();

        let result = parse_input_file(file.path()).unwrap();
        assert_eq!(result, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_input_file_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"["x", "y"]"#).unwrap();
        file.flush().unwrap();

        let result = parse_input_file(file.path()).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_parse_input_file_not_found() {
        let path = Path::new("/nonexistent/items.txt");
        assert!(parse_input_file(path).is_err());
    }
}
