//! Input format detection for batch item files.

use crate::batch::error::BatchError;

/// Supported input formats for batch item files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Line-delimited format (one item per line).
    LineDelimited,
    /// JSON array format.
    JsonArray,
}

/// Detects the input format based on file content.
///
/// Content starting with `[` is treated as a JSON array.
pub fn detect_format(content: &str) -> Result<InputFormat, BatchError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(BatchError::InvalidConfig("Input is empty".to_string()));
    }

    if trimmed.starts_with('[') {
        Ok(InputFormat::JsonArray)
    } else {
        Ok(InputFormat::LineDelimited)
    }
}
