//! Diagnostics for record files that fail to parse

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A record file that is not valid YAML or does not fit the record shape
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid inspection record: {message}")]
#[diagnostic(code(checksheet::record::syntax))]
pub struct RecordSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl RecordSyntaxError {
    /// Build a diagnostic from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors loading a record file
#[derive(Debug, Error, Diagnostic)]
pub enum RecordError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] RecordSyntaxError),

    #[error("Cannot read record file {path}: {source}")]
    #[diagnostic(code(checksheet::record::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let Some(line_start) = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .try_fold(0usize, |acc, len| acc.checked_add(len))
    else {
        return 0;
    };
    if line_start >= source.len() {
        return source.len().saturating_sub(1);
    }

    let line_text = source[line_start..].split('\n').next().unwrap_or("");
    let col_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());
    line_start + col_offset
}

/// Suggest a fix for common record mistakes
fn generate_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("missing field `header`") {
        return Some("A record needs a `header:` block with technician_name, group and inspection_date.".to_string());
    }

    if msg.contains("missing field `inspection_date`") || msg.contains("input contains invalid characters") || msg.contains("premature end of input") {
        return Some("Dates are written as YYYY-MM-DD, e.g. inspection_date: 2024-03-15".to_string());
    }

    if msg.contains("unknown variant") {
        return Some("inspection_type must be thickener_i or thickener_ii".to_string());
    }

    if msg.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs.".to_string());
    }

    if msg.contains("duplicate key") {
        return Some("Each field can only be recorded once per section.".to_string());
    }

    if msg.contains("mapping values are not allowed") {
        return Some("Quote values containing ':' - e.g. comments: \"leak at fitting: minor\"".to_string());
    }

    if msg.contains("data did not match any variant") {
        return Some("Field values must be text, numbers or true/false - not lists or nested maps.".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 6);
        assert_eq!(line_col_to_offset(source, 3, 3), 14);
        // past the end clamps to the last byte
        assert_eq!(line_col_to_offset(source, 9, 1), source.len() - 1);
    }

    #[test]
    fn test_help_generation() {
        assert!(generate_help("missing field `header`").is_some());
        assert!(generate_help("unknown variant `press`, expected one of").is_some());
        assert!(generate_help("found tab character").is_some());
        assert!(generate_help("some random error").is_none());
    }
}
