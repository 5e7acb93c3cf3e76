//! Source locations handed to tag hooks.

/// Where in the input a parse event happened.
///
/// Line and column are 1-based. The file name is whatever the caller gave
/// the reader; it only ever appears in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseInfo {
    file_name: String,
    line: usize,
    column: usize,
}

impl ParseInfo {
    /// Create a new parse location.
    pub fn new(file_name: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file_name: file_name.into(),
            line,
            column,
        }
    }

    /// Name of the file being parsed.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Line number, 1-based.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Column number, 1-based.
    pub fn column_number(&self) -> usize {
        self.column
    }
}
