//! Style rule error types

use std::fmt;
use thiserror::Error;

/// Style rule result type
pub type StylesResult<T> = Result<T, StylesError>;

/// Failures reported while accepting a list of style rules.
///
/// The messages are the ones the host shows next to the styles field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StylesError {
    #[error("The provided list of styles is syntactically incorrect.")]
    Syntax,

    #[error("Each style must have a unique label.")]
    DuplicateName,
}

/// A rule line that does not follow the `element[.class...]|label` grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// Line number (1-indexed, blank lines counted)
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl LineDiagnostic {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self { line, text: text.into() }
    }
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.text)
    }
}
