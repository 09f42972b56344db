//! CSS parsing error types

use std::fmt;
use thiserror::Error;

/// CSS parsing result type
pub type CssResult<T> = Result<T, CssError>;

/// Source location in CSS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// CSS parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    #[error("Unexpected character '{character}' at {location}")]
    UnexpectedChar {
        character: char,
        location: SourceLocation,
    },

    #[error("Unexpected end of file at {location}")]
    UnexpectedEof {
        location: SourceLocation,
    },

    #[error("Unterminated string at {location}")]
    UnterminatedString {
        location: SourceLocation,
    },
}

impl CssError {
    /// Get the source location of this error
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::UnexpectedChar { location, .. } => *location,
            Self::UnexpectedEof { location } => *location,
            Self::UnterminatedString { location } => *location,
        }
    }

    pub fn unexpected_char(c: char, location: SourceLocation) -> Self {
        Self::UnexpectedChar { character: c, location }
    }

    pub fn unexpected_eof(location: SourceLocation) -> Self {
        Self::UnexpectedEof { location }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::new(10, 5, 100);
        assert_eq!(format!("{}", loc), "10:5");
    }

    #[test]
    fn test_error_display() {
        let loc = SourceLocation::new(1, 10, 9);
        let err = CssError::unexpected_char('}', loc);
        assert_eq!(format!("{}", err), "Unexpected character '}' at 1:10");
        assert_eq!(err.location(), loc);
    }
}
