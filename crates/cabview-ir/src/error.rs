//! Error types for description parsing.

use thiserror::Error;

/// Errors that can occur while reading or writing a description document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text is not valid YAML.
    #[error("Syntax error{}: {message}", location_suffix(*line, *column))]
    Syntax {
        /// Line number (1-indexed), if known.
        line: Option<usize>,
        /// Column number (1-indexed), if known.
        column: Option<usize>,
        /// Error message.
        message: String,
    },

    /// The top level is valid YAML but not a mapping.
    #[error("Description must be a mapping at the top level, found {0}")]
    NotADocument(&'static str),

    /// A recognized key holds a value of the wrong shape.
    #[error("Invalid value in description: {0}")]
    Field(String),

    /// Serializing a description back to text failed.
    #[error("Failed to serialize description: {0}")]
    Serialize(String),
}

fn location_suffix(line: Option<usize>, column: Option<usize>) -> String {
    match (line, column) {
        (Some(l), Some(c)) => format!(" at line {}, column {}", l, c),
        (Some(l), None) => format!(" at line {}", l),
        _ => String::new(),
    }
}

impl ParseError {
    /// Create a syntax error from a YAML scanner error.
    pub fn syntax(err: serde_yaml::Error) -> Self {
        let location = err.location();
        Self::Syntax {
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
            message: err.to_string(),
        }
    }
}
