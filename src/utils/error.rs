//! Error handling for boolc

use crate::utils::Location;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Compiler error
///
/// Tokenization errors halt the run. Structural problems found by the parser
/// are collected as diagnostics instead (see `feedback::Diagnostic`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Tokenizer Errors ====================

    #[error("Illegal character '{ch}' at line {}, column {}", .location.line, .location.column)]
    IllegalCharacter { ch: char, location: Location },

    #[error("Identifier '{text}...' exceeds the maximum length of {max} characters")]
    IdentifierTooLong {
        text: String,
        max: usize,
        location: Location,
    },

    // ==================== Semantic Errors ====================

    #[error("Duplicate identifier: {name}")]
    DuplicateIdentifier { name: String, location: Location },

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Get the source location associated with this error
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::IllegalCharacter { location, .. } => Some(*location),
            Self::IdentifierTooLong { location, .. } => Some(*location),
            Self::DuplicateIdentifier { location, .. } => Some(*location),
            Self::Io(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
