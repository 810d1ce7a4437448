//! Source location tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the source text, as reported in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// 1-based line number
    pub line: u32,
    /// Column of the character within its line (1-based, 0 before the first character)
    pub column: u32,
}

impl Location {
    /// Create a new location
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Location before any character has been read
    pub fn start() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
