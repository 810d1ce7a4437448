//! Character source for the tokenizer
//!
//! Hands out one character at a time and keeps the line/column counters used
//! in diagnostics. End of input is `None`, which no character can collide with.

use std::fs;
use std::path::Path;

use crate::utils::{Location, Result};

/// Line/column tracking reader over the source text
pub struct SourceReader {
    chars: Vec<char>,
    pos: usize,
    current: Option<char>,
    line: u32,
    column: u32,
}

impl SourceReader {
    /// Create a reader positioned on the first character of `source`
    pub fn new(source: &str) -> Self {
        let mut reader = Self {
            chars: source.chars().collect(),
            pos: 0,
            current: None,
            line: 1,
            column: 0,
        };
        reader.read_next();
        reader
    }

    /// Read a whole file and position on its first character
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Ok(Self::new(&source))
    }

    /// The current character, or `None` at end of input
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Location of the current character
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Advance one character.
    ///
    /// Carriage returns and tabs never reach the tokenizer.
    pub fn read_next(&mut self) {
        loop {
            let c = self.chars.get(self.pos).copied();
            if c.is_some() {
                self.pos += 1;
            }

            match c {
                Some('\r') | Some('\t') => continue,
                Some('\n') => {
                    self.line += 1;
                    self.column = 0;
                }
                Some(_) => self.column += 1,
                None => {}
            }

            self.current = c;
            return;
        }
    }
}
