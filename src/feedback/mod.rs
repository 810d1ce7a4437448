//! Structured Feedback Module
//!
//! Parser problems do not stop compilation. They are collected as
//! `Diagnostic`s and can be rendered for humans or serialized as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Category, Type};
use crate::utils::{Error, Location};

// ==================== Diagnostics ====================

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A specific lexeme was required
    UnexpectedLexeme { expected: String },
    /// An operand (name, literal, `!` or `(`) was required
    ExpectedOperand,
    UndeclaredIdentifier { name: String },
    NotAVariable { name: String, category: Category },
    DuplicateIdentifier { name: String },
    /// `!` applied to something that is not boolean
    NegationOfNonBool { found: Type },
    /// Too many `!` or `(` around one operand
    NestingTooDeep { limit: usize },
    /// The tokenizer gave up; nothing after this point was parsed
    Fatal { message: String },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedLexeme { expected } => write!(f, "expected {}", expected),
            Self::ExpectedOperand => write!(f, "expected an operand"),
            Self::UndeclaredIdentifier { name } => write!(f, "undeclared identifier '{}'", name),
            Self::NotAVariable { name, category } => {
                write!(f, "'{}' is a {}, not a variable", name, category)
            }
            Self::DuplicateIdentifier { name } => {
                write!(f, "identifier '{}' is already declared", name)
            }
            Self::NegationOfNonBool { found } => {
                write!(f, "negation needs a bool operand, found {}", found)
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "operand nested more than {} levels deep", limit)
            }
            Self::Fatal { message } => f.write_str(message),
        }
    }
}

/// A problem found while compiling, tied to the lexeme current at the time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    /// Where the offending lexeme starts
    pub location: Location,
    /// Kind name of the lexeme that was current when the problem was found
    pub lexeme: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Location, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            lexeme: lexeme.into(),
        }
    }
}

impl From<&Error> for Diagnostic {
    fn from(err: &Error) -> Self {
        Self::new(
            DiagnosticKind::Fatal {
                message: err.to_string(),
            },
            err.location().unwrap_or_default(),
            "None",
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at line {}, column {}: unexpected lexeme {}: {}",
            self.location.line, self.location.column, self.lexeme, self.kind
        )
    }
}

// ==================== Compilation Report ====================

/// Machine-readable summary of one compilation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReport {
    /// No diagnostics were reported
    pub success: bool,

    /// Source file
    pub source_file: String,

    /// All diagnostics, in the order they were found
    pub diagnostics: Vec<Diagnostic>,

    /// Number of declared variables
    pub variable_count: usize,

    /// Number of instructions in the program body
    pub instruction_count: usize,
}

impl CompileReport {
    /// Report for a run that stopped on a fatal error
    pub fn fatal(source_file: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Self {
            success: false,
            source_file: source_file.into(),
            diagnostics: vec![diagnostic],
            variable_count: 0,
            instruction_count: 0,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
