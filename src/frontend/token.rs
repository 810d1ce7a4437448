//! Lexeme definitions for boolc

use std::fmt;
use std::mem;

use crate::utils::Location;

/// A lexeme together with where it starts in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub lexeme: Lexeme,
    pub location: Location,
}

impl Token {
    pub fn new(lexeme: Lexeme, location: Location) -> Self {
        Self { lexeme, location }
    }
}

/// Lexeme kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// Nothing has been read yet
    None,

    // ============ Identifiers and Literals ============
    /// Identifier (variable name)
    Name(String),
    /// 1
    True,
    /// 0
    False,

    // ============ Keywords ============
    /// Logical / Boolean (type keyword)
    Logical,
    /// Begin
    Begin,
    /// End
    End,
    /// Var
    Var,
    /// Print
    Print,

    // ============ Operators ============
    /// :=
    Assign,
    /// | or .OR.
    Disjunction,
    /// & or .AND.
    Conjunction,
    /// ^
    Implication,
    /// .XOR.
    ExclusiveDisjunction,
    /// ! or .NOT.
    Negation,

    // ============ Delimiters ============
    /// (
    LeftBracket,
    /// )
    RightBracket,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// :
    Colon,

    // ============ Special ============
    /// End of input
    EndOfInput,
}

impl Lexeme {
    /// Try to convert a letter run to a keyword
    pub fn keyword_from_str(s: &str) -> Option<Lexeme> {
        match s {
            "Begin" => Some(Lexeme::Begin),
            "End" => Some(Lexeme::End),
            "Var" => Some(Lexeme::Var),
            "Print" => Some(Lexeme::Print),
            "Logical" | "Boolean" => Some(Lexeme::Logical),
            _ => None,
        }
    }

    /// Try to convert a dotted word (`.AND.` and friends) to an operator
    pub fn operator_from_str(s: &str) -> Option<Lexeme> {
        match s {
            ".NOT." => Some(Lexeme::Negation),
            ".AND." => Some(Lexeme::Conjunction),
            ".OR." => Some(Lexeme::Disjunction),
            ".XOR." => Some(Lexeme::ExclusiveDisjunction),
            _ => None,
        }
    }

    /// Whether both lexemes are of the same kind, ignoring identifier text
    pub fn same_kind(&self, other: &Lexeme) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Identifier text, if this is a `Name`
    pub fn text(&self) -> Option<&str> {
        match self {
            Lexeme::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Lexeme::None => "None",
            Lexeme::Name(_) => "Name",
            Lexeme::True => "True",
            Lexeme::False => "False",
            Lexeme::Logical => "Logical",
            Lexeme::Begin => "Begin",
            Lexeme::End => "End",
            Lexeme::Var => "Var",
            Lexeme::Print => "Print",
            Lexeme::Assign => "Assign",
            Lexeme::Disjunction => "Disjunction",
            Lexeme::Conjunction => "Conjunction",
            Lexeme::Implication => "Implication",
            Lexeme::ExclusiveDisjunction => "ExclusiveDisjunction",
            Lexeme::Negation => "Negation",
            Lexeme::LeftBracket => "LeftBracket",
            Lexeme::RightBracket => "RightBracket",
            Lexeme::Semicolon => "Semicolon",
            Lexeme::Comma => "Comma",
            Lexeme::Colon => "Colon",
            Lexeme::EndOfInput => "EndOfInput",
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexeme::Name(name) => write!(f, "Name({})", name),
            other => f.write_str(other.kind_name()),
        }
    }
}
