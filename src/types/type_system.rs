//! Type System for boolc

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static type of an identifier or expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// No type could be computed (error recovery)
    None,
    /// Reserved; no construct of the language produces it yet
    Int,
    Bool,
}

impl Type {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// What kind of entity an identifier names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Const,
    Var,
    Type,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const => write!(f, "constant"),
            Self::Var => write!(f, "variable"),
            Self::Type => write!(f, "type"),
        }
    }
}
