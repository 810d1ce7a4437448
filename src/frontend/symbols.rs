//! Symbol table for boolc
//!
//! One flat scope per compilation. Names are unique; the table only grows.

use std::collections::HashMap;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::types::{Category, Type};
use crate::utils::{Error, Location, Result};

/// A declared name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub ty: Type,
    pub category: Category,
    pub location: Location,
}

/// Mapping from names to identifiers, remembering declaration order
#[derive(Debug, Default)]
pub struct SymbolTable {
    identifiers: Vec<Identifier>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new identifier
    pub fn declare(
        &mut self,
        name: &str,
        category: Category,
        ty: Type,
        location: Location,
    ) -> Result<&Identifier> {
        if self.index.contains_key(name) {
            return Err(Error::DuplicateIdentifier {
                name: name.to_string(),
                location,
            });
        }

        trace!("declare {} {}: {}", category, name, ty);
        let slot = self.identifiers.len();
        self.index.insert(name.to_string(), slot);
        self.identifiers.push(Identifier {
            name: name.to_string(),
            ty,
            category,
            location,
        });
        Ok(&self.identifiers[slot])
    }

    /// Look up a name
    pub fn lookup(&self, name: &str) -> Option<&Identifier> {
        self.index.get(name).map(|&slot| &self.identifiers[slot])
    }

    /// All identifiers in declaration order
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}
