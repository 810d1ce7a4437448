//! Static types and identifier categories

mod type_system;

pub use type_system::{Category, Type};
