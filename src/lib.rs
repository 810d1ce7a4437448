//! boolc
//!
//! Translates a small boolean assignment language into 16-bit x86
//! stack-machine assembly in a single pass:
//! - `frontend` reads characters, produces lexemes, and parses while
//!   type checking and emitting code.
//! - `backend` holds the instruction sink, the code generator and the
//!   boilerplate that wraps a generated program.
//! - `driver` runs one compilation and assembles the listing.
//! - `feedback` carries non-fatal diagnostics and the JSON report.

pub mod backend;
pub mod driver;
pub mod feedback;
pub mod frontend;
pub mod types;
pub mod utils;

pub use driver::{compile, Compilation, CompileOptions, Compiler};
pub use utils::{Error, Location, Result};
