//! Backend module - Code generation

pub mod codegen;
pub mod boilerplate;

pub use codegen::{CodeGen, InstructionSequence, InstructionSink};
pub use boilerplate::{Boilerplate, DosBoilerplate};
