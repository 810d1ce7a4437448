//! Frontend module - Character source, Lexer, Symbol table, Parser

pub mod source;
pub mod token;
pub mod lexer;
pub mod symbols;
pub mod parser;
