//! Compilation driver
//!
//! Runs declare, statement and print sections through the parser, then
//! splices the result into boilerplate. All state lives in the values built
//! here, so compilations are independent of each other.

use std::path::Path;

use log::{debug, info};

use crate::backend::{Boilerplate, CodeGen, InstructionSequence};
use crate::feedback::{CompileReport, Diagnostic};
use crate::frontend::lexer::{Lexer, MAX_IDENTIFIER_LEN};
use crate::frontend::parser::Parser;
use crate::frontend::source::SourceReader;
use crate::frontend::symbols::SymbolTable;
use crate::utils::Result;

/// Knobs for one compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Longest identifier or operator word accepted, in characters
    pub max_identifier_len: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_identifier_len: MAX_IDENTIFIER_LEN,
        }
    }
}

/// Result of a compilation that was not stopped by a tokenizer error
#[derive(Debug)]
pub struct Compilation {
    pub symbols: SymbolTable,
    /// One data-segment line per declared variable, in declaration order
    pub declarations: InstructionSequence,
    /// Statement and print code
    pub body: InstructionSequence,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Declarations followed by the body, without boilerplate
    pub fn body_listing(&self) -> Vec<String> {
        self.declarations
            .as_slice()
            .iter()
            .chain(self.body.as_slice())
            .cloned()
            .collect()
    }

    /// The complete program text
    pub fn listing(&self, boilerplate: &dyn Boilerplate) -> Vec<String> {
        fn fixed(lines: &mut Vec<String>, part: &[&str]) {
            lines.extend(part.iter().map(|s| s.to_string()));
        }

        let mut lines = Vec::new();
        fixed(&mut lines, boilerplate.data_segment());
        lines.extend_from_slice(self.declarations.as_slice());
        fixed(&mut lines, boilerplate.code_segment());
        lines.extend_from_slice(self.body.as_slice());
        fixed(&mut lines, boilerplate.main_end());
        fixed(&mut lines, boilerplate.print_routine());
        fixed(&mut lines, boilerplate.code_end());
        lines
    }

    /// Summary for `--json` output
    pub fn report(&self, source_file: impl Into<String>) -> CompileReport {
        CompileReport {
            success: !self.has_errors(),
            source_file: source_file.into(),
            diagnostics: self.diagnostics.clone(),
            variable_count: self.symbols.len(),
            instruction_count: self.body.len(),
        }
    }
}

/// Compiler front door
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compile source text
    pub fn compile(&self, source: &str) -> Result<Compilation> {
        self.compile_reader(SourceReader::new(source))
    }

    /// Compile a file on disk
    pub fn compile_file(&self, path: &Path) -> Result<Compilation> {
        info!("compiling {}", path.display());
        self.compile_reader(SourceReader::from_file(path)?)
    }

    fn compile_reader(&self, reader: SourceReader) -> Result<Compilation> {
        let lexer = Lexer::from_reader(reader).with_max_identifier_len(self.options.max_identifier_len);
        let output = Parser::new(lexer).parse_program()?;

        let mut declarations: CodeGen = CodeGen::default();
        for id in output.symbols.identifiers() {
            declarations.declare_variable(&id.name);
        }

        debug!(
            "{} variables, {} instructions, {} diagnostics",
            output.symbols.len(),
            output.code.len(),
            output.diagnostics.len()
        );

        Ok(Compilation {
            symbols: output.symbols,
            declarations: declarations.into_sink(),
            body: output.code,
            diagnostics: output.diagnostics,
        })
    }
}

/// Compile with default options
pub fn compile(source: &str) -> Result<Compilation> {
    Compiler::default().compile(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DosBoilerplate;
    use pretty_assertions::assert_eq;

    const ROUND_TRIP: &str = "Var a,b:Logical;\nBegin\na := 1;\nb := !a\nEnd;\nPrint b\n";

    #[test]
    fn test_round_trip_body() {
        let compilation = compile(ROUND_TRIP).unwrap();
        assert!(!compilation.has_errors());
        assert_eq!(
            compilation.body_listing(),
            vec![
                "a  dw    1",
                "b  dw    1",
                "mov ax, 1",
                "push ax",
                "pop ax",
                "mov a, ax",
                "mov ax, a",
                "push ax",
                "pop ax",
                "not ax",
                "and ax, 1",
                "push ax",
                "pop ax",
                "mov b, ax",
                "mov ax, b",
                "push ax",
                "CALL PRINT",
                "pop ax",
            ]
        );
    }

    #[test]
    fn test_listing_layout() {
        let compilation = compile(ROUND_TRIP).unwrap();
        let listing = compilation.listing(&DosBoilerplate);

        assert_eq!(listing.first().map(String::as_str), Some("data segment"));
        assert_eq!(listing[1], "a  dw    1");
        assert_eq!(listing[2], "b  dw    1");
        assert_eq!(listing[3], "PRINT_BUF DB ' ' DUP(10)");
        assert_eq!(listing.last().map(String::as_str), Some("end main"));

        let body_start = listing.iter().position(|l| l == "mov ds,ax").unwrap() + 1;
        assert_eq!(listing[body_start], "mov ax, 1");
        let main_end = listing.iter().position(|l| l == "mov ax,4c00h").unwrap();
        assert_eq!(listing[main_end - 2], "CALL PRINT");
        assert!(main_end < listing.iter().position(|l| l == "PRINT PROC NEAR").unwrap());
    }

    #[test]
    fn test_compiling_twice_is_identical() {
        let first = compile(ROUND_TRIP).unwrap().listing(&DosBoilerplate);
        let second = compile(ROUND_TRIP).unwrap().listing(&DosBoilerplate);
        assert_eq!(first, second);
    }

    #[test]
    fn test_identifier_limit_option() {
        let compiler = Compiler::new(CompileOptions {
            max_identifier_len: 7,
        });
        // Keywords count too: `Logical` is exactly seven characters
        assert!(compiler.compile("Var abcdefg:Logical; Begin abcdefg := 1 End; Print abcdefg").is_ok());
        assert!(compiler.compile("Var abcdefgh:Logical; Begin abcdefgh := 1 End; Print abcdefgh").is_err());
    }

    #[test]
    fn test_report_counts() {
        let report = compile(ROUND_TRIP).unwrap().report("round_trip.txt");
        assert!(report.success);
        assert_eq!(report.variable_count, 2);
        assert_eq!(report.instruction_count, 16);
    }
}
