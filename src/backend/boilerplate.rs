//! Fixed listing text around the generated program
//!
//! The translator only produces variable declarations and the statement
//! body. Segment headers, the print routine and the exit sequence come from
//! a `Boilerplate` provider.

/// Provider of the verbatim text spliced around generated code
pub trait Boilerplate {
    /// Opens the data segment; declarations follow
    fn data_segment(&self) -> &[&'static str];

    /// Closes the data segment and opens stack and code segments, up to the
    /// first statement of the program body
    fn code_segment(&self) -> &[&'static str];

    /// Exit sequence of the main procedure
    fn main_end(&self) -> &[&'static str];

    /// Body of the routine invoked by `CALL PRINT`
    fn print_routine(&self) -> &[&'static str];

    /// Closes the code segment
    fn code_end(&self) -> &[&'static str];
}

const DATA_SEGMENT: &[&str] = &["data segment"];

const CODE_SEGMENT: &[&str] = &[
    "PRINT_BUF DB ' ' DUP(10)",
    "BUFEND    DB '$'",
    "data ends",
    "stk segment stack",
    "db 256 dup (\"?\")",
    "stk ends",
    "code segment",
    "assume cs:code,ds:data,ss:stk",
    "start:",
    "main proc",
    "mov ax,data",
    "mov ds,ax",
];

const MAIN_END: &[&str] = &["mov ax,4c00h", "int 21h", "main endp"];

const PRINT_ROUTINE: &[&str] = &[
    "PRINT PROC NEAR",
    "MOV CX, 10",
    "MOV DI, BUFEND - PRINT_BUF",
    "PRINT_LOOP:",
    "MOV DX, 0",
    "DIV CX",
    "ADD DL, '0'",
    "MOV [PRINT_BUF + DI - 1], DL",
    "DEC DI",
    "CMP AL, 0",
    "JNE PRINT_LOOP",
    "LEA DX, PRINT_BUF",
    "ADD DX, DI",
    "MOV AH, 09H",
    "INT 21H",
    "RET",
    "PRINT ENDP",
];

const CODE_END: &[&str] = &["code ends", "end main"];

/// MASM/TASM listing for a 16-bit DOS executable
#[derive(Debug, Clone, Copy, Default)]
pub struct DosBoilerplate;

impl Boilerplate for DosBoilerplate {
    fn data_segment(&self) -> &[&'static str] {
        DATA_SEGMENT
    }

    fn code_segment(&self) -> &[&'static str] {
        CODE_SEGMENT
    }

    fn main_end(&self) -> &[&'static str] {
        MAIN_END
    }

    fn print_routine(&self) -> &[&'static str] {
        PRINT_ROUTINE
    }

    fn code_end(&self) -> &[&'static str] {
        CODE_END
    }
}
