//! Parser for boolc
//!
//! Single-pass recursive descent. Each grammar rule checks its lexemes,
//! consults the symbol table and emits stack-machine code before returning
//! the static type it computed; no syntax tree is built.
//!
//! ```text
//! Program     := VarSection ';' Begin StmtSeq End ';' PrintStmt
//! VarSection  := 'Var' DeclGroup { DeclGroup }
//! DeclGroup   := Name { ',' Name } ':' 'Logical'
//! StmtSeq     := Assignment { ';' Assignment }
//! Assignment  := Name ':=' Expr
//! Expr        := Implication
//! Implication := Disjunction { '^' Disjunction }
//! Disjunction := Conjunction { '|' Conjunction }
//! Conjunction := Atom { '&' Atom }
//! Atom        := '!' Atom | Name | True | False | '(' Expr ')'
//! PrintStmt   := 'Print' Name
//! ```
//!
//! Structural and semantic problems are recorded as diagnostics and parsing
//! carries on, so the caller always gets a complete instruction sequence.
//! Only tokenizer errors abort.

use std::mem;

use log::{debug, trace};

use crate::backend::{CodeGen, InstructionSequence};
use crate::feedback::{Diagnostic, DiagnosticKind};
use crate::frontend::lexer::Lexer;
use crate::frontend::symbols::SymbolTable;
use crate::frontend::token::Lexeme;
use crate::types::{Category, Type};
use crate::utils::{Location, Result};

/// How many `!` and `(` may enclose a single operand
pub const MAX_NESTING_DEPTH: usize = 256;

/// Everything one parse produces
#[derive(Debug)]
pub struct ParseOutput {
    pub symbols: SymbolTable,
    pub code: InstructionSequence,
    pub diagnostics: Vec<Diagnostic>,
}

/// The parser
pub struct Parser {
    lexer: Lexer,
    symbols: SymbolTable,
    code: CodeGen,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
}

impl Parser {
    /// Create a new parser from a lexer that has not been advanced yet
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            symbols: SymbolTable::new(),
            code: CodeGen::default(),
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Lexeme {
        self.lexer.lexeme()
    }

    fn check(&self, kind: &Lexeme) -> bool {
        self.current().same_kind(kind)
    }

    fn advance(&mut self) -> Result<()> {
        self.lexer.advance()?;
        trace!("lexeme {} at {}", self.lexer.lexeme(), self.lexer.location());
        Ok(())
    }

    /// Text of the current lexeme if it is a name
    fn current_name(&self) -> Option<String> {
        self.lexer.text().map(str::to_string)
    }

    /// Record a diagnostic against the current lexeme
    fn report(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(kind, self.lexer.location(), self.current().kind_name());
        debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn expected(&mut self, what: &str) {
        self.report(DiagnosticKind::UnexpectedLexeme {
            expected: what.to_string(),
        });
    }

    /// Report if the current lexeme is not of the expected kind, then move
    /// past it either way
    fn expect(&mut self, expected: Lexeme) -> Result<()> {
        if !self.check(&expected) {
            self.expected(expected.kind_name());
        }
        self.advance()
    }

    /// Type of `name` when it is a declared variable; reports otherwise
    fn variable_type(&mut self, name: &str) -> Option<Type> {
        let found = self.symbols.lookup(name).map(|id| (id.category, id.ty));
        match found {
            Some((Category::Var, ty)) => Some(ty),
            Some((category, _)) => {
                self.report(DiagnosticKind::NotAVariable {
                    name: name.to_string(),
                    category,
                });
                None
            }
            None => {
                self.report(DiagnosticKind::UndeclaredIdentifier {
                    name: name.to_string(),
                });
                None
            }
        }
    }

    // ==================== Parsing Methods ====================

    /// Parse a complete program
    pub fn parse_program(mut self) -> Result<ParseOutput> {
        self.advance()?;

        self.parse_var_section()?;
        self.expect(Lexeme::Semicolon)?;
        self.expect(Lexeme::Begin)?;

        self.parse_statements()?;

        self.expect(Lexeme::End)?;
        self.expect(Lexeme::Semicolon)?;

        self.parse_print()?;

        if !self.check(&Lexeme::EndOfInput) {
            self.expected(Lexeme::EndOfInput.kind_name());
        }

        Ok(ParseOutput {
            symbols: self.symbols,
            code: self.code.into_sink(),
            diagnostics: self.diagnostics,
        })
    }

    /// `Var` followed by declaration groups, as long as a name comes next
    fn parse_var_section(&mut self) -> Result<()> {
        self.expect(Lexeme::Var)?;

        let mut group: Vec<(String, Location)> = Vec::new();

        while let Some(name) = self.current_name() {
            group.push((name, self.lexer.location()));
            self.advance()?;

            if self.check(&Lexeme::Comma) {
                self.advance()?;
            } else if self.check(&Lexeme::Colon) {
                self.advance()?;
                if self.check(&Lexeme::Logical) {
                    self.declare_group(mem::take(&mut group));
                    self.advance()?;
                } else {
                    self.expected(Lexeme::Logical.kind_name());
                }
            } else {
                self.expected(Lexeme::Colon.kind_name());
            }
        }

        Ok(())
    }

    fn declare_group(&mut self, group: Vec<(String, Location)>) {
        for (name, location) in group {
            if self
                .symbols
                .declare(&name, Category::Var, Type::Bool, location)
                .is_err()
            {
                let diagnostic =
                    Diagnostic::new(DiagnosticKind::DuplicateIdentifier { name }, location, "Name");
                debug!("{}", diagnostic);
                self.diagnostics.push(diagnostic);
            }
        }
    }

    fn parse_statements(&mut self) -> Result<()> {
        self.parse_assignment()?;
        while self.check(&Lexeme::Semicolon) {
            self.advance()?;
            self.parse_assignment()?;
        }
        Ok(())
    }

    /// A statement slot that does not start with a name is empty
    fn parse_assignment(&mut self) -> Result<()> {
        let Some(target) = self.current_name() else {
            return Ok(());
        };
        self.variable_type(&target);
        self.advance()?;

        if self.check(&Lexeme::Assign) {
            self.advance()?;
            self.parse_expr()?;
        } else {
            self.expected(Lexeme::Assign.kind_name());
        }

        self.code.store(&target);
        Ok(())
    }

    fn parse_print(&mut self) -> Result<()> {
        self.expect(Lexeme::Print)?;

        match self.current_name() {
            Some(name) => {
                self.variable_type(&name);
                self.code.print(&name);
                self.advance()
            }
            None => {
                self.expected("Name");
                Ok(())
            }
        }
    }

    // ==================== Expressions ====================

    fn parse_expr(&mut self) -> Result<Type> {
        self.parse_implication()
    }

    fn parse_implication(&mut self) -> Result<Type> {
        let mut ty = self.parse_disjunction()?;
        while self.check(&Lexeme::Implication) {
            self.advance()?;
            ty = self.parse_disjunction()?;
            self.code.implication();
        }
        Ok(ty)
    }

    fn parse_disjunction(&mut self) -> Result<Type> {
        let mut ty = self.parse_conjunction()?;
        while self.check(&Lexeme::Disjunction) {
            self.advance()?;
            ty = self.parse_conjunction()?;
            self.code.disjunction();
        }
        Ok(ty)
    }

    fn parse_conjunction(&mut self) -> Result<Type> {
        let mut ty = self.parse_atom()?;
        while self.check(&Lexeme::Conjunction) {
            self.advance()?;
            ty = self.parse_atom()?;
            self.code.conjunction();
        }
        Ok(ty)
    }

    fn parse_atom(&mut self) -> Result<Type> {
        if self.depth == MAX_NESTING_DEPTH {
            self.report(DiagnosticKind::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
            return Ok(Type::None);
        }

        self.depth += 1;
        let ty = self.parse_operand();
        self.depth -= 1;
        ty
    }

    fn parse_operand(&mut self) -> Result<Type> {
        match self.current() {
            Lexeme::Negation => {
                self.advance()?;
                let operand = self.parse_atom()?;
                if operand.is_bool() {
                    self.code.negation();
                    Ok(Type::Bool)
                } else {
                    self.report(DiagnosticKind::NegationOfNonBool { found: operand });
                    Ok(Type::None)
                }
            }
            Lexeme::Name(_) => {
                let name = self.current_name().unwrap_or_default();
                let ty = match self.variable_type(&name) {
                    Some(ty) => {
                        self.code.load_variable(&name);
                        ty
                    }
                    None => Type::None,
                };
                self.advance()?;
                Ok(ty)
            }
            Lexeme::True | Lexeme::False => {
                let value = self.check(&Lexeme::True);
                self.code.load_constant(value);
                self.advance()?;
                Ok(Type::Bool)
            }
            Lexeme::LeftBracket => {
                self.advance()?;
                let ty = self.parse_expr()?;
                self.expect(Lexeme::RightBracket)?;
                Ok(ty)
            }
            _ => {
                self.report(DiagnosticKind::ExpectedOperand);
                Ok(Type::None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Error;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<ParseOutput> {
        Parser::new(Lexer::new(source)).parse_program()
    }

    fn body(source: &str) -> Vec<String> {
        let output = parse(source).unwrap();
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
        output.code.into_vec()
    }

    /// Statement body of `x := <expr>` with a..d declared, without the store
    fn expr_code(expr: &str) -> Vec<String> {
        let source = format!("Var a,b,c,d,x:Logical; Begin x := {} End; Print x", expr);
        let mut lines = body(&source);
        lines.truncate(lines.len() - 6);
        lines
    }

    const LOAD_A: &[&str] = &["mov ax, a", "push ax"];
    const LOAD_B: &[&str] = &["mov ax, b", "push ax"];
    const LOAD_C: &[&str] = &["mov ax, c", "push ax"];
    const LOAD_D: &[&str] = &["mov ax, d", "push ax"];
    const NOT: &[&str] = &["pop ax", "not ax", "and ax, 1", "push ax"];
    const AND: &[&str] = &["pop bx", "pop ax", "and ax, bx", "push ax"];
    const OR: &[&str] = &["pop bx", "pop ax", "or ax, bx", "push ax"];
    const IMPL: &[&str] = &["pop bx", "pop ax", "not ax", "and ax, 1", "or ax, bx", "push ax"];

    fn concat(parts: &[&[&str]]) -> Vec<String> {
        parts.iter().flat_map(|p| p.iter().map(|s| s.to_string())).collect()
    }

    #[test]
    fn test_minimal_program() {
        let lines = body("Var a:Logical; Begin a := 1 End; Print a");
        assert_eq!(
            lines,
            vec![
                "mov ax, 1", "push ax", "pop ax", "mov a, ax",
                "mov ax, a", "push ax", "CALL PRINT", "pop ax",
            ]
        );
    }

    #[test]
    fn test_conjunction_order() {
        assert_eq!(expr_code("a & b"), concat(&[LOAD_A, LOAD_B, AND]));
    }

    #[test]
    fn test_conjunction_binds_tighter_than_disjunction() {
        assert_eq!(
            expr_code("a | b & c"),
            concat(&[LOAD_A, LOAD_B, LOAD_C, AND, OR])
        );
    }

    #[test]
    fn test_implication_is_lowest() {
        assert_eq!(
            expr_code("a & b | c ^ d"),
            concat(&[LOAD_A, LOAD_B, AND, LOAD_C, OR, LOAD_D, IMPL])
        );
    }

    #[test]
    fn test_chains_are_left_associative() {
        assert_eq!(
            expr_code("a ^ b ^ c"),
            concat(&[LOAD_A, LOAD_B, IMPL, LOAD_C, IMPL])
        );
    }

    #[test]
    fn test_brackets_override_precedence() {
        assert_eq!(
            expr_code("(a | b) & c"),
            concat(&[LOAD_A, LOAD_B, OR, LOAD_C, AND])
        );
    }

    #[test]
    fn test_dotted_operators_match_symbols() {
        assert_eq!(expr_code(".NOT. a .AND. b .OR. c"), expr_code("!a & b | c"));
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(expr_code("!!a"), concat(&[LOAD_A, NOT, NOT]));
    }

    #[test]
    fn test_multiple_declaration_groups() {
        let output = parse("Var a,b:Logical c:Boolean; Begin c := a End; Print c").unwrap();
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.symbols.len(), 3);
        assert_eq!(output.symbols.lookup("c").unwrap().ty, Type::Bool);
    }

    #[test]
    fn test_duplicate_declaration() {
        let output = parse("Var x,x:Logical; Begin x := 0 End; Print x").unwrap();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::DuplicateIdentifier {
                name: "x".to_string()
            }
        );
        assert_eq!(output.diagnostics[0].location, Location::new(1, 7));
        assert_eq!(output.symbols.len(), 1);
    }

    #[test]
    fn test_undeclared_name_in_expression() {
        let output = parse("Var a:Logical; Begin a := q & 1 End; Print a").unwrap();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::UndeclaredIdentifier {
                name: "q".to_string()
            }
        );
        assert_eq!(output.diagnostics[0].lexeme, "Name");
        // Parsing continued: the literal, the AND, the store and the print are all there
        let code = output.code.into_vec();
        assert_eq!(code[0], "mov ax, 1");
        assert!(code.contains(&"CALL PRINT".to_string()));
    }

    #[test]
    fn test_undeclared_assignment_target_still_stores() {
        let output = parse("Var a:Logical; Begin z := 1 End; Print a").unwrap();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.code.as_slice()[3], "mov z, ax");
    }

    #[test]
    fn test_negating_untyped_operand() {
        let output = parse("Var a:Logical; Begin a := !q End; Print a").unwrap();
        let kinds: Vec<_> = output.diagnostics.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UndeclaredIdentifier {
                    name: "q".to_string()
                },
                DiagnosticKind::NegationOfNonBool { found: Type::None },
            ]
        );
    }

    #[test]
    fn test_missing_semicolon_cascades() {
        // `Begin` is consumed in place of the `;`, so later checks fail too
        let output = parse("Var a:Logical Begin a := 1 End; Print a").unwrap();
        assert!(output.diagnostics.len() > 1);
        let diag = &output.diagnostics[0];
        assert_eq!(
            diag.kind,
            DiagnosticKind::UnexpectedLexeme {
                expected: "Semicolon".to_string()
            }
        );
        assert_eq!(diag.lexeme, "Begin");
        assert_eq!(diag.location, Location::new(1, 15));
    }

    #[test]
    fn test_missing_operand() {
        let output = parse("Var a:Logical; Begin a := End; Print a").unwrap();
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::ExpectedOperand);
        assert_eq!(output.diagnostics[0].lexeme, "End");
    }

    #[test]
    fn test_trailing_semicolon_is_empty_statement() {
        let lines = body("Var a:Logical; Begin a := 0; End; Print a");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_trailing_input_is_reported() {
        let output = parse("Var a:Logical; Begin a := 0 End; Print a a").unwrap();
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::UnexpectedLexeme {
                expected: "EndOfInput".to_string()
            }
        );
    }

    #[test]
    fn test_binary_type_is_last_operand_type() {
        let kinds = |source: &str| -> Vec<DiagnosticKind> {
            parse(source)
                .unwrap()
                .diagnostics
                .into_iter()
                .map(|d| d.kind)
                .collect()
        };
        let undeclared = DiagnosticKind::UndeclaredIdentifier {
            name: "q".to_string(),
        };

        // `a` is last, so the group is Bool and the negation is accepted
        assert_eq!(
            kinds("Var a:Logical; Begin a := !(q & a) End; Print a"),
            vec![undeclared.clone()]
        );
        // `q` is last, so the group has no type
        assert_eq!(
            kinds("Var a:Logical; Begin a := !(a & q) End; Print a"),
            vec![undeclared, DiagnosticKind::NegationOfNonBool { found: Type::None }]
        );
    }

    #[test]
    fn test_unknown_dotted_word_is_an_undeclared_name() {
        let output = parse("Var a:Logical; Begin a := .NOT.a End; Print a").unwrap();
        assert_eq!(
            output.diagnostics.iter().map(|d| &d.kind).collect::<Vec<_>>(),
            vec![&DiagnosticKind::UndeclaredIdentifier {
                name: ".NOT.a".to_string()
            }]
        );
        let code = output.code.into_vec();
        assert_eq!(&code[..2], ["pop ax", "mov a, ax"]);
        assert!(code.contains(&"CALL PRINT".to_string()));
    }

    #[test]
    fn test_unknown_dotted_operator_is_not_fatal() {
        let output = parse("Var a,b:Logical; Begin a := b .NAND. b End; Print a").unwrap();
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::UnexpectedLexeme {
                expected: "End".to_string()
            }
        );
        assert_eq!(output.diagnostics[0].lexeme, "Name");
        assert_eq!(output.diagnostics[0].location, Location::new(1, 31));
    }

    #[test]
    fn test_nesting_within_limit() {
        let depth = MAX_NESTING_DEPTH - 1;
        let expr = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(expr_code(&expr), concat(&[LOAD_A]));
    }

    #[test]
    fn test_nesting_too_deep_is_reported() {
        let expr = format!("{}a", "!".repeat(MAX_NESTING_DEPTH + 10));
        let source = format!("Var a:Logical; Begin a := {} End; Print a", expr);
        let output = parse(&source).unwrap();
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            }
        );
        assert_eq!(output.diagnostics[0].lexeme, "Negation");
    }

    #[test]
    fn test_tokenizer_error_aborts() {
        let err = parse("Var a:Logical; Begin a := 2 End; Print a").unwrap_err();
        assert!(matches!(err, Error::IllegalCharacter { ch: '2', .. }));
    }
}
