//! Stack-machine code generation
//!
//! Every expression leaves one word on the run-time stack. Operators pop
//! their operands into `ax`/`bx` and push the result back, so stack balance
//! follows from the order in which the parser calls these methods.

/// Append-only destination for instruction lines
pub trait InstructionSink {
    /// Append one instruction line
    fn emit(&mut self, instruction: String);
}

/// Ordered log of emitted instructions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSequence {
    lines: Vec<String>,
}

impl InstructionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Read-only view handed to later stages
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn into_vec(self) -> Vec<String> {
        self.lines
    }
}

impl InstructionSink for InstructionSequence {
    fn emit(&mut self, instruction: String) {
        self.lines.push(instruction);
    }
}

impl InstructionSink for Vec<String> {
    fn emit(&mut self, instruction: String) {
        self.push(instruction);
    }
}

/// Emits 16-bit x86 stack-machine code into a sink
#[derive(Debug, Default)]
pub struct CodeGen<S = InstructionSequence> {
    sink: S,
}

impl<S: InstructionSink> CodeGen<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self, line: &str) {
        self.sink.emit(line.to_string());
    }

    /// Data-segment slot for a variable
    pub fn declare_variable(&mut self, name: &str) {
        self.sink.emit(format!("{}  dw    1", name));
    }

    /// Push the constant 1 or 0
    pub fn load_constant(&mut self, value: bool) {
        self.sink.emit(format!("mov ax, {}", u8::from(value)));
        self.emit("push ax");
    }

    /// Push a variable's current value
    pub fn load_variable(&mut self, name: &str) {
        self.sink.emit(format!("mov ax, {}", name));
        self.emit("push ax");
    }

    /// Pop one, push its logical NOT restricted to {0, 1}
    pub fn negation(&mut self) {
        self.emit("pop ax");
        self.emit("not ax");
        self.emit("and ax, 1");
        self.emit("push ax");
    }

    /// Pop two, push bitwise AND
    pub fn conjunction(&mut self) {
        self.emit("pop bx");
        self.emit("pop ax");
        self.emit("and ax, bx");
        self.emit("push ax");
    }

    /// Pop two, push bitwise OR
    pub fn disjunction(&mut self) {
        self.emit("pop bx");
        self.emit("pop ax");
        self.emit("or ax, bx");
        self.emit("push ax");
    }

    /// Pop two, push (NOT left) OR right
    pub fn implication(&mut self) {
        self.emit("pop bx");
        self.emit("pop ax");
        self.emit("not ax");
        self.emit("and ax, 1");
        self.emit("or ax, bx");
        self.emit("push ax");
    }

    /// Pop one into the target variable
    pub fn store(&mut self, name: &str) {
        self.emit("pop ax");
        self.sink.emit(format!("mov {}, ax", name));
    }

    /// Load a variable and call the print routine
    pub fn print(&mut self, name: &str) {
        self.load_variable(name);
        self.emit("CALL PRINT");
        self.emit("pop ax");
    }
}
