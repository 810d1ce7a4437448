//! Lexer for boolc
//!
//! Pulls characters from a `SourceReader` and keeps exactly one current
//! lexeme. There is no lookahead buffer: `advance` discards the previous
//! lexeme for good.

use crate::frontend::source::SourceReader;
use crate::frontend::token::{Lexeme, Token};
use crate::utils::{Error, Location, Result};

/// Default upper bound on identifier and operator-word length, in characters
pub const MAX_IDENTIFIER_LEN: usize = 50;

/// The lexer state
pub struct Lexer {
    reader: SourceReader,
    current: Token,
    max_identifier_len: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code.
    ///
    /// The current lexeme is `None` until the first `advance`.
    pub fn new(source: &str) -> Self {
        Self::from_reader(SourceReader::new(source))
    }

    /// Create a lexer over an existing character source
    pub fn from_reader(reader: SourceReader) -> Self {
        let location = reader.location();
        Self {
            reader,
            current: Token::new(Lexeme::None, location),
            max_identifier_len: MAX_IDENTIFIER_LEN,
        }
    }

    /// Override the identifier length limit. A limit of 0 rejects every word.
    pub fn with_max_identifier_len(mut self, max: usize) -> Self {
        self.max_identifier_len = max;
        self
    }

    /// The current token
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// The current lexeme kind
    pub fn lexeme(&self) -> &Lexeme {
        &self.current.lexeme
    }

    /// Text of the current lexeme, when it is a name
    pub fn text(&self) -> Option<&str> {
        self.current.lexeme.text()
    }

    /// Where the current lexeme starts
    pub fn location(&self) -> Location {
        self.current.location
    }

    /// Skip whitespace
    fn skip_whitespace(&mut self) {
        while self.reader.current().is_some_and(char::is_whitespace) {
            self.reader.read_next();
        }
    }

    /// Consume the current character and yield `lexeme`
    fn single(&mut self, lexeme: Lexeme) -> Lexeme {
        self.reader.read_next();
        lexeme
    }

    /// Read a run of characters starting at the current one, continuing while
    /// `accept` holds, up to the length limit
    fn read_word(&mut self, location: Location, accept: fn(char) -> bool) -> Result<String> {
        let mut text = String::new();
        let mut len = 0;

        while let Some(c) = self.reader.current() {
            if len > 0 && !accept(c) {
                break;
            }
            if len == self.max_identifier_len {
                return Err(Error::IdentifierTooLong {
                    text,
                    max: self.max_identifier_len,
                    location,
                });
            }
            text.push(c);
            len += 1;
            self.reader.read_next();
        }

        Ok(text)
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self, location: Location) -> Result<Lexeme> {
        let text = self.read_word(location, char::is_alphabetic)?;
        Ok(Lexeme::keyword_from_str(&text).unwrap_or(Lexeme::Name(text)))
    }

    /// Read a dotted operator word such as `.AND.`; anything else is a name
    fn read_operator_word(&mut self, location: Location) -> Result<Lexeme> {
        let text = self.read_word(location, |c| c.is_alphabetic() || c == '.')?;
        Ok(Lexeme::operator_from_str(&text).unwrap_or(Lexeme::Name(text)))
    }

    /// Move to the next lexeme
    pub fn advance(&mut self) -> Result<()> {
        self.skip_whitespace();
        let location = self.reader.location();

        let Some(c) = self.reader.current() else {
            self.current = Token::new(Lexeme::EndOfInput, location);
            return Ok(());
        };

        let lexeme = match c {
            '.' => self.read_operator_word(location)?,
            c if c.is_alphabetic() => self.read_identifier(location)?,
            '0' => self.single(Lexeme::False),
            '1' => self.single(Lexeme::True),
            '(' => self.single(Lexeme::LeftBracket),
            ')' => self.single(Lexeme::RightBracket),
            ';' => self.single(Lexeme::Semicolon),
            ',' => self.single(Lexeme::Comma),
            '!' => self.single(Lexeme::Negation),
            '&' => self.single(Lexeme::Conjunction),
            '|' => self.single(Lexeme::Disjunction),
            '^' => self.single(Lexeme::Implication),
            ':' => {
                self.reader.read_next();
                if self.reader.current() == Some('=') {
                    self.single(Lexeme::Assign)
                } else {
                    Lexeme::Colon
                }
            }
            ch => return Err(Error::IllegalCharacter { ch, location }),
        };

        self.current = Token::new(lexeme, location);
        Ok(())
    }

    /// Tokenize the entire source and return all tokens, `EndOfInput` last
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.advance()?;
            let token = self.current.clone();
            let is_end = token.lexeme == Lexeme::EndOfInput;
            tokens.push(token);
            if is_end {
                break;
            }
        }
        Ok(tokens)
    }
}
