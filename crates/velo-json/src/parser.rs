//! Recursive-descent parser: text → [`Node`] tree.
//!
//! The grammar is JSON with two deliberate leniencies inherited from the
//! updater's own documents:
//!
//! - `//` line comments and `/* */` block comments are allowed anywhere
//!   whitespace is.
//! - Object members may be separated by any number of commas (including none,
//!   and trailing ones). Arrays, by contrast, require exactly one comma between
//!   values and reject leading or trailing commas. The updater's own reader
//!   accepts `[1,]`; this parser does not.
//!
//! Also, any word starting with `n` is read as `null`.
//!
//! # Example
//! ```
//! use velo_json::parse;
//!
//! let node = parse(r#"{ "id": "MyApp", /* build */ "size": 1024 }"#).unwrap();
//! let obj = node.as_object().unwrap();
//! assert_eq!(obj["id"].as_str().unwrap(), "MyApp");
//! assert_eq!(obj["size"].as_number().unwrap(), 1024.0);
//! ```

use std::str::FromStr;

use tracing::{debug, trace};

use crate::appender::Appender;
use crate::error::{ParseError, ParseErrorKind};
use crate::node::{Node, Object};
use crate::scanner::Scanner;
use crate::tokenizer::{peek_token, skip_trivia, Token};

/// Default limit on array/object nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested arrays/objects. Deeper input fails with
    /// [`ParseErrorKind::TooDeeplyNested`] instead of exhausting the stack.
    pub max_depth: usize,
    /// Fail with [`ParseErrorKind::TrailingCharacters`] when anything other
    /// than whitespace or comments follows the root value. Off by default.
    pub reject_trailing: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing: false,
        }
    }
}

impl ParseOptions {
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn reject_trailing(mut self, reject: bool) -> Self {
        self.reject_trailing = reject;
        self
    }
}

/// Parse `text` with default options.
pub fn parse(text: &str) -> Result<Node, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parse `text` with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    let mut parser = Parser::new(text, options);
    let result = parser.parse_document();
    if let Err(err) = &result {
        debug!(kind = ?err.kind, offset = err.offset, "JSON parse failed");
    }
    result
}

impl FromStr for Node {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

struct Parser<'a, 'o> {
    scanner: Scanner<'a>,
    buf: Appender,
    options: &'o ParseOptions,
    depth: usize,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(text: &'a str, options: &'o ParseOptions) -> Self {
        Parser {
            scanner: Scanner::new(text),
            buf: Appender::new(),
            options,
            depth: 0,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.scanner.offset())
    }

    fn parse_document(&mut self) -> Result<Node, ParseError> {
        let root = self.parse_value()?;
        if self.options.reject_trailing {
            if let Err(at) = skip_trivia(&mut self.scanner) {
                return Err(ParseError::new(ParseErrorKind::TrailingCharacters, at));
            }
            if !self.scanner.end_reached() {
                return Err(self.error(ParseErrorKind::TrailingCharacters));
            }
        }
        Ok(root)
    }

    fn parse_value(&mut self) -> Result<Node, ParseError> {
        match peek_token(&mut self.scanner) {
            Token::String => self.parse_string().map(Node::String),
            Token::Number => self.parse_number(),
            Token::Bool => self.parse_bool(),
            Token::Null => Ok(self.parse_null()),
            Token::CurlyOpen => self.parse_object(),
            Token::SquareOpen => self.parse_array(),
            _ => Err(self.error(ParseErrorKind::InvalidToken)),
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        // opening quote
        self.scanner.read();
        self.buf.clear();
        loop {
            let at = self.scanner.offset();
            match self.scanner.read() {
                None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                Some('"') => return Ok(self.buf.take()),
                Some('\\') => self.parse_escape(at)?,
                Some(c) => self.buf.push_char(c),
            }
        }
    }

    /// Decode the escape whose backslash sits at byte offset `at`.
    fn parse_escape(&mut self, at: usize) -> Result<(), ParseError> {
        let invalid = ParseError::new(ParseErrorKind::InvalidEscape, at);
        match self.scanner.read() {
            None => return Err(self.error(ParseErrorKind::UnterminatedString)),
            Some(c @ ('"' | '\\' | '/')) => self.buf.push_char(c),
            Some('b') => self.buf.push_unit(0x08),
            Some('f') => self.buf.push_unit(0x0C),
            Some('n') => self.buf.push_char('\n'),
            Some('r') => self.buf.push_char('\r'),
            Some('t') => self.buf.push_char('\t'),
            Some('u') => {
                let hex = self.scanner.read_n(4).map_err(|_| invalid.clone())?;
                if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(invalid);
                }
                let unit = u16::from_str_radix(hex, 16).map_err(|_| invalid)?;
                self.buf.push_unit(unit);
            }
            Some(_) => return Err(invalid),
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Node, ParseError> {
        let at = self.scanner.offset();
        let word = self.scanner.read_word(&mut self.buf);
        let invalid = ParseError::new(ParseErrorKind::InvalidNumber, at);
        // `f64::from_str` also takes `inf`/`nan`, which are not JSON.
        if !word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            return Err(invalid);
        }
        word.parse::<f64>().map(Node::Number).map_err(|_| invalid)
    }

    fn parse_bool(&mut self) -> Result<Node, ParseError> {
        let at = self.scanner.offset();
        match self.scanner.read_word(&mut self.buf).as_str() {
            "true" => Ok(Node::Bool(true)),
            "false" => Ok(Node::Bool(false)),
            _ => Err(ParseError::new(ParseErrorKind::InvalidBoolean, at)),
        }
    }

    fn parse_null(&mut self) -> Node {
        let word = self.scanner.read_word(&mut self.buf);
        if word != "null" {
            trace!(word = %word, "non-standard word read as null");
        }
        Node::Null
    }

    fn parse_object(&mut self) -> Result<Node, ParseError> {
        self.enter()?;
        trace!(depth = self.depth, offset = self.scanner.offset(), "parsing object");
        self.scanner.read();
        let mut entries = Object::new();
        loop {
            match peek_token(&mut self.scanner) {
                Token::None => return Err(self.error(ParseErrorKind::UnterminatedObject)),
                Token::Comma => {
                    self.scanner.read();
                }
                Token::CurlyClose => {
                    self.scanner.read();
                    self.depth -= 1;
                    return Ok(Node::Object(entries));
                }
                Token::String => {
                    let key = self.parse_string()?;
                    if peek_token(&mut self.scanner) != Token::Colon {
                        return Err(self.error(ParseErrorKind::ExpectedColon));
                    }
                    self.scanner.read();
                    let value = self.parse_value()?;
                    entries.insert(key, value);
                }
                _ => return Err(self.error(ParseErrorKind::InvalidToken)),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Node, ParseError> {
        self.enter()?;
        trace!(depth = self.depth, offset = self.scanner.offset(), "parsing array");
        self.scanner.read();
        let mut items = Vec::new();
        let mut expect_comma = false;
        let mut dangling_comma = None;
        loop {
            match peek_token(&mut self.scanner) {
                Token::None => return Err(self.error(ParseErrorKind::UnterminatedArray)),
                Token::Comma => {
                    if !expect_comma {
                        return Err(self.error(ParseErrorKind::UnexpectedComma));
                    }
                    expect_comma = false;
                    dangling_comma = Some(self.scanner.offset());
                    self.scanner.read();
                }
                Token::SquareClose => {
                    if let Some(at) = dangling_comma {
                        return Err(ParseError::new(ParseErrorKind::UnexpectedComma, at));
                    }
                    self.scanner.read();
                    self.depth -= 1;
                    return Ok(Node::Array(items));
                }
                _ => {
                    if expect_comma {
                        return Err(self.error(ParseErrorKind::ExpectedComma));
                    }
                    expect_comma = true;
                    dangling_comma = None;
                    items.push(self.parse_value()?);
                }
            }
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(ParseErrorKind::TooDeeplyNested));
        }
        self.depth += 1;
        Ok(())
    }
}
