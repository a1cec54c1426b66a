//! Lookahead classification of the next significant character.

use crate::scanner::Scanner;

/// What the next significant input position starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// End of input, an unterminated block comment, or a character no value
    /// can start with.
    None,
    CurlyOpen,
    CurlyClose,
    SquareOpen,
    SquareClose,
    Colon,
    Comma,
    String,
    Number,
    Bool,
    Null,
}

/// Skip whitespace and comments, then classify the next character without
/// consuming it.
pub fn peek_token(scanner: &mut Scanner<'_>) -> Token {
    if skip_trivia(scanner).is_err() {
        return Token::None;
    }
    match scanner.peek() {
        None => Token::None,
        Some('{') => Token::CurlyOpen,
        Some('}') => Token::CurlyClose,
        Some('[') => Token::SquareOpen,
        Some(']') => Token::SquareClose,
        Some(',') => Token::Comma,
        Some('"') => Token::String,
        Some(':') => Token::Colon,
        Some('0'..='9' | '-') => Token::Number,
        Some('t' | 'f') => Token::Bool,
        Some('n') => Token::Null,
        Some(_) => Token::None,
    }
}

/// Skip whitespace, `//` line comments and `/* */` block comments.
///
/// A lone `/` or an unterminated block comment is consumed and reported as
/// `Err` holding the offset of its `/`.
pub fn skip_trivia(scanner: &mut Scanner<'_>) -> Result<(), usize> {
    loop {
        scanner.skip_whitespace();
        if scanner.peek() != Some('/') {
            return Ok(());
        }
        let start = scanner.offset();
        scanner.read();
        match scanner.peek() {
            Some('/') => skip_line_comment(scanner),
            Some('*') => {
                scanner.read();
                if !skip_block_comment(scanner) {
                    return Err(start);
                }
            }
            _ => return Err(start),
        }
    }
}

fn skip_line_comment(scanner: &mut Scanner<'_>) {
    while scanner.peek().is_some_and(|c| c != '\n') {
        scanner.read();
    }
}

/// Consume through the closing `*/`. Returns false if input ends first.
fn skip_block_comment(scanner: &mut Scanner<'_>) -> bool {
    while let Some(c) = scanner.read() {
        if c == '*' && scanner.peek() == Some('/') {
            scanner.read();
            return true;
        }
    }
    false
}
