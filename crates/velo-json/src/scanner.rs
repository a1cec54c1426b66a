//! Character cursor over the input text.

use crate::appender::Appender;
use crate::error::{ParseError, ParseErrorKind};

/// Position cursor over a `&str`. Offsets are byte offsets; every read
/// advances by one whole `char`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner { text, pos: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn end_reached(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Read exactly `n` characters. On `UnexpectedEnd` the cursor does not move.
    pub fn read_n(&mut self, n: usize) -> Result<&'a str, ParseError> {
        let rest = &self.text[self.pos..];
        let len = match rest.char_indices().nth(n) {
            Some((idx, _)) => idx,
            None if rest.chars().count() == n => rest.len(),
            None => return Err(ParseError::new(ParseErrorKind::UnexpectedEnd, self.text.len())),
        };
        self.pos += len;
        Ok(&rest[..len])
    }

    pub fn peek_whitespace(&self) -> bool {
        self.peek().is_some_and(is_whitespace)
    }

    pub fn peek_word_break(&self) -> bool {
        self.peek().is_some_and(is_word_break)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek_whitespace() {
            self.pos += 1;
        }
    }

    /// Read up to the next word-break into `buf` and return it.
    pub fn read_word(&mut self, buf: &mut Appender) -> String {
        buf.clear();
        while !self.end_reached() && !self.peek_word_break() {
            if let Some(c) = self.read() {
                buf.push_char(c);
            }
        }
        buf.take()
    }
}

pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Characters that end an unquoted literal (number, `true`, `false`, `null`).
pub fn is_word_break(c: char) -> bool {
    matches!(
        c,
        ' ' | ',' | ':' | '"' | '{' | '}' | '[' | ']' | '\t' | '\n' | '\r' | '/'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let s = Scanner::new("ab");
        assert_eq!(s.peek(), Some('a'));
        assert_eq!(s.peek(), Some('a'));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn read_until_end() {
        let mut s = Scanner::new("aé");
        assert_eq!(s.read(), Some('a'));
        assert_eq!(s.read(), Some('é'));
        assert!(s.end_reached());
        assert_eq!(s.read(), None);
        assert_eq!(s.peek(), None);
    }

    #[test]
    fn read_n_exact_and_short() {
        let mut s = Scanner::new("00e9x");
        assert_eq!(s.read_n(4).unwrap(), "00e9");
        assert_eq!(s.offset(), 4);

        let err = s.read_n(2).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert_eq!(s.offset(), 4);
        assert_eq!(s.read_n(1).unwrap(), "x");
        assert!(s.end_reached());
        assert_eq!(s.read_n(0).unwrap(), "");
    }

    #[test]
    fn word_stops_at_break() {
        let mut buf = Appender::new();
        let mut s = Scanner::new("true,false");
        assert_eq!(s.read_word(&mut buf), "true");
        assert_eq!(s.peek(), Some(','));

        let mut s = Scanner::new("12/*c*/");
        assert_eq!(s.read_word(&mut buf), "12");
        assert_eq!(s.peek(), Some('/'));

        let mut s = Scanner::new("-3.5e2");
        assert_eq!(s.read_word(&mut buf), "-3.5e2");
        assert!(s.end_reached());
    }

    #[test]
    fn skip_whitespace_stops_at_content() {
        let mut s = Scanner::new(" \t\r\n x");
        s.skip_whitespace();
        assert_eq!(s.peek(), Some('x'));
    }

    #[test]
    fn predicates() {
        for c in [' ', '\t', '\n', '\r'] {
            assert!(is_whitespace(c));
            assert!(is_word_break(c));
        }
        for c in [',', ':', '"', '{', '}', '[', ']', '/'] {
            assert!(is_word_break(c));
            assert!(!is_whitespace(c));
        }
        assert!(!is_word_break('a'));
        assert!(!is_word_break('-'));
        assert!(!is_word_break('.'));
    }
}
