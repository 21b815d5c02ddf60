//! Whitespace-delimited token scanner with line tracking.

use std::str::FromStr;

use normmatch_core::errors::FormatError;

/// One whitespace-delimited token and the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
}

/// Cursor over the tokens of a prototype table source.
///
/// Tokens may be split across lines arbitrarily; line numbers are only
/// tracked for error reporting.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    /// Line of the scan position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Line of the next token, skipping any whitespace before it.
    pub fn next_line(&mut self) -> usize {
        self.skip_whitespace();
        self.line
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            if bytes[self.pos] == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    /// True once only whitespace remains.
    pub fn is_at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.src.len()
    }

    /// Consume and return the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        let start = self.pos;
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        Some(Token {
            text: &self.src[start..self.pos],
            line: self.line,
        })
    }

    /// Consume the next token, failing at end of input.
    pub fn expect_token(&mut self, expected: &str) -> Result<Token<'a>, FormatError> {
        self.next_token().ok_or_else(|| FormatError::UnexpectedEof {
            line: self.line,
            expected: expected.to_string(),
        })
    }

    /// Consume the next token and parse it as `T`.
    pub fn expect_parsed<T: FromStr>(&mut self, expected: &str) -> Result<(T, usize), FormatError> {
        let token = self.expect_token(expected)?;
        token
            .text
            .parse::<T>()
            .map(|v| (v, token.line))
            .map_err(|_| FormatError::InvalidToken {
                line: token.line,
                expected: expected.to_string(),
                found: token.text.to_string(),
            })
    }

    /// Consume `n` floating point values.
    pub fn expect_floats(&mut self, n: usize, expected: &str) -> Result<Vec<f64>, FormatError> {
        (0..n)
            .map(|_| self.expect_parsed::<f64>(expected).map(|(v, _)| v))
            .collect()
    }

    /// Consume one of `keywords`, returning its position in the list.
    pub fn expect_keyword(&mut self, keywords: &[&str]) -> Result<(usize, usize), FormatError> {
        let expected = keywords.join(" or ");
        let token = self.expect_token(&expected)?;
        keywords
            .iter()
            .position(|k| *k == token.text)
            .map(|i| (i, token.line))
            .ok_or_else(|| FormatError::InvalidToken {
                line: token.line,
                expected,
                found: token.text.to_string(),
            })
    }
}
