//! A whitespace-separated language used by the unit tests.

use crate::token::{Span, Token};
use crate::traits::{Language, TokenSource};
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Word,
    List,
    Pair,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    ExpectWord,
    ExpectClose,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::ExpectWord => f.write_str("expected a word"),
            Code::ExpectClose => f.write_str("expected ')'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadWord;

impl fmt::Display for BadWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bad word")
    }
}

impl Language for Test {
    type Kind = Kind;
    type Code = Code;
    type LexError = BadWord;
}

/// Splits `input` on spaces; the word `!err` becomes an error token.
pub struct Words {
    input: &'static str,
    offset: usize,
}

pub fn tokens(input: &'static str) -> Words {
    Words { input, offset: 0 }
}

impl TokenSource<'static, Test> for Words {
    fn next_token(&mut self) -> Token<'static, Test> {
        let rest = &self.input[self.offset..];
        let skipped = rest.len() - rest.trim_start().len();
        let start = self.offset + skipped;
        let len = self.input[start..]
            .find(' ')
            .unwrap_or(self.input.len() - start);
        let column = start as u32 + 1;
        self.offset = start + len;
        if len == 0 {
            return Token::eof(start, 1, column);
        }
        let text = &self.input[start..start + len];
        let span = Span::new(start, start + len);
        if text == "!err" {
            Token::error(text, span, 1, column, BadWord)
        } else {
            Token::new(text, span, 1, column)
        }
    }
}
