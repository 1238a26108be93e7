//! Tokenizer for Tiny source text.
//!
//! A `logos` DFA splits the input into raw lexemes. [`TinyLexer`] drops
//! whitespace and comments, checks string escapes, tracks line and column
//! numbers and hands the result to the parser as [`Token`]s.

use core::fmt;

use logos::Logos;
use tinypeg::{Span, Token, TokenSource};

use crate::Tiny;

/// Lexical errors. The error token points at the start of the bad lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated character literal")]
    UnterminatedChar,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("invalid number literal")]
    InvalidNumber,

    #[error("\\x used with no following hex digits")]
    BadHexEscape,

    #[error("unexpected character")]
    UnexpectedChar,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", allow_greedy = true)]
    BlockComment,

    #[token("/*")]
    OpenComment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9.]*([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"0[xX][0-9a-fA-F]*")]
    Hex,

    #[regex(r"[0-9][0-9.]*[eE][+-]?")]
    BadExponent,

    #[regex(r"[1-9][xX]")]
    BadRadix,

    #[regex(r#""([^"\\\n]|\\.)*""#, allow_greedy = true)]
    Str,

    #[regex(r#""([^"\\\n]|\\.)*"#, allow_greedy = true)]
    OpenStr,

    #[regex(r"'([^'\\\n]|\\.)*'", allow_greedy = true)]
    Char,

    #[regex(r"'([^'\\\n]|\\.)*", allow_greedy = true)]
    OpenChar,

    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("|=")]
    #[token("&=")]
    #[token("%=")]
    #[token("^=")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("&&")]
    #[token("||")]
    #[token("<<")]
    #[token(">>")]
    #[token(">>=")]
    #[token("<<=")]
    #[token("*/")]
    #[token("...")]
    #[token("--")]
    #[token("++")]
    #[token(":=")]
    Operator,

    #[regex(r"[!#-&(-/:-@\[-^`{-~]")]
    Symbol,
}

/// Coarse classification of a lexeme, used for token dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Identifier,
    Number,
    String,
    Char,
    Operator,
    Symbol,
    End,
    Error,
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenClass::Identifier => "identifier",
            TokenClass::Number => "number",
            TokenClass::String => "string",
            TokenClass::Char => "char",
            TokenClass::Operator => "operator",
            TokenClass::Symbol => "symbol",
            TokenClass::End => "eof",
            TokenClass::Error => "error",
        })
    }
}

/// A token together with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'s> {
    pub class: TokenClass,
    pub token: Token<'s, Tiny>,
}

/// Tiny token producer.
///
/// Yields lexemes through [`Iterator`] (ending after the end-of-input
/// lexeme) and plain tokens through [`TokenSource`].
pub struct TinyLexer<'s> {
    inner: logos::Lexer<'s, Raw>,
    src: &'s str,
    offset: usize,
    line: u32,
    column: u32,
    done: bool,
}

impl<'s> TinyLexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            inner: Raw::lexer(src),
            src,
            offset: 0,
            line: 1,
            column: 1,
            done: false,
        }
    }

    /// Moves the line/column counters forward to byte offset `to`.
    fn seek(&mut self, to: usize) {
        for &byte in &self.src.as_bytes()[self.offset..to] {
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                // UTF-8 continuation bytes share the column of their lead byte.
                0x80..=0xBF => {}
                _ => self.column += 1,
            }
        }
        self.offset = to;
    }

    /// Produces the next significant lexeme.
    ///
    /// After the end of input every call returns another end lexeme.
    pub fn next_lexeme(&mut self) -> Lexeme<'s> {
        let lexeme = loop {
            let Some(raw) = self.inner.next() else {
                self.seek(self.src.len());
                break Lexeme {
                    class: TokenClass::End,
                    token: Token::eof(self.src.len(), self.line, self.column),
                };
            };
            let range = self.inner.span();
            self.seek(range.start);

            let text = self.inner.slice();
            let span = Span::from(range);
            let class = match raw {
                Ok(Raw::Whitespace | Raw::LineComment | Raw::BlockComment) => continue,
                Ok(Raw::Ident) => Ok(TokenClass::Identifier),
                Ok(Raw::Number | Raw::Hex) => Ok(TokenClass::Number),
                Ok(Raw::Str) => check_escapes(text).map(|()| TokenClass::String),
                Ok(Raw::Char) => check_escapes(text).map(|()| TokenClass::Char),
                Ok(Raw::Operator) => Ok(TokenClass::Operator),
                Ok(Raw::Symbol) => Ok(TokenClass::Symbol),
                Ok(Raw::OpenComment) => Err(LexError::UnterminatedComment),
                Ok(Raw::OpenStr) => Err(LexError::UnterminatedString),
                Ok(Raw::OpenChar) => Err(LexError::UnterminatedChar),
                Ok(Raw::BadExponent | Raw::BadRadix) => Err(LexError::InvalidNumber),
                Err(()) => Err(LexError::UnexpectedChar),
            };
            break match class {
                Ok(class) => Lexeme {
                    class,
                    token: Token::new(text, span, self.line, self.column),
                },
                Err(error) => Lexeme {
                    class: TokenClass::Error,
                    token: Token::error(text, span, self.line, self.column, error),
                },
            };
        };

        log::trace!(
            "{}:{} {} {:?}",
            lexeme.token.line,
            lexeme.token.column,
            lexeme.class,
            lexeme.token.text
        );
        lexeme
    }
}

/// Rejects `\x` escapes that are not followed by two hex digits.
fn check_escapes(literal: &str) -> Result<(), LexError> {
    let body = literal.get(1..literal.len().saturating_sub(1)).unwrap_or("");
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        if chars.next() == Some('x') {
            let digits = chars.clone().take(2).filter(char::is_ascii_hexdigit).count();
            if digits < 2 {
                return Err(LexError::BadHexEscape);
            }
            chars.nth(1);
        }
    }
    Ok(())
}

impl<'s> TokenSource<'s, Tiny> for TinyLexer<'s> {
    fn next_token(&mut self) -> Token<'s, Tiny> {
        self.next_lexeme().token
    }
}

impl<'s> Iterator for TinyLexer<'s> {
    type Item = Lexeme<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let lexeme = self.next_lexeme();
        self.done = lexeme.class == TokenClass::End;
        Some(lexeme)
    }
}
