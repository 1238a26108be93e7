#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Front end for Tiny, a minimal imperative language.
//!
//! Tiny has typed variable declarations, functions, `BEGIN`/`END` blocks,
//! `if`/`return` statements, calls and arithmetic, comparison and
//! assignment expressions:
//!
//! ```text
//! int total, i;
//! real main scale(real x) BEGIN
//!     if (x == 0) return 1;
//!     return x * 2.5;
//! END
//! ```
//!
//! Source text is split by [`TinyLexer`] and parsed by a tinypeg grammar
//! built once per process.

use core::fmt;

use once_cell::sync::OnceCell;
use tinypeg::{Grammar, Language};

pub mod diagnostic;
mod grammar;
pub mod lexer;
pub mod predicates;

pub use diagnostic::SyntaxDiagnostic;
pub use lexer::{LexError, Lexeme, TinyLexer, TokenClass};

/// The Tiny language marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiny;

impl Language for Tiny {
    type Kind = Kind;
    type Code = Code;
    type LexError = LexError;
}

/// Syntax tree node tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Root,
    Func,
    Main,
    Decl,
    Names,
    Type,
    Identifier,
    FormalParams,
    FormalParam,
    Block,
    If,
    Else,
    Return,
    Keyword,
    Call,
    ActualParams,
    Binary,
    Assign,
    Operator,
    Number,
    String,
    Char,
}

/// Grammar-specific failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    ExpectSemicolon,
    ExpectLeftParen,
    ExpectRightParen,
    ExpectBegin,
    ExpectEnd,
    ExpectIdentifier,
    ExpectStatement,
    ExpectExpression,
    ExpectType,
    ExpectComma,
    MayFuncCall,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Code::ExpectSemicolon => "expected ';'",
            Code::ExpectLeftParen => "expected '('",
            Code::ExpectRightParen => "expected ')'",
            Code::ExpectBegin => "expected 'BEGIN'",
            Code::ExpectEnd => "expected 'END'",
            Code::ExpectIdentifier => "expected an identifier",
            Code::ExpectStatement => "expected a statement",
            Code::ExpectExpression => "expected an expression",
            Code::ExpectType => "expected a type",
            Code::ExpectComma => "expected ','",
            Code::MayFuncCall => "unexpected token, maybe you want a function call?",
        })
    }
}

pub type Tree<'s> = tinypeg::Tree<'s, Tiny>;
pub type Failure<'s> = tinypeg::Failure<'s, Tiny>;

/// Errors returned by [`parse`].
#[derive(Debug, thiserror::Error)]
pub enum Error<'s> {
    #[error("invalid grammar: {0}")]
    Grammar(#[from] tinypeg::Error),

    #[error("{0}")]
    Syntax(Failure<'s>),
}

impl<'s> From<Failure<'s>> for Error<'s> {
    fn from(failure: Failure<'s>) -> Self {
        Error::Syntax(failure)
    }
}

impl<'s> Error<'s> {
    /// The parse failure, if the input was at fault.
    pub fn failure(&self) -> Option<&Failure<'s>> {
        match self {
            Error::Syntax(failure) => Some(failure),
            Error::Grammar(_) => None,
        }
    }
}

static GRAMMAR: OnceCell<Grammar<Tiny>> = OnceCell::new();

/// The Tiny grammar, built on first use.
pub fn grammar() -> Result<&'static Grammar<Tiny>, tinypeg::Error> {
    GRAMMAR.get_or_try_init(grammar::build)
}

/// Parses a whole Tiny program.
pub fn parse(source: &str) -> Result<Tree<'_>, Error<'_>> {
    let grammar = grammar()?;
    Ok(grammar.parse(TinyLexer::new(source))?)
}
