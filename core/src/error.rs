//! Error types.
//!
//! [`Error`] is returned while assembling a grammar. Parse failures are
//! reported as [`Failure`] values, which carry the position of the offending
//! token and whether the failure is fatal.

use core::fmt;

use crate::token::Token;
use crate::traits::Language;

/// Errors raised while building a grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two productions were registered under the same name.
    #[error("rule `{name}` is defined more than once")]
    DuplicateRule { name: &'static str },

    /// A `Node::rule` reference names no production.
    #[error("rule `{name}` referenced from `{referenced_from}` is not defined")]
    UndefinedRule {
        name: &'static str,
        referenced_from: &'static str,
    },

    /// `GrammarBuilder::start` was never called.
    #[error("no start rule was set")]
    MissingStart,

    /// The start rule names no production.
    #[error("start rule `{name}` is not defined")]
    UnknownStart { name: &'static str },
}

/// The ways a token can fail to match regardless of grammar.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mismatch {
    /// A real token did not match.
    UnexpectedToken,
    /// Input ended where a token was required.
    UnexpectedEof,
    /// A real token was found where input should have ended.
    ExpectedEof,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::UnexpectedToken => f.write_str("unexpected token"),
            Mismatch::UnexpectedEof => f.write_str("unexpected end of input"),
            Mismatch::ExpectedEof => f.write_str("expected end of input"),
        }
    }
}

/// What went wrong during a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind<L: Language> {
    /// A plain mismatch, not yet given meaning by the grammar.
    Generic(Mismatch),
    /// A grammar-specific code installed by `ForceError` or `Fatal`.
    Specific(L::Code),
    /// The token producer reported a lexical error.
    Lexical(L::LexError),
    /// Rule nesting exceeded [`ParseConfig::max_recursion_depth`](crate::ParseConfig).
    RecursionLimit { depth: usize, limit: usize },
}

impl<L: Language> ErrorKind<L> {
    #[inline]
    pub fn is_generic(&self) -> bool {
        matches!(self, ErrorKind::Generic(_))
    }

    /// The grammar code, if one was installed.
    #[inline]
    pub fn code(&self) -> Option<L::Code> {
        match self {
            ErrorKind::Specific(code) => Some(*code),
            _ => None,
        }
    }
}

impl<L: Language> fmt::Display for ErrorKind<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Generic(mismatch) => mismatch.fmt(f),
            ErrorKind::Specific(code) => code.fmt(f),
            ErrorKind::Lexical(error) => error.fmt(f),
            ErrorKind::RecursionLimit { depth, limit } => {
                write!(f, "recursion limit exceeded: depth {depth} > limit {limit}")
            }
        }
    }
}

/// A failed parse.
///
/// `token` is where the failure was detected. A fatal failure stops every
/// enclosing alternative and repetition on its way up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure<'s, L: Language> {
    pub kind: ErrorKind<L>,
    pub fatal: bool,
    pub token: Token<'s, L>,
    /// Label of the terminal that was being matched, when there was one.
    pub expected: Option<&'static str>,
}

impl<'s, L: Language> Failure<'s, L> {
    #[inline]
    pub(crate) fn new(kind: ErrorKind<L>, token: Token<'s, L>) -> Self {
        Self {
            kind,
            fatal: false,
            token,
            expected: None,
        }
    }

    #[inline]
    pub(crate) fn fatal(kind: ErrorKind<L>, token: Token<'s, L>) -> Self {
        Self {
            fatal: true,
            ..Self::new(kind, token)
        }
    }

    #[inline]
    pub(crate) fn expecting(mut self, label: &'static str) -> Self {
        self.expected = Some(label);
        self
    }

    /// The grammar code, if one was installed.
    #[inline]
    pub fn code(&self) -> Option<L::Code> {
        self.kind.code()
    }
}

impl<L: Language> fmt::Display for Failure<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.kind, self.token.line, self.token.column)
    }
}

impl<L: Language> std::error::Error for Failure<'_, L> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_lang::{BadWord, Code, Test};
    use crate::token::Span;

    fn at(column: u32) -> Token<'static, Test> {
        Token::new("x", Span::new(0, 1), 3, column)
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::<Test>::new(ErrorKind::Generic(Mismatch::UnexpectedToken), at(7));
        assert_eq!(failure.to_string(), "unexpected token at 3:7");

        let failure = Failure::<Test>::fatal(ErrorKind::Specific(Code::ExpectClose), at(2));
        assert_eq!(failure.to_string(), "expected ')' at 3:2");
        assert!(failure.fatal);

        let failure = Failure::<Test>::fatal(ErrorKind::Lexical(BadWord), at(1));
        assert_eq!(failure.to_string(), "bad word at 3:1");
    }

    #[test]
    fn test_code_only_for_specific() {
        assert_eq!(
            ErrorKind::<Test>::Specific(Code::ExpectWord).code(),
            Some(Code::ExpectWord)
        );
        assert_eq!(
            ErrorKind::<Test>::Generic(Mismatch::UnexpectedEof).code(),
            None
        );
        assert!(ErrorKind::<Test>::Generic(Mismatch::ExpectedEof).is_generic());
    }

    #[test]
    fn test_build_error_messages() {
        let err = Error::UndefinedRule {
            name: "expr",
            referenced_from: "stmt",
        };
        assert_eq!(
            err.to_string(),
            "rule `expr` referenced from `stmt` is not defined"
        );
        assert_eq!(Error::MissingStart.to_string(), "no start rule was set");
    }
}
