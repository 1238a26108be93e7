use crate::traits::Language;

/// A byte range into the source text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of this span.
    ///
    /// # Clamping Behavior
    ///
    /// Uses saturating subtraction, so an inverted span (`end < start`) has
    /// length `0` instead of wrapping.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join two spans into one covering both regions.
    ///
    /// The result runs from the earliest start to the latest end, whether or
    /// not the inputs overlap.
    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<core::ops::Range<usize>> for Span {
    #[inline]
    fn from(range: core::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// What the producer had to say about a token.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenStatus<E> {
    /// A well-formed token.
    Ok,
    /// The end-of-input sentinel.
    Eof,
    /// A lexical error; the token's position points at the offending text.
    Error(E),
}

/// A single token pulled from a [`TokenSource`](crate::TokenSource).
///
/// Tokens are immutable and borrow their text from the source. Line and
/// column are 1-based and describe the first character of the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s, L: Language> {
    pub text: &'s str,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub status: TokenStatus<L::LexError>,
}

impl<'s, L: Language> Token<'s, L> {
    /// Creates a well-formed token.
    #[inline]
    pub fn new(text: &'s str, span: Span, line: u32, column: u32) -> Self {
        Self {
            text,
            span,
            line,
            column,
            status: TokenStatus::Ok,
        }
    }

    /// Creates the end-of-input sentinel at `offset`.
    #[inline]
    pub fn eof(offset: usize, line: u32, column: u32) -> Self {
        Self {
            text: "",
            span: Span::new(offset, offset),
            line,
            column,
            status: TokenStatus::Eof,
        }
    }

    /// Creates a token reporting a lexical error.
    #[inline]
    pub fn error(text: &'s str, span: Span, line: u32, column: u32, error: L::LexError) -> Self {
        Self {
            text,
            span,
            line,
            column,
            status: TokenStatus::Error(error),
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.status, TokenStatus::Eof)
    }

    /// The lexical error carried by this token, if any.
    #[inline]
    pub fn lex_error(&self) -> Option<L::LexError> {
        match self.status {
            TokenStatus::Error(error) => Some(error),
            _ => None,
        }
    }
}
