use super::language::Language;
use crate::token::Token;

/// The upstream token producer pulled by a [`Cursor`](crate::Cursor).
///
/// The cursor calls [`next_token`](TokenSource::next_token) exactly once per
/// newly required token and never again after a token with
/// [`TokenStatus::Eof`](crate::TokenStatus::Eof) has been returned.
/// Lexical failures are reported as tokens carrying
/// [`TokenStatus::Error`](crate::TokenStatus::Error), never by panicking.
///
/// Cancellation is implemented at this boundary as well: a producer that
/// wants to stop a parse returns an error token.
///
/// Any `FnMut() -> Token` closure is a token source.
pub trait TokenSource<'s, L: Language> {
    /// Produces the next token of the input.
    fn next_token(&mut self) -> Token<'s, L>;
}

impl<'s, L, F> TokenSource<'s, L> for F
where
    L: Language,
    F: FnMut() -> Token<'s, L>,
{
    #[inline]
    fn next_token(&mut self) -> Token<'s, L> {
        self()
    }
}
