//! A rewindable cursor over a lazily pulled token stream.
//!
//! The cursor buffers every token it pulls so that a checkpoint taken at any
//! earlier point stays valid. Checkpoints are plain indices, which keeps
//! [`Cursor::checkpoint`] and [`Cursor::reset`] O(1).

use crate::token::Token;
use crate::traits::{Language, TokenSource};

/// A position in a [`Cursor`]'s buffer.
///
/// Only meaningful for the cursor that issued it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Absolute token index this checkpoint refers to.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Bidirectionally navigable, append-on-demand token buffer.
///
/// # Example
///
/// ```ignore
/// let mut cursor = Cursor::new(lexer);
/// let start = cursor.checkpoint();
/// let first = cursor.advance();
/// cursor.reset(start);
/// assert_eq!(cursor.advance(), first);
/// ```
pub struct Cursor<'s, L: Language> {
    source: Box<dyn TokenSource<'s, L> + 's>,
    tokens: Vec<Token<'s, L>>,
    pos: usize,
    eof: Option<Token<'s, L>>,
}

impl<'s, L: Language> Cursor<'s, L> {
    /// Creates a cursor pulling from `source`.
    pub fn new(source: impl TokenSource<'s, L> + 's) -> Self {
        Self::with_capacity(source, 0)
    }

    /// Creates a cursor with room for `capacity` buffered tokens.
    pub fn with_capacity(source: impl TokenSource<'s, L> + 's, capacity: usize) -> Self {
        Self {
            source: Box::new(source),
            tokens: Vec::with_capacity(capacity),
            pos: 0,
            eof: None,
        }
    }

    /// Makes sure the token at the current position is buffered.
    fn fill(&mut self) {
        if self.pos < self.tokens.len() {
            return;
        }
        let token = match self.eof {
            // The producer is done; keep handing out the sentinel.
            Some(eof) => eof,
            None => {
                let token = self.source.next_token();
                if token.is_eof() {
                    self.eof = Some(token);
                }
                token
            }
        };
        self.tokens.push(token);
    }

    /// Returns the next token and moves past it.
    pub fn advance(&mut self) -> Token<'s, L> {
        self.fill();
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    /// Returns the next token without moving.
    pub fn peek(&mut self) -> Token<'s, L> {
        self.fill();
        self.tokens[self.pos]
    }

    /// Captures the current position.
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Rewinds (or fast-forwards) to `checkpoint`.
    ///
    /// Buffered tokens are kept; a different branch may need them again.
    #[inline]
    pub fn reset(&mut self, checkpoint: Checkpoint) {
        debug_assert!(
            checkpoint.0 <= self.tokens.len(),
            "checkpoint {} is past the {} buffered tokens",
            checkpoint.0,
            self.tokens.len()
        );
        self.pos = checkpoint.0;
    }

    /// Number of tokens advanced going from `from` to `to`.
    ///
    /// Saturates at `0` when `to` lies before `from`.
    #[inline]
    pub fn distance(&self, from: Checkpoint, to: Checkpoint) -> usize {
        to.0.saturating_sub(from.0)
    }

    /// Absolute index of the next token.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of tokens pulled into the buffer so far.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.tokens.len()
    }
}

impl<L: Language> core::fmt::Debug for Cursor<'_, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("buffered", &self.tokens.len())
            .field("eof", &self.eof.is_some())
            .finish()
    }
}
