//! Seams between the engine and the code that uses it.
//!
//! ```text
//! Language (Kind, Code, LexError)
//!     └── TokenSource<'s, L> (upstream producer)
//!             └── Cursor<'s, L> (rewindable buffer)
//! ```
//!
//! A grammar is written against a [`Language`]; the engine pulls tokens of
//! that language through a [`TokenSource`] wrapped in a
//! [`Cursor`](crate::Cursor).

mod language;
mod source;

pub use language::Language;
pub use source::TokenSource;
