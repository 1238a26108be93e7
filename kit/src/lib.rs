#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! A PEG combinator engine where grammars are plain data.
//!
//! Productions are built from [`Node`] values, registered with a
//! [`GrammarBuilder`] and frozen into a [`Grammar`]. Parsing pulls tokens
//! lazily from any [`TokenSource`] through a rewindable [`Cursor`] and
//! yields either a [`Tree`] or a single [`Failure`] describing the
//! furthest, most specific error.
//!
//! ```ignore
//! use tinypeg::{GrammarBuilder, Node, seq};
//!
//! let grammar = GrammarBuilder::new()
//!     .rule("assign", seq![Node::rule("name"), Node::token("="), Node::rule("value")])
//!     .rule("name", Node::predicate("name", is_name))
//!     .rule("value", Node::predicate("number", is_number))
//!     .start("assign")
//!     .build()?;
//! let tree = grammar.parse(lexer)?;
//! println!("{tree}");
//! ```

pub use tinypeg_core::*;
