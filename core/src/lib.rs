pub mod ast;
pub mod config;
mod cursor;
mod engine;
mod error;
mod grammar;
mod node;
mod token;
pub mod traits;

#[cfg(test)]
mod test_lang;

pub use ast::{Ast, NodeId, NodeRef, Tree};
pub use config::{ParseConfig, RecursionGuard};
pub use cursor::{Checkpoint, Cursor};
pub use engine::ParseResult;
pub use error::{Error, ErrorKind, Failure, Mismatch};
pub use grammar::{Grammar, GrammarBuilder, RuleId};
pub use node::{Node, Op, Predicate};
pub use token::{Span, Token, TokenStatus};
pub use traits::{Language, TokenSource};
