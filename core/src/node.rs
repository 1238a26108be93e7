//! Grammar nodes.
//!
//! A grammar is plain data: a tree of [`Node`] values, one per production,
//! tied together by name through [`Node::rule`]. Nodes are immutable once
//! built and are interpreted by the engine.
//!
//! # Example
//!
//! ```ignore
//! use tinypeg_core::{Node, choice, seq};
//!
//! // list -> '(' word* ')'
//! let list = seq![
//!     Node::eliminate(Node::token("(")),
//!     Node::kleene(choice![Node::rule("word"), Node::rule("list")]),
//!     Node::eliminate(Node::token(")")),
//! ]
//! .kind(Kind::List);
//! ```

use core::fmt;

use crate::traits::Language;

/// A token test with a human readable label.
#[derive(Clone, Copy)]
pub struct Predicate {
    pub label: &'static str,
    pub test: fn(&str) -> bool,
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.label).finish()
    }
}

/// The operation a [`Node`] performs.
#[derive(Clone, Debug)]
pub enum Op<L: Language> {
    /// A token with exactly this text.
    Token(&'static str),
    /// A token with this text, ignoring ASCII case.
    TokenIgnoreCase(&'static str),
    /// A token accepted by a predicate.
    Predicate(Predicate),
    /// End of input.
    Eof,
    Sequence(Vec<Node<L>>),
    /// Ordered choice.
    Choice(Vec<Node<L>>),
    /// Zero or more.
    Kleene(Box<Node<L>>),
    /// Zero or more `item`s followed by a `terminator` that is not consumed.
    KleeneUntil {
        terminator: Box<Node<L>>,
        item: Box<Node<L>>,
    },
    Optional(Box<Node<L>>),
    /// `item`s separated by `separator`; separators are dropped. Zero items
    /// match unless `non_empty` is set.
    Separated {
        separator: Box<Node<L>>,
        item: Box<Node<L>>,
        non_empty: bool,
    },
    /// One or more `operand`s joined by `operator`; operators are kept.
    Chain {
        operator: Box<Node<L>>,
        operand: Box<Node<L>>,
    },
    /// A reference to a named production.
    Rule(&'static str),
    /// Match, but build nothing.
    Eliminate(Box<Node<L>>),
    /// Match, retagging the result with the node's kind.
    WithKind(Box<Node<L>>),
    /// Give a generic, recoverable failure a grammar code.
    ForceError(L::Code, Box<Node<L>>),
    /// Give a generic failure a grammar code and make every failure fatal.
    Fatal(L::Code, Box<Node<L>>),
}

/// A grammar node: an operation plus an optional AST tag.
#[derive(Clone, Debug)]
pub struct Node<L: Language> {
    pub(crate) kind: Option<L::Kind>,
    pub(crate) op: Op<L>,
}

impl<L: Language> Node<L> {
    #[inline]
    fn new(op: Op<L>) -> Self {
        Self { kind: None, op }
    }

    /// Tags the AST this node builds.
    #[inline]
    pub fn kind(mut self, kind: L::Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The tag set with [`Node::kind`], if any.
    #[inline]
    pub fn tag(&self) -> Option<L::Kind> {
        self.kind
    }

    #[inline]
    pub fn op(&self) -> &Op<L> {
        &self.op
    }

    pub fn token(literal: &'static str) -> Self {
        Self::new(Op::Token(literal))
    }

    pub fn token_ignore_case(literal: &'static str) -> Self {
        Self::new(Op::TokenIgnoreCase(literal))
    }

    pub fn predicate(label: &'static str, test: fn(&str) -> bool) -> Self {
        Self::new(Op::Predicate(Predicate { label, test }))
    }

    pub fn eof() -> Self {
        Self::new(Op::Eof)
    }

    pub fn sequence(nodes: impl IntoIterator<Item = Node<L>>) -> Self {
        Self::new(Op::Sequence(nodes.into_iter().collect()))
    }

    pub fn choice(nodes: impl IntoIterator<Item = Node<L>>) -> Self {
        Self::new(Op::Choice(nodes.into_iter().collect()))
    }

    pub fn kleene(item: Node<L>) -> Self {
        Self::new(Op::Kleene(Box::new(item)))
    }

    pub fn kleene_until(terminator: Node<L>, item: Node<L>) -> Self {
        Self::new(Op::KleeneUntil {
            terminator: Box::new(terminator),
            item: Box::new(item),
        })
    }

    pub fn optional(item: Node<L>) -> Self {
        Self::new(Op::Optional(Box::new(item)))
    }

    pub fn separated(separator: Node<L>, item: Node<L>) -> Self {
        Self::new(Op::Separated {
            separator: Box::new(separator),
            item: Box::new(item),
            non_empty: false,
        })
    }

    /// Like [`Node::separated`], but the first `item` is required.
    pub fn separated1(separator: Node<L>, item: Node<L>) -> Self {
        Self::new(Op::Separated {
            separator: Box::new(separator),
            item: Box::new(item),
            non_empty: true,
        })
    }

    pub fn chain(operator: Node<L>, operand: Node<L>) -> Self {
        Self::new(Op::Chain {
            operator: Box::new(operator),
            operand: Box::new(operand),
        })
    }

    pub fn rule(name: &'static str) -> Self {
        Self::new(Op::Rule(name))
    }

    pub fn eliminate(item: Node<L>) -> Self {
        Self::new(Op::Eliminate(Box::new(item)))
    }

    pub fn with_kind(kind: L::Kind, item: Node<L>) -> Self {
        Self::new(Op::WithKind(Box::new(item))).kind(kind)
    }

    pub fn force_error(code: L::Code, item: Node<L>) -> Self {
        Self::new(Op::ForceError(code, Box::new(item)))
    }

    pub fn fatal(code: L::Code, item: Node<L>) -> Self {
        Self::new(Op::Fatal(code, Box::new(item)))
    }

    /// Label used in failures produced directly by this node.
    pub(crate) fn label(&self) -> Option<&'static str> {
        match &self.op {
            Op::Token(literal) | Op::TokenIgnoreCase(literal) => Some(*literal),
            Op::Predicate(predicate) => Some(predicate.label),
            Op::Eof => Some("end of input"),
            _ => None,
        }
    }

    /// Calls `f` with the name of every rule this node references.
    pub fn for_each_rule(&self, f: &mut impl FnMut(&'static str)) {
        match &self.op {
            Op::Rule(name) => f(name),
            Op::Token(_) | Op::TokenIgnoreCase(_) | Op::Predicate(_) | Op::Eof => {}
            Op::Sequence(nodes) | Op::Choice(nodes) => {
                for node in nodes {
                    node.for_each_rule(f);
                }
            }
            Op::KleeneUntil {
                terminator: first,
                item: second,
            }
            | Op::Separated {
                separator: first,
                item: second,
                ..
            }
            | Op::Chain {
                operator: first,
                operand: second,
            } => {
                first.for_each_rule(f);
                second.for_each_rule(f);
            }
            Op::Kleene(item)
            | Op::Optional(item)
            | Op::Eliminate(item)
            | Op::WithKind(item)
            | Op::ForceError(_, item)
            | Op::Fatal(_, item) => item.for_each_rule(f),
        }
    }
}

/// Builds a [`Node::sequence`] from a list of nodes.
#[macro_export]
macro_rules! seq {
    ($($node:expr),* $(,)?) => {
        $crate::Node::sequence(::std::vec![$($node),*])
    };
}

/// Builds a [`Node::choice`] from a list of alternatives.
#[macro_export]
macro_rules! choice {
    ($($node:expr),* $(,)?) => {
        $crate::Node::choice(::std::vec![$($node),*])
    };
}
