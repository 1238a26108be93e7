//! Grammar registry.
//!
//! Productions are collected by a [`GrammarBuilder`] and frozen into a
//! [`Grammar`] once every rule reference has been checked. A frozen grammar
//! is immutable and can drive any number of parses, on any number of
//! threads.

use std::collections::HashMap;

use crate::config::ParseConfig;
use crate::engine::{self, ParseResult};
use crate::node::Node;
use crate::traits::{Language, TokenSource};
use crate::Error;

/// Handle to a production of a [`Grammar`].
///
/// Only meaningful for the grammar that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(usize);

#[derive(Debug, Clone)]
struct Production<L: Language> {
    name: &'static str,
    node: Node<L>,
}

/// Collects productions before they are validated.
///
/// # Example
///
/// ```ignore
/// let grammar = GrammarBuilder::new()
///     .rule("list", seq![open, Node::kleene(Node::rule("item")), close])
///     .rule("item", Node::predicate("word", is_word))
///     .start("list")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct GrammarBuilder<L: Language> {
    rules: Vec<Production<L>>,
    start: Option<&'static str>,
}

impl<L: Language> Default for GrammarBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Language> GrammarBuilder<L> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            start: None,
        }
    }

    /// Registers the production `name -> node`.
    pub fn rule(mut self, name: &'static str, node: Node<L>) -> Self {
        self.rules.push(Production { name, node });
        self
    }

    /// Sets the production [`Grammar::parse`] starts from.
    pub fn start(mut self, name: &'static str) -> Self {
        self.start = Some(name);
        self
    }

    /// Validates the productions and freezes them.
    ///
    /// Fails on duplicate names, on references to undefined rules and on a
    /// missing or undefined start rule.
    pub fn build(self) -> Result<Grammar<L>, Error> {
        let mut index = HashMap::with_capacity(self.rules.len());
        for (i, production) in self.rules.iter().enumerate() {
            if index.insert(production.name, RuleId(i)).is_some() {
                return Err(Error::DuplicateRule {
                    name: production.name,
                });
            }
        }

        for production in &self.rules {
            let mut missing = None;
            production.node.for_each_rule(&mut |name| {
                if missing.is_none() && !index.contains_key(name) {
                    missing = Some(name);
                }
            });
            if let Some(name) = missing {
                return Err(Error::UndefinedRule {
                    name,
                    referenced_from: production.name,
                });
            }
        }

        let name = self.start.ok_or(Error::MissingStart)?;
        let start = *index.get(name).ok_or(Error::UnknownStart { name })?;

        log::debug!(
            "built grammar with {} rules, starting at `{name}`",
            self.rules.len()
        );
        Ok(Grammar {
            rules: self.rules,
            index,
            start,
        })
    }
}

/// A validated, immutable set of productions.
#[derive(Debug, Clone)]
pub struct Grammar<L: Language> {
    rules: Vec<Production<L>>,
    index: HashMap<&'static str, RuleId>,
    start: RuleId,
}

impl<L: Language> Grammar<L> {
    pub fn builder() -> GrammarBuilder<L> {
        GrammarBuilder::new()
    }

    /// Looks up a production by name.
    #[inline]
    pub fn rule(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn start(&self) -> RuleId {
        self.start
    }

    #[inline]
    pub fn rule_name(&self, id: RuleId) -> &'static str {
        self.rules[id.0].name
    }

    /// Number of productions.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[inline]
    pub(crate) fn node(&self, id: RuleId) -> &Node<L> {
        &self.rules[id.0].node
    }

    /// Parses `source` from the start rule with the default configuration.
    pub fn parse<'s>(&self, source: impl TokenSource<'s, L> + 's) -> ParseResult<'s, L> {
        self.parse_with(self.start, ParseConfig::DEFAULT, source)
    }

    /// Parses `source` from `rule`.
    pub fn parse_with<'s>(
        &self,
        rule: RuleId,
        config: ParseConfig,
        source: impl TokenSource<'s, L> + 's,
    ) -> ParseResult<'s, L> {
        engine::run(self, rule, config, source)
    }
}
