//! The combinator engine.
//!
//! [`run`] evaluates a production against a [`Cursor`] and an [`Ast`] arena.
//! Every node variant is handled by one arm of [`Engine::eval`]; a step
//! either yields an optional AST node or a [`Failure`].
//!
//! Backtracking restores a [`Mark`]: the cursor checkpoint plus the arena
//! length at that point. Parents are always created after their children,
//! so dropping every node built since a mark is a truncation.

use crate::ast::{Ast, NodeId, Tree};
use crate::config::{ParseConfig, RecursionGuard};
use crate::cursor::{Checkpoint, Cursor};
use crate::error::{ErrorKind, Failure, Mismatch};
use crate::grammar::{Grammar, RuleId};
use crate::node::{Node, Op};
use crate::token::Token;
use crate::traits::{Language, TokenSource};

/// Outcome of a whole parse.
pub type ParseResult<'s, L> = Result<Tree<'s, L>, Failure<'s, L>>;

/// Outcome of evaluating one node. `Ok(None)` matched without building.
/// The failure is boxed so every recursive frame carries only a pointer.
type Step<'s, L> = Result<Option<NodeId>, Box<Failure<'s, L>>>;

#[derive(Debug, Clone, Copy)]
struct Mark {
    checkpoint: Checkpoint,
    len: usize,
}

struct Engine<'g, 's, L: Language> {
    grammar: &'g Grammar<L>,
    cursor: Cursor<'s, L>,
    ast: Ast<'s, L>,
    guard: RecursionGuard,
    limit: usize,
}

/// Parses `source` from `rule`.
pub(crate) fn run<'s, L: Language>(
    grammar: &Grammar<L>,
    rule: RuleId,
    config: ParseConfig,
    source: impl TokenSource<'s, L> + 's,
) -> ParseResult<'s, L> {
    let mut engine = Engine {
        grammar,
        cursor: Cursor::with_capacity(source, config.token_capacity),
        ast: Ast::with_capacity(config.token_capacity),
        guard: RecursionGuard::new(),
        limit: config.max_recursion_depth,
    };
    let result = engine.rule(rule);
    match &result {
        Ok(_) => log::debug!(
            "parse of `{}` succeeded after {} tokens, {} nodes",
            grammar.rule_name(rule),
            engine.cursor.position(),
            engine.ast.len()
        ),
        Err(failure) => log::debug!(
            "parse of `{}` failed: {failure}",
            grammar.rule_name(rule)
        ),
    }
    result
        .map(|root| Tree::new(engine.ast, root))
        .map_err(|failure| *failure)
}

impl<'g, 's, L: Language> Engine<'g, 's, L> {
    #[inline]
    fn mark(&self) -> Mark {
        Mark {
            checkpoint: self.cursor.checkpoint(),
            len: self.ast.len(),
        }
    }

    #[inline]
    fn rewind(&mut self, mark: Mark) {
        self.cursor.reset(mark.checkpoint);
        self.ast.truncate(mark.len);
    }

    #[inline]
    fn advanced_since(&self, mark: Mark) -> bool {
        self.cursor.position() != mark.checkpoint.index()
    }

    /// Creates a node tagged `kind` owning `children`.
    fn wrap(&mut self, kind: Option<L::Kind>, children: Vec<NodeId>) -> NodeId {
        self.ast.node(kind, children)
    }

    /// Overwrites the kind of a passed-through result if `node` has one.
    fn retag(&mut self, node: &Node<L>, id: Option<NodeId>) -> Option<NodeId> {
        if let (Some(kind), Some(id)) = (node.kind, id) {
            self.ast.set_kind(id, kind);
        }
        id
    }

    fn eval(&mut self, node: &'g Node<L>) -> Step<'s, L> {
        match &node.op {
            Op::Token(literal) => self.terminal(node, |text| text == *literal),
            Op::TokenIgnoreCase(literal) => {
                self.terminal(node, |text| text.eq_ignore_ascii_case(literal))
            }
            Op::Predicate(predicate) => self.terminal(node, predicate.test),
            Op::Eof => self.eof(node),
            Op::Sequence(items) => self.sequence(node, items),
            Op::Choice(alternatives) => self.choice(node, alternatives),
            Op::Kleene(item) => self.kleene(node, item),
            Op::KleeneUntil { terminator, item } => self.kleene_until(node, terminator, item),
            Op::Optional(item) => self.optional(node, item),
            Op::Separated {
                separator,
                item,
                non_empty,
            } => self.separated(node, separator, item, *non_empty),
            Op::Chain { operator, operand } => self.chain(node, operator, operand),
            Op::Rule(name) => self.reference(node, name),
            Op::Eliminate(item) => self.eliminate(item),
            Op::WithKind(item) => {
                let result = self.eval(item)?;
                Ok(self.retag(node, result))
            }
            Op::ForceError(code, item) => self.relabel(node, *code, item, false),
            Op::Fatal(code, item) => self.relabel(node, *code, item, true),
        }
    }

    fn reference(&mut self, node: &Node<L>, name: &str) -> Step<'s, L> {
        let Some(id) = self.grammar.rule(name) else {
            unreachable!("rule `{name}` was checked when the grammar was built");
        };
        let result = self.rule(id)?;
        Ok(self.retag(node, result))
    }

    fn eliminate(&mut self, item: &'g Node<L>) -> Step<'s, L> {
        let len = self.ast.len();
        self.eval(item)?;
        self.ast.truncate(len);
        Ok(None)
    }

    /// Installs `code` on a generic failure of `item`. `fatal` also marks
    /// every failure as fatal; otherwise fatal failures keep their kind.
    fn relabel(
        &mut self,
        node: &Node<L>,
        code: L::Code,
        item: &'g Node<L>,
        fatal: bool,
    ) -> Step<'s, L> {
        match self.eval(item) {
            Ok(result) => Ok(self.retag(node, result)),
            Err(mut failure) => {
                if failure.kind.is_generic() && (fatal || !failure.fatal) {
                    failure.kind = ErrorKind::Specific(code);
                }
                failure.fatal |= fatal;
                Err(failure)
            }
        }
    }

    fn rule(&mut self, id: RuleId) -> Step<'s, L> {
        let name = self.grammar.rule_name(id);
        if !self.guard.enter(self.limit) {
            let depth = self.guard.depth();
            self.guard.exit();
            log::debug!("recursion limit {} hit entering `{name}`", self.limit);
            return Err(Box::new(Failure::fatal(
                ErrorKind::RecursionLimit {
                    depth,
                    limit: self.limit,
                },
                self.cursor.peek(),
            )));
        }

        log::trace!("enter `{name}` at token {}", self.cursor.position());
        let production = self.grammar.node(id);
        let result = self.eval(production);
        log::trace!(
            "exit `{name}` at token {}: {}",
            self.cursor.position(),
            if result.is_ok() { "matched" } else { "failed" }
        );
        self.guard.exit();
        result
    }

    /// Consumes one token and checks it with `accept`.
    ///
    /// A failing token stays consumed; the enclosing combinator decides
    /// whether to rewind.
    fn terminal(&mut self, node: &Node<L>, accept: impl Fn(&str) -> bool) -> Step<'s, L> {
        let token = self.cursor.advance();
        if let Some(failure) = self.unusable(node, token) {
            return Err(failure);
        }
        if accept(token.text) {
            Ok(Some(self.ast.leaf(node.kind, token)))
        } else {
            Err(self.mismatch(node, Mismatch::UnexpectedToken, token))
        }
    }

    fn eof(&mut self, node: &Node<L>) -> Step<'s, L> {
        let token = self.cursor.advance();
        if let Some(error) = token.lex_error() {
            return Err(self.lexical(node, error, token));
        }
        if token.is_eof() {
            Ok(None)
        } else {
            Err(self.mismatch(node, Mismatch::ExpectedEof, token))
        }
    }

    /// Failure for a token no terminal can match: end of input or a
    /// lexical error.
    fn unusable(&self, node: &Node<L>, token: Token<'s, L>) -> Option<Box<Failure<'s, L>>> {
        if let Some(error) = token.lex_error() {
            Some(self.lexical(node, error, token))
        } else if token.is_eof() {
            Some(self.mismatch(node, Mismatch::UnexpectedEof, token))
        } else {
            None
        }
    }

    fn lexical(
        &self,
        node: &Node<L>,
        error: L::LexError,
        token: Token<'s, L>,
    ) -> Box<Failure<'s, L>> {
        Box::new(with_label(Failure::fatal(ErrorKind::Lexical(error), token), node))
    }

    fn mismatch(
        &self,
        node: &Node<L>,
        mismatch: Mismatch,
        token: Token<'s, L>,
    ) -> Box<Failure<'s, L>> {
        Box::new(with_label(Failure::new(ErrorKind::Generic(mismatch), token), node))
    }

    fn sequence(&mut self, node: &Node<L>, items: &'g [Node<L>]) -> Step<'s, L> {
        let len = self.ast.len();
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            match self.eval(item) {
                Ok(Some(id)) => children.push(id),
                Ok(None) => {}
                Err(failure) => {
                    self.ast.truncate(len);
                    return Err(failure);
                }
            }
        }
        if let [only] = children[..] {
            return Ok(self.retag(node, Some(only)));
        }
        Ok(Some(self.wrap(node.kind, children)))
    }

    fn choice(&mut self, node: &Node<L>, alternatives: &'g [Node<L>]) -> Step<'s, L> {
        let start = self.mark();
        let mut best: Option<(usize, Box<Failure<'s, L>>)> = None;
        for alternative in alternatives {
            match self.eval(alternative) {
                Ok(result) => return Ok(self.retag(node, result)),
                Err(failure) if failure.fatal => return Err(failure),
                Err(failure) => {
                    let distance = self
                        .cursor
                        .distance(start.checkpoint, self.cursor.checkpoint());
                    if best.as_ref().is_none_or(|(most, _)| distance > *most) {
                        best = Some((distance, failure));
                    }
                    self.rewind(start);
                }
            }
        }
        match best {
            Some((distance, failure)) => {
                log::debug!(
                    "no alternative matched at token {}, furthest reached {distance}: {failure}",
                    start.checkpoint.index()
                );
                Err(failure)
            }
            None => Err(Box::new(Failure::new(
                ErrorKind::Generic(Mismatch::UnexpectedToken),
                self.cursor.peek(),
            ))),
        }
    }

    fn kleene(&mut self, node: &Node<L>, item: &'g Node<L>) -> Step<'s, L> {
        let mut children = Vec::new();
        loop {
            let mark = self.mark();
            match self.eval(item) {
                Ok(result) => {
                    children.extend(result);
                    if !self.advanced_since(mark) {
                        break;
                    }
                }
                Err(failure) if failure.fatal => return Err(failure),
                Err(_) => {
                    self.rewind(mark);
                    break;
                }
            }
        }
        Ok(Some(self.wrap(node.kind, children)))
    }

    fn kleene_until(
        &mut self,
        node: &Node<L>,
        terminator: &'g Node<L>,
        item: &'g Node<L>,
    ) -> Step<'s, L> {
        let mut children = Vec::new();
        let mut iterations = 0usize;
        let stopped = loop {
            let mark = self.mark();
            match self.eval(item) {
                Ok(result) => {
                    children.extend(result);
                    iterations += 1;
                    if !self.advanced_since(mark) {
                        break None;
                    }
                }
                Err(failure) if failure.fatal => return Err(failure),
                Err(failure) => {
                    self.rewind(mark);
                    break Some(failure);
                }
            }
        };

        let lookahead = self.mark();
        match self.eval(terminator) {
            Ok(_) => {
                self.rewind(lookahead);
                Ok(Some(self.wrap(node.kind, children)))
            }
            Err(failure) if failure.fatal => Err(failure),
            Err(failure) => match stopped {
                // With nothing matched yet, report whichever of the two
                // got further into the input.
                Some(stopped)
                    if iterations == 0
                        && failure.token.span.start > stopped.token.span.start =>
                {
                    Err(failure)
                }
                Some(stopped) => Err(stopped),
                None => Err(failure),
            },
        }
    }

    fn optional(&mut self, node: &Node<L>, item: &'g Node<L>) -> Step<'s, L> {
        let mark = self.mark();
        let children = match self.eval(item) {
            Ok(result) => result.into_iter().collect(),
            Err(failure) if failure.fatal => return Err(failure),
            Err(_) => {
                self.rewind(mark);
                Vec::new()
            }
        };
        Ok(Some(self.wrap(node.kind, children)))
    }

    fn separated(
        &mut self,
        node: &Node<L>,
        separator: &'g Node<L>,
        item: &'g Node<L>,
        non_empty: bool,
    ) -> Step<'s, L> {
        let start = self.mark();
        let mut children = Vec::new();
        match self.eval(item) {
            Ok(result) => children.extend(result),
            Err(failure) if failure.fatal || non_empty => return Err(failure),
            Err(_) => {
                self.rewind(start);
                return Ok(Some(self.wrap(node.kind, children)));
            }
        }

        loop {
            let mark = self.mark();
            match self.eval(separator) {
                Ok(_) => {}
                Err(failure) if failure.fatal => return Err(failure),
                Err(_) => {
                    self.rewind(mark);
                    break;
                }
            }
            // Separators are matched but never kept.
            self.ast.truncate(mark.len);
            match self.eval(item) {
                Ok(result) => children.extend(result),
                Err(failure) => {
                    self.ast.truncate(start.len);
                    return Err(failure);
                }
            }
            if !self.advanced_since(mark) {
                break;
            }
        }
        Ok(Some(self.wrap(node.kind, children)))
    }

    fn chain(&mut self, node: &Node<L>, operator: &'g Node<L>, operand: &'g Node<L>) -> Step<'s, L> {
        let len = self.ast.len();
        let first = self.eval(operand)?;
        let mut children: Vec<NodeId> = first.into_iter().collect();
        let mut operands = 1usize;

        loop {
            let mark = self.mark();
            let op = match self.eval(operator) {
                Ok(op) => op,
                Err(failure) if failure.fatal => return Err(failure),
                Err(_) => {
                    self.rewind(mark);
                    break;
                }
            };
            match self.eval(operand) {
                Ok(result) => {
                    children.extend(op);
                    children.extend(result);
                    operands += 1;
                }
                Err(failure) => {
                    self.ast.truncate(len);
                    return Err(failure);
                }
            }
            if !self.advanced_since(mark) {
                break;
            }
        }

        if operands == 1 {
            return Ok(first);
        }
        Ok(Some(self.wrap(node.kind, children)))
    }
}

#[inline]
fn with_label<'s, L: Language>(failure: Failure<'s, L>, node: &Node<L>) -> Failure<'s, L> {
    match node.label() {
        Some(label) => failure.expecting(label),
        None => failure,
    }
}
