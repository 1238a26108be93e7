use core::fmt;
use core::hash::Hash;

/// The set of types a grammar is parameterised over.
///
/// A language is usually a zero-sized marker type. It names the tag that is
/// stamped onto AST nodes, the diagnostic codes a grammar installs through
/// [`Node::force_error`](crate::Node::force_error) and
/// [`Node::fatal`](crate::Node::fatal), and the lexical error codes the
/// token producer reports.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub struct Calc;
///
/// impl Language for Calc {
///     type Kind = CalcKind;
///     type Code = CalcCode;
///     type LexError = CalcLexError;
/// }
/// ```
pub trait Language: fmt::Debug + Copy + Eq + Send + Sync + 'static {
    /// Tag stamped onto AST nodes.
    type Kind: fmt::Debug + Copy + Eq + Hash + Send + Sync;

    /// Grammar-specific failure codes, e.g. "expected semicolon".
    type Code: fmt::Debug + fmt::Display + Copy + Eq + Send + Sync;

    /// Lexical error codes forwarded verbatim from the token producer.
    type LexError: fmt::Debug + fmt::Display + Copy + Eq + Send + Sync;
}
