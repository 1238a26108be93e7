//! Arena-backed syntax trees.
//!
//! Nodes live in a single vector and refer to each other by [`NodeId`]. The
//! engine always creates a parent after its children, so a child's id is
//! smaller than its parent's and every prefix of the arena is closed under
//! child links. Throwing away everything built after a mark is therefore a
//! plain truncation.

use core::fmt;

use crate::token::{Span, Token};
use crate::traits::Language;

/// Index of a node in an [`Ast`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData<'s, L: Language> {
    kind: Option<L::Kind>,
    token: Option<Token<'s, L>>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// Node storage for one parse.
#[derive(Debug, Clone)]
pub struct Ast<'s, L: Language> {
    nodes: Vec<NodeData<'s, L>>,
}

impl<'s, L: Language> Default for Ast<'s, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, L: Language> Ast<'s, L> {
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, kind: Option<L::Kind>, token: Option<Token<'s, L>>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            token,
            first_child: None,
            last_child: None,
            next_sibling: None,
        });
        id
    }

    /// Creates a childless node holding `token`.
    pub fn leaf(&mut self, kind: Option<L::Kind>, token: Token<'s, L>) -> NodeId {
        self.push(kind, Some(token))
    }

    /// Creates a structural node owning `children`, in order.
    pub fn node(
        &mut self,
        kind: Option<L::Kind>,
        children: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let parent = self.push(kind, None);
        for child in children {
            self.add_child(parent, Some(child));
        }
        parent
    }

    /// Appends `child` to `parent`'s children; does nothing for `None`.
    ///
    /// The child must not already have a parent.
    pub fn add_child(&mut self, parent: NodeId, child: Option<NodeId>) {
        let Some(child) = child else {
            return;
        };
        debug_assert!(child < parent, "children are created before parents");
        debug_assert!(self.nodes[child.0].next_sibling.is_none());
        match self.nodes[parent.0].last_child {
            Some(last) => self.nodes[last.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
    }

    /// Number of direct children of `id`.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.get(id).children().count()
    }

    /// Overwrites the kind tag of `id`.
    #[inline]
    pub fn set_kind(&mut self, id: NodeId, kind: L::Kind) {
        self.nodes[id.0].kind = Some(kind);
    }

    /// Drops every node created after the arena had `len` nodes.
    #[inline]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Read-only view of node `id`.
    #[inline]
    pub fn get(&self, id: NodeId) -> NodeRef<'_, 's, L> {
        NodeRef { ast: self, id }
    }
}

/// A borrowed view of one node.
pub struct NodeRef<'a, 's, L: Language> {
    ast: &'a Ast<'s, L>,
    id: NodeId,
}

impl<L: Language> Clone for NodeRef<'_, '_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: Language> Copy for NodeRef<'_, '_, L> {}

impl<'a, 's, L: Language> NodeRef<'a, 's, L> {
    #[inline]
    fn data(&self) -> &'a NodeData<'s, L> {
        &self.ast.nodes[self.id.0]
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's tag; `None` for anonymous wrappers.
    #[inline]
    pub fn kind(&self) -> Option<L::Kind> {
        self.data().kind
    }

    /// The token this node directly represents, if any.
    #[inline]
    pub fn token(&self) -> Option<Token<'s, L>> {
        self.data().token
    }

    #[inline]
    pub fn text(&self) -> Option<&'s str> {
        self.data().token.map(|token| token.text)
    }

    pub fn children(&self) -> Children<'a, 's, L> {
        Children {
            ast: self.ast,
            next: self.data().first_child,
        }
    }

    pub fn child(&self, n: usize) -> Option<NodeRef<'a, 's, L>> {
        self.children().nth(n)
    }

    pub fn child_count(&self) -> usize {
        self.children().count()
    }

    /// Source range covered by every token in this subtree.
    pub fn span(&self) -> Option<Span> {
        let mut tokens = Tokens::new(*self);
        let first = tokens.next()?.span;
        Some(tokens.fold(first, |acc, token| acc.join(&token.span)))
    }
}

impl<L: Language> fmt::Debug for NodeRef<'_, '_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("text", &self.text())
            .finish()
    }
}

/// Iterator over a node's direct children.
pub struct Children<'a, 's, L: Language> {
    ast: &'a Ast<'s, L>,
    next: Option<NodeId>,
}

impl<'a, 's, L: Language> Iterator for Children<'a, 's, L> {
    type Item = NodeRef<'a, 's, L>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.ast.get(id);
        self.next = node.data().next_sibling;
        Some(node)
    }
}

/// Pre-order iterator over the tokens held by a subtree.
pub struct Tokens<'a, 's, L: Language> {
    stack: Vec<NodeRef<'a, 's, L>>,
}

impl<'a, 's, L: Language> Tokens<'a, 's, L> {
    fn new(root: NodeRef<'a, 's, L>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, 's, L: Language> Iterator for Tokens<'a, 's, L> {
    type Item = Token<'s, L>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let mark = self.stack.len();
            self.stack.extend(node.children());
            self.stack[mark..].reverse();
            if let Some(token) = node.token() {
                return Some(token);
            }
        }
        None
    }
}

/// The result of a successful parse: the arena plus its root.
///
/// A start rule that matches without building anything yields an empty
/// anonymous root, so every tree has one.
#[derive(Debug, Clone)]
pub struct Tree<'s, L: Language> {
    ast: Ast<'s, L>,
    root: NodeId,
}

impl<'s, L: Language> Tree<'s, L> {
    pub(crate) fn new(mut ast: Ast<'s, L>, root: Option<NodeId>) -> Self {
        let root = match root {
            Some(id) => id,
            None => ast.node(None, []),
        };
        Self { ast, root }
    }

    pub fn root(&self) -> NodeRef<'_, 's, L> {
        self.ast.get(self.root)
    }

    #[inline]
    pub fn ast(&self) -> &Ast<'s, L> {
        &self.ast
    }

    /// Every token in the tree, in pre-order.
    pub fn tokens(&self) -> Tokens<'_, 's, L> {
        Tokens::new(self.root())
    }
}

impl<L: Language> fmt::Display for Tree<'_, L> {
    /// Indented dump, two spaces per level, `-` for anonymous nodes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root(), 0usize)];
        let mut first = true;
        while let Some((node, depth)) = stack.pop() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{:width$}", "", width = depth * 2)?;
            match node.kind() {
                Some(kind) => write!(f, "{kind:?}")?,
                None => f.write_str("-")?,
            }
            if let Some(text) = node.text() {
                write!(f, " {text}")?;
            }
            let mark = stack.len();
            stack.extend(node.children().map(|child| (child, depth + 1)));
            stack[mark..].reverse();
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{NodeRef, Tree};
    use crate::traits::Language;
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    struct ChildList<'a, 's, L: Language>(NodeRef<'a, 's, L>);

    impl<L: Language> Serialize for ChildList<'_, '_, L> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.0.children())
        }
    }

    impl<L: Language> Serialize for NodeRef<'_, '_, L> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Node", 5)?;
            state.serialize_field("kind", &self.kind().map(|kind| format!("{kind:?}")))?;
            state.serialize_field("text", &self.text())?;
            state.serialize_field("line", &self.token().map(|token| token.line))?;
            state.serialize_field("column", &self.token().map(|token| token.column))?;
            state.serialize_field("children", &ChildList(*self))?;
            state.end()
        }
    }

    impl<L: Language> Serialize for Tree<'_, L> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.root().serialize(serializer)
        }
    }
}
