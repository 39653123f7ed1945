use indextree::{Arena, NodeId};

use crate::xmlvalue::Value;

pub(crate) type TreeArena = Arena<Value>;

/// A node in the tree.
/// This is a lightweight value and can be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

impl Node {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Node(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// An XML tree: one root element, with any comments and processing
/// instructions before and after it, all owned by the tree.
///
/// Nodes are stored in an arena. Children are linked from their parent; the
/// link back to the parent is only used for navigation.
///
/// `Tree` is implemented in several sections focusing on different aspects
/// of accessing and manipulating the tree.
pub struct Tree {
    pub(crate) arena: TreeArena,
    pub(crate) document: NodeId,
}

impl Tree {
    /// Create a new, empty tree. It has no root element yet.
    pub fn new() -> Self {
        let mut arena = TreeArena::new();
        let document = arena.new_node(Value::Document);
        Tree { arena, document }
    }

    #[inline]
    pub(crate) fn arena(&self) -> &TreeArena {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut TreeArena {
        &mut self.arena
    }

    #[inline]
    pub(crate) fn document_node(&self) -> Node {
        Node::new(self.document)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.document.debug_pretty_print(&self.arena))
    }
}
