use indextree::NodeEdge as IndexTreeNodeEdge;

use crate::namespace::Namespaces;
use crate::tree::{Node, Tree};
use crate::xmlvalue::{Comment, Element, ProcessingInstruction, Value, ValueType};

/// Node edges.
///
/// Used by [`Tree::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeEdge {
    /// The start edge of a node. In case of an element
    /// this is the start tag.
    Start(Node),
    /// The end edge of a node. In case of an element
    /// this is the end tag. For comments and processing
    /// instructions the end edge occurs immediately after
    /// the start edge.
    End(Node),
}

/// ## Read-only access
impl Tree {
    /// The root element, if the tree has one.
    ///
    /// ```rust
    /// use saxtree::{Name, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.root(), None);
    /// let root = tree.new_root_element(Name::new("doc"), [], [])?;
    /// assert_eq!(tree.root(), Some(root));
    /// # Ok::<(), saxtree::Error>(())
    /// ```
    pub fn root(&self) -> Option<Node> {
        self.document_children()
            .find(|node| self.value_type(*node) == ValueType::Element)
    }

    /// The nodes at document level, in order: the root element and the
    /// comments and processing instructions around it.
    pub fn document_children(&self) -> impl Iterator<Item = Node> + '_ {
        self.all_children(self.document_node())
    }

    /// The value of a node.
    #[inline]
    pub fn value(&self, node: Node) -> &Value {
        self.arena()[node.get()].get()
    }

    /// The value of a node, mutably.
    #[inline]
    pub fn value_mut(&mut self, node: Node) -> &mut Value {
        self.arena_mut()[node.get()].get_mut()
    }

    /// The type of a node.
    pub fn value_type(&self, node: Node) -> ValueType {
        self.value(node).value_type()
    }

    /// Is this an element node?
    pub fn is_element(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::Element
    }

    /// Is this a comment node?
    pub fn is_comment(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::Comment
    }

    /// Is this a processing instruction node?
    pub fn is_processing_instruction(&self, node: Node) -> bool {
        self.value_type(node) == ValueType::ProcessingInstruction
    }

    /// Element value, if this is an element.
    pub fn element(&self, node: Node) -> Option<&Element> {
        match self.value(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutable element value, if this is an element.
    pub fn element_mut(&mut self, node: Node) -> Option<&mut Element> {
        match self.value_mut(node) {
            Value::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Comment value, if this is a comment.
    pub fn comment(&self, node: Node) -> Option<&Comment> {
        match self.value(node) {
            Value::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Processing instruction value, if this is a processing instruction.
    pub fn processing_instruction(&self, node: Node) -> Option<&ProcessingInstruction> {
        match self.value(node) {
            Value::ProcessingInstruction(pi) => Some(pi),
            _ => None,
        }
    }

    /// The text of an element, before its first child.
    pub fn text(&self, node: Node) -> Option<&str> {
        self.element(node).and_then(Element::text)
    }

    /// The text following a node inside its parent.
    pub fn tail(&self, node: Node) -> Option<&str> {
        self.value(node).tail()
    }

    /// Get the parent element.
    ///
    /// Returns [`None`] for nodes at document level and for nodes that
    /// aren't attached to anything.
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.raw_parent(node)
            .filter(|parent| parent.get() != self.document)
    }

    // the parent including the document holder
    pub(crate) fn raw_parent(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].parent().map(Node::new)
    }

    pub(crate) fn all_children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().children(self.arena()).map(Node::new)
    }

    /// Iterator over the child nodes of this node.
    pub fn children(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.all_children(node)
    }

    /// Get first child.
    ///
    /// Returns [`None`] if there are no children.
    pub fn first_child(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].first_child().map(Node::new)
    }

    /// Get last child.
    ///
    /// Returns [`None`] if there are no children.
    pub fn last_child(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].last_child().map(Node::new)
    }

    /// Get next sibling.
    ///
    /// At document level the siblings of the root element are the comments
    /// and processing instructions around it.
    pub fn next_sibling(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].next_sibling().map(Node::new)
    }

    /// Get previous sibling.
    pub fn previous_sibling(&self, node: Node) -> Option<Node> {
        self.arena()[node.get()].previous_sibling().map(Node::new)
    }

    /// Iterator over ancestor elements, starting with this node.
    pub fn ancestors(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get()
            .ancestors(self.arena())
            .map(Node::new)
            .filter(|ancestor| ancestor.get() != self.document)
    }

    /// Iterator over this node and its descendants, in document order.
    pub fn descendants(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        node.get().descendants(self.arena()).map(Node::new)
    }

    /// Traverse over node edges.
    ///
    /// For the tree `<a><b/></a>` this generates a [`NodeEdge::Start`] for
    /// `<a>`, then a [`NodeEdge::Start`] for `<b>`, immediately followed by a
    /// [`NodeEdge::End`] for `<b>`, and finally a [`NodeEdge::End`] for `<a>`.
    pub fn traverse(&self, node: Node) -> impl Iterator<Item = NodeEdge> + '_ {
        node.get().traverse(self.arena()).map(|edge| match edge {
            IndexTreeNodeEdge::Start(node_id) => NodeEdge::Start(Node::new(node_id)),
            IndexTreeNodeEdge::End(node_id) => NodeEdge::End(Node::new(node_id)),
        })
    }

    /// The namespace map of a node: every prefix visible at the node, with
    /// the namespace it is bound to. Declarations on nearer elements shadow
    /// declarations further up.
    ///
    /// ```rust
    /// use saxtree::{Name, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.new_root_element(
    ///     Name::new("doc"),
    ///     [],
    ///     [(Some("p".to_string()), "urn:a".to_string())],
    /// )?;
    /// let child = tree.append_element(
    ///     root,
    ///     Name::new("child"),
    ///     [],
    ///     [(None, "urn:b".to_string())],
    /// )?;
    /// let namespaces = tree.namespaces_in_scope(child);
    /// assert_eq!(namespaces.get(&Some("p".to_string())).map(String::as_str), Some("urn:a"));
    /// assert_eq!(namespaces.get(&None).map(String::as_str), Some("urn:b"));
    /// # Ok::<(), saxtree::Error>(())
    /// ```
    pub fn namespaces_in_scope(&self, node: Node) -> Namespaces {
        let mut namespaces = Namespaces::new();
        for ancestor in self.ancestors(node) {
            if let Some(element) = self.element(ancestor) {
                for (prefix, namespace) in element.prefixes() {
                    if !namespaces.contains_key(prefix) {
                        namespaces.insert(prefix.clone(), namespace.clone());
                    }
                }
            }
        }
        namespaces
    }
}

#[cfg(test)]
mod tests {
    use crate::{Name, Tree};

    #[test]
    fn test_root_level_navigation() {
        let mut tree = Tree::new();
        let root = tree.new_root_element(Name::new("doc"), [], []).unwrap();
        let before = tree.new_processing_instruction("before", None);
        let after = tree.new_processing_instruction("after", Some("data"));
        tree.insert_before(root, before).unwrap();
        tree.insert_after(root, after).unwrap();

        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.parent(before), None);
        assert_eq!(tree.previous_sibling(root), Some(before));
        assert_eq!(tree.next_sibling(root), Some(after));
        assert_eq!(tree.root(), Some(root));
        assert_eq!(
            tree.document_children().collect::<Vec<_>>(),
            vec![before, root, after]
        );
    }

    #[test]
    fn test_namespaces_in_scope_shadowing() {
        let mut tree = Tree::new();
        let root = tree
            .new_root_element(
                Name::new("doc"),
                [],
                [
                    (Some("p".to_string()), "urn:outer".to_string()),
                    (Some("q".to_string()), "urn:q".to_string()),
                ],
            )
            .unwrap();
        let child = tree
            .append_element(
                root,
                Name::new("child"),
                [],
                [(Some("p".to_string()), "urn:inner".to_string())],
            )
            .unwrap();
        let namespaces = tree.namespaces_in_scope(child);
        assert_eq!(namespaces.len(), 2);
        assert_eq!(namespaces[&Some("p".to_string())], "urn:inner");
        assert_eq!(namespaces[&Some("q".to_string())], "urn:q");
        assert_eq!(tree.namespaces_in_scope(root)[&Some("p".to_string())], "urn:outer");
    }

    #[test]
    fn test_ancestors_stop_at_document_level() {
        let mut tree = Tree::new();
        let root = tree.new_root_element(Name::new("a"), [], []).unwrap();
        let b = tree.append_element(root, Name::new("b"), [], []).unwrap();
        assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![b, root]);
    }
}
