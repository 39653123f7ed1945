use crate::error::Error;
use crate::name::Name;
use crate::tree::{Node, Tree};
use crate::xmlvalue::{Comment, Element, ProcessingInstruction, Value};

/// ## Creation
///
/// New nodes are unattached until they are added to the tree with
/// [`Tree::set_root`], [`Tree::append`], [`Tree::insert_before`] or
/// [`Tree::insert_after`].
impl Tree {
    pub(crate) fn new_node(&mut self, value: Value) -> Node {
        Node::new(self.arena_mut().new_node(value))
    }

    /// Create a new, unattached element.
    pub fn new_element(&mut self, name: Name) -> Node {
        self.new_node(Value::Element(Element::new(name)))
    }

    /// Create a new, unattached comment.
    pub fn new_comment(&mut self, comment: &str) -> Node {
        self.new_node(Value::Comment(Comment::new(comment.to_string())))
    }

    /// Create a new, unattached processing instruction.
    pub fn new_processing_instruction(&mut self, target: &str, data: Option<&str>) -> Node {
        self.new_node(Value::ProcessingInstruction(ProcessingInstruction::new(
            target.to_string(),
            data.map(|s| s.to_string()),
        )))
    }

    fn new_element_with(
        &mut self,
        name: Name,
        attributes: impl IntoIterator<Item = (Name, String)>,
        prefixes: impl IntoIterator<Item = (Option<String>, String)>,
    ) -> Node {
        let mut element = Element::new(name);
        element.attributes.extend(attributes);
        element.prefixes.extend(prefixes);
        self.new_node(Value::Element(element))
    }

    /// Create the root element, with its attributes and namespace prefix
    /// declarations.
    ///
    /// Fails if the tree already has a root element.
    pub fn new_root_element(
        &mut self,
        name: Name,
        attributes: impl IntoIterator<Item = (Name, String)>,
        prefixes: impl IntoIterator<Item = (Option<String>, String)>,
    ) -> Result<Node, Error> {
        let node = self.new_element_with(name, attributes, prefixes);
        self.set_root(node)?;
        Ok(node)
    }

    /// Create an element with its attributes and namespace prefix
    /// declarations, and append it as the last child of `parent`.
    pub fn append_element(
        &mut self,
        parent: Node,
        name: Name,
        attributes: impl IntoIterator<Item = (Name, String)>,
        prefixes: impl IntoIterator<Item = (Option<String>, String)>,
    ) -> Result<Node, Error> {
        let node = self.new_element_with(name, attributes, prefixes);
        self.append(parent, node)?;
        Ok(node)
    }
}
