//! A fixed representation of a document.
//!
//! Trees live in an arena and are mutable, but it is useful to have a
//! representation of a document that you can create and compare separately.
//! This has no dependency on [`Tree`]. Turn it into a tree with
//! [`Document::to_tree`], and get one back with [`Tree::to_fixed`].
//!
//! Text is given as separate content here; in the tree it ends up as the text
//! of an element or the tail of the node before it.
//!
//! Example:
//!
//! ```rust
//! use saxtree::fixed;
//! use saxtree::Name;
//!
//! let document = fixed::Document {
//!     before: vec![],
//!     document_element: fixed::Element {
//!         name: Name::new("foo"),
//!         prefixes: Default::default(),
//!         attributes: Default::default(),
//!         children: vec![fixed::Content::Text("Example".to_string())],
//!     },
//!     after: vec![],
//! };
//!
//! let tree = document.to_tree()?;
//! let root = tree.root().unwrap();
//! assert_eq!(tree.text(root), Some("Example"));
//! assert_eq!(tree.to_fixed()?, document);
//! # Ok::<(), saxtree::Error>(())
//! ```

use crate::error::Error;
use crate::name::Name;
use crate::namespace::Namespaces;
use crate::tree::{Node, Tree};
use crate::xmlvalue::{Attributes, Value};

/// A fixed representation of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    /// Comments and processing instructions before the document element
    pub before: Vec<DocumentContent>,
    /// The document element
    pub document_element: Element,
    /// Comments and processing instructions after the document element
    pub after: Vec<DocumentContent>,
}

/// A fixed representation of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    /// Name of element
    pub name: Name,
    /// Namespace prefixes declared on this element
    pub prefixes: Namespaces,
    /// Attributes
    pub attributes: Attributes,
    /// Children
    pub children: Vec<Content>,
}

/// A fixed representation of element content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    /// Text
    Text(String),
    /// A comment
    Comment(String),
    /// A processing instruction
    ProcessingInstruction(ProcessingInstruction),
    /// An element
    Element(Element),
}

/// Content that is allowed next to the document element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentContent {
    /// A comment
    Comment(String),
    /// A processing instruction
    ProcessingInstruction(ProcessingInstruction),
}

/// A fixed representation of a processing instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessingInstruction {
    /// Target of processing instruction
    pub target: String,
    /// Data of processing instruction
    pub data: Option<String>,
}

impl Document {
    /// Build a new tree for this document.
    pub fn to_tree(&self) -> Result<Tree, Error> {
        let mut tree = Tree::new();
        let element = &self.document_element;
        let root = tree.new_root_element(
            element.name.clone(),
            element.attributes.clone(),
            element.prefixes.clone(),
        )?;
        element.build_children(&mut tree, root)?;
        for content in &self.before {
            let node = content.create_node(&mut tree);
            tree.insert_before(root, node)?;
        }
        for content in &self.after {
            let node = content.create_node(&mut tree);
            tree.append_to_document(node)?;
        }
        Ok(tree)
    }
}

impl Element {
    /// Append this element as the last child of `parent`.
    pub fn append_to(&self, tree: &mut Tree, parent: Node) -> Result<Node, Error> {
        let node = tree.append_element(
            parent,
            self.name.clone(),
            self.attributes.clone(),
            self.prefixes.clone(),
        )?;
        self.build_children(tree, node)?;
        Ok(node)
    }

    fn build_children(&self, tree: &mut Tree, node: Node) -> Result<(), Error> {
        for child in &self.children {
            match child {
                Content::Text(text) => match tree.last_child(node) {
                    Some(last_child) => tree.append_tail(last_child, text)?,
                    None => tree.append_text(node, text)?,
                },
                Content::Comment(comment) => {
                    let comment = tree.new_comment(comment);
                    tree.append(node, comment)?;
                }
                Content::ProcessingInstruction(pi) => {
                    let pi = pi.create_node(tree);
                    tree.append(node, pi)?;
                }
                Content::Element(element) => {
                    element.append_to(tree, node)?;
                }
            }
        }
        Ok(())
    }
}

impl ProcessingInstruction {
    fn create_node(&self, tree: &mut Tree) -> Node {
        tree.new_processing_instruction(&self.target, self.data.as_deref())
    }
}

impl DocumentContent {
    fn create_node(&self, tree: &mut Tree) -> Node {
        match self {
            DocumentContent::Comment(comment) => tree.new_comment(comment),
            DocumentContent::ProcessingInstruction(pi) => pi.create_node(tree),
        }
    }
}

/// ## Fixed representation
impl Tree {
    /// The fixed representation of the whole document.
    ///
    /// Empty text is left out, and the tails of nodes at document level are
    /// lost. Fails if there is no root element.
    pub fn to_fixed(&self) -> Result<Document, Error> {
        let root = self
            .root()
            .ok_or_else(|| Error::InvalidOperation("The tree has no root element".into()))?;
        let mut before = Vec::new();
        let mut after = Vec::new();
        let mut seen_root = false;
        for node in self.document_children() {
            if node == root {
                seen_root = true;
                continue;
            }
            let content = match self.value(node) {
                Value::Comment(comment) => DocumentContent::Comment(comment.get().to_string()),
                Value::ProcessingInstruction(pi) => {
                    DocumentContent::ProcessingInstruction(ProcessingInstruction {
                        target: pi.target().to_string(),
                        data: pi.data().map(str::to_string),
                    })
                }
                Value::Element(_) | Value::Document => continue,
            };
            if seen_root {
                after.push(content);
            } else {
                before.push(content);
            }
        }
        Ok(Document {
            before,
            document_element: self.to_fixed_element(root)?,
            after,
        })
    }

    /// The fixed representation of an element and its descendants.
    pub fn to_fixed_element(&self, node: Node) -> Result<Element, Error> {
        let element = self
            .element(node)
            .ok_or_else(|| Error::InvalidOperation("Not an element".into()))?;
        let mut children = Vec::new();
        push_text(&mut children, element.text());
        for child in self.children(node) {
            match self.value(child) {
                Value::Element(_) => children.push(Content::Element(self.to_fixed_element(child)?)),
                Value::Comment(comment) => children.push(Content::Comment(comment.get().to_string())),
                Value::ProcessingInstruction(pi) => {
                    children.push(Content::ProcessingInstruction(ProcessingInstruction {
                        target: pi.target().to_string(),
                        data: pi.data().map(str::to_string),
                    }))
                }
                Value::Document => {}
            }
            push_text(&mut children, self.tail(child));
        }
        Ok(Element {
            name: element.name().clone(),
            prefixes: element.prefixes().clone(),
            attributes: element.attributes().clone(),
            children,
        })
    }
}

fn push_text(children: &mut Vec<Content>, text: Option<&str>) {
    if let Some(text) = text.filter(|text| !text.is_empty()) {
        children.push(Content::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pi(target: &str) -> ProcessingInstruction {
        ProcessingInstruction {
            target: target.to_string(),
            data: None,
        }
    }

    #[test]
    fn test_text_becomes_text_and_tail() {
        let document = Document {
            before: vec![DocumentContent::ProcessingInstruction(pi("x"))],
            document_element: Element {
                name: Name::new("a"),
                prefixes: Namespaces::new(),
                attributes: Attributes::new(),
                children: vec![
                    Content::Text("one".to_string()),
                    Content::Text("two".to_string()),
                    Content::Comment("c".to_string()),
                    Content::Text("three".to_string()),
                ],
            },
            after: vec![DocumentContent::Comment("after".to_string())],
        };
        let tree = document.to_tree().unwrap();
        let root = tree.root().unwrap();
        let comment = tree.first_child(root).unwrap();
        assert_eq!(tree.text(root), Some("onetwo"));
        assert_eq!(tree.tail(comment), Some("three"));
        assert_eq!(tree.document_children().count(), 3);

        let fixed = tree.to_fixed().unwrap();
        assert_eq!(fixed.before, document.before);
        assert_eq!(fixed.after, document.after);
        assert_eq!(
            fixed.document_element.children,
            vec![
                Content::Text("onetwo".to_string()),
                Content::Comment("c".to_string()),
                Content::Text("three".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_root() {
        assert!(matches!(
            Tree::new().to_fixed(),
            Err(Error::InvalidOperation(_))
        ));
    }
}
