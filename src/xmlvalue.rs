use std::collections::BTreeMap;

use crate::name::Name;
use crate::namespace::Namespaces;

/// The type of the node value.
///
/// Access it using [`Value::value_type`] or
/// [`Tree::value_type`](crate::Tree::value_type).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    /// Holder of the document level. This is not the root element.
    Document,
    /// Element; it has a name, attributes and namespace information.
    Element,
    /// Comment.
    Comment,
    /// Processing instruction.
    ProcessingInstruction,
}

/// A node value.
///
/// Access it using [`Tree::value`](crate::Tree::value) or
/// mutably using [`Tree::value_mut`](crate::Tree::value_mut).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Holder of the document level: the root element and the comments and
    /// processing instructions around it. There is one per tree.
    Document,
    /// Element.
    Element(Element),
    /// Comment.
    Comment(Comment),
    /// Processing instruction.
    ProcessingInstruction(ProcessingInstruction),
}

impl Value {
    /// Returns the type of the value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Document => ValueType::Document,
            Value::Element(_) => ValueType::Element,
            Value::Comment(_) => ValueType::Comment,
            Value::ProcessingInstruction(_) => ValueType::ProcessingInstruction,
        }
    }

    /// The text following this node inside its parent.
    pub fn tail(&self) -> Option<&str> {
        match self {
            Value::Document => None,
            Value::Element(element) => element.tail.as_deref(),
            Value::Comment(comment) => comment.tail.as_deref(),
            Value::ProcessingInstruction(pi) => pi.tail.as_deref(),
        }
    }

    pub(crate) fn tail_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Value::Document => None,
            Value::Element(element) => Some(&mut element.tail),
            Value::Comment(comment) => Some(&mut comment.tail),
            Value::ProcessingInstruction(pi) => Some(&mut pi.tail),
        }
    }
}

/// Attributes by name. Names are unique; iteration is in name order.
pub type Attributes = BTreeMap<Name, String>;

/// XML element value.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) name: Name,
    pub(crate) attributes: Attributes,
    pub(crate) prefixes: Namespaces,
    pub(crate) prefix: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) tail: Option<String>,
}

impl Element {
    pub(crate) fn new(name: Name) -> Self {
        Element {
            name,
            attributes: Attributes::new(),
            prefixes: Namespaces::new(),
            prefix: None,
            text: None,
            tail: None,
        }
    }

    /// The name of the element.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The attributes of the element.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get an attribute by name.
    ///
    /// ```rust
    /// use saxtree::{Name, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let doc = tree.new_element(Name::new("doc"));
    /// let element = tree.element_mut(doc).unwrap();
    /// element.set_attribute(Name::new("a"), "A");
    /// assert_eq!(element.get_attribute(&Name::new("a")), Some("A"));
    /// ```
    pub fn get_attribute(&self, name: &Name) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Set an attribute value.
    pub fn set_attribute<S: Into<String>>(&mut self, name: Name, value: S) {
        self.attributes.insert(name, value.into());
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, name: &Name) {
        self.attributes.remove(name);
    }

    /// Declare a prefix on this element. `None` declares the default
    /// namespace.
    pub fn set_prefix<S: Into<String>>(&mut self, prefix: Option<&str>, namespace: S) {
        self.prefixes
            .insert(prefix.map(str::to_string), namespace.into());
    }

    /// Remove a prefix declaration.
    ///
    /// This may leave names without a bound prefix. Call
    /// [`Tree::create_missing_prefixes`](crate::Tree::create_missing_prefixes)
    /// before emitting events for such a tree.
    pub fn remove_prefix(&mut self, prefix: Option<&str>) {
        self.prefixes.retain(|p, _| p.as_deref() != prefix);
    }

    /// The prefixes declared on this element.
    ///
    /// This does not include prefixes declared by ancestors; see
    /// [`Tree::namespaces_in_scope`](crate::Tree::namespaces_in_scope) for
    /// the full namespace map.
    pub fn prefixes(&self) -> &Namespaces {
        &self.prefixes
    }

    /// The prefix this element prefers for its own qualified name. `None`
    /// prefers the default namespace.
    pub fn preferred_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Set the preferred prefix.
    pub fn set_preferred_prefix(&mut self, prefix: Option<&str>) {
        self.prefix = prefix.map(str::to_string);
    }

    /// The text directly inside the element, before its first child.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set the text.
    pub fn set_text<S: Into<String>>(&mut self, text: Option<S>) {
        self.text = text.map(Into::into);
    }

    /// The text after the element, inside its parent.
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Set the tail.
    pub fn set_tail<S: Into<String>>(&mut self, tail: Option<S>) {
        self.tail = tail.map(Into::into);
    }
}

/// XML comment.
///
/// Example: `<!-- foo -->`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub(crate) text: String,
    pub(crate) tail: Option<String>,
}

impl Comment {
    pub(crate) fn new(text: String) -> Self {
        Comment { text, tail: None }
    }

    /// Get the comment text.
    pub fn get(&self) -> &str {
        &self.text
    }

    /// Set the comment text.
    pub fn set<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
    }

    /// The text after the comment.
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }
}

/// XML processing instruction value.
///
/// Example: `<?foo?>` or `<?foo bar?>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingInstruction {
    pub(crate) target: String,
    pub(crate) data: Option<String>,
    pub(crate) tail: Option<String>,
}

impl ProcessingInstruction {
    pub(crate) fn new(target: String, data: Option<String>) -> Self {
        ProcessingInstruction {
            target,
            data,
            tail: None,
        }
    }

    /// Get processing instruction target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get processing instruction data.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Set target.
    pub fn set_target<S: Into<String>>(&mut self, target: S) {
        self.target = target.into();
    }

    /// Set data.
    pub fn set_data<S: Into<String>>(&mut self, data: Option<S>) {
        self.data = data.map(Into::into);
    }

    /// The text after the processing instruction.
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }
}
