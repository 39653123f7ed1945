use ahash::HashSet;

use crate::error::Error;
use crate::tree::{Node, Tree};
use crate::xmlvalue::ValueType;

/// ## Manipulation
///
/// This maintains the tree structure:
/// - There is at most one root element. Once added it cannot be moved away.
/// - The only other nodes that can exist at document level are comments and
///   processing instructions.
/// - Only elements can have children.
impl Tree {
    /// Make an unattached element the root element.
    ///
    /// It is added after any comments and processing instructions already at
    /// document level.
    pub fn set_root(&mut self, element: Node) -> Result<(), Error> {
        self.append_to(self.document_node(), element)
    }

    /// Append a child to the end of the children of the given element.
    ///
    /// It is now the new last child of the parent.
    pub fn append(&mut self, parent: Node, child: Node) -> Result<(), Error> {
        if self.value_type(parent) == ValueType::Document {
            return Err(Error::InvalidOperation(
                "Use set_root to add to the document level".into(),
            ));
        }
        self.append_to(parent, child)
    }

    /// Append a node at document level, after the root element and anything
    /// else already there.
    ///
    /// Only comments and processing instructions can be added this way.
    pub fn append_to_document(&mut self, node: Node) -> Result<(), Error> {
        if self.value_type(node) == ValueType::Element {
            return Err(Error::InvalidOperation(
                "Use set_root to add the root element".into(),
            ));
        }
        self.append_to(self.document_node(), node)
    }

    fn append_to(&mut self, parent: Node, child: Node) -> Result<(), Error> {
        self.add_structure_check(parent, child)?;
        self.remove_structure_check(child)?;
        parent.get().checked_append(child.get(), self.arena_mut())?;
        Ok(())
    }

    /// Insert a new sibling before a reference node.
    ///
    /// Next to the root element this adds to the document level.
    pub fn insert_before(&mut self, reference_node: Node, new_sibling: Node) -> Result<(), Error> {
        let parent = self.sibling_parent(reference_node)?;
        self.add_structure_check(parent, new_sibling)?;
        self.remove_structure_check(new_sibling)?;
        reference_node
            .get()
            .checked_insert_before(new_sibling.get(), self.arena_mut())?;
        Ok(())
    }

    /// Insert a new sibling after a reference node.
    pub fn insert_after(&mut self, reference_node: Node, new_sibling: Node) -> Result<(), Error> {
        let parent = self.sibling_parent(reference_node)?;
        self.add_structure_check(parent, new_sibling)?;
        self.remove_structure_check(new_sibling)?;
        reference_node
            .get()
            .checked_insert_after(new_sibling.get(), self.arena_mut())?;
        Ok(())
    }

    /// Set the text of an element.
    pub fn set_text(&mut self, node: Node, text: Option<&str>) -> Result<(), Error> {
        let element = self.element_mut(node).ok_or_else(|| {
            Error::InvalidOperation("Only elements have text".into())
        })?;
        element.set_text(text);
        Ok(())
    }

    /// Set the tail of a node.
    pub fn set_tail(&mut self, node: Node, tail: Option<&str>) -> Result<(), Error> {
        let slot = self.value_mut(node).tail_mut().ok_or_else(|| {
            Error::InvalidOperation("The document level has no tail".into())
        })?;
        *slot = tail.map(str::to_string);
        Ok(())
    }

    /// Add to the end of the text of an element.
    pub fn append_text(&mut self, node: Node, text: &str) -> Result<(), Error> {
        let element = self.element_mut(node).ok_or_else(|| {
            Error::InvalidOperation("Only elements have text".into())
        })?;
        element.text.get_or_insert_with(String::new).push_str(text);
        Ok(())
    }

    /// Add to the end of the tail of a node.
    pub fn append_tail(&mut self, node: Node, tail: &str) -> Result<(), Error> {
        let slot = self.value_mut(node).tail_mut().ok_or_else(|| {
            Error::InvalidOperation("The document level has no tail".into())
        })?;
        slot.get_or_insert_with(String::new).push_str(tail);
        Ok(())
    }

    /// Declare prefixes on `node` for all namespaces used by element or
    /// attribute names in its subtree that have no prefix bound.
    ///
    /// Generated prefixes are `n0`, `n1` and so on, skipping prefixes that
    /// are in scope at `node` or declared anywhere below it. Attributes need a prefix other than the default
    /// one. After this, emitting events for the subtree cannot fail on an
    /// unresolvable namespace.
    pub fn create_missing_prefixes(&mut self, node: Node) -> Result<(), Error> {
        if !self.is_element(node) {
            return Err(Error::InvalidOperation(
                "Prefixes can only be declared on elements".into(),
            ));
        }
        let mut missing: Vec<String> = Vec::new();
        for descendant in self.descendants(node) {
            let Some(element) = self.element(descendant) else {
                continue;
            };
            let namespaces = self.namespaces_in_scope(descendant);
            let element_namespace = element
                .name()
                .namespace()
                .filter(|uri| !namespaces.values().any(|bound| bound == uri));
            let attribute_namespaces = element.attributes().keys().filter_map(|name| {
                name.namespace().filter(|uri| {
                    !namespaces
                        .iter()
                        .any(|(prefix, bound)| prefix.is_some() && bound == uri)
                })
            });
            for uri in element_namespace.into_iter().chain(attribute_namespaces) {
                if !missing.iter().any(|m| m == uri) {
                    missing.push(uri.to_string());
                }
            }
        }
        // a generated prefix must not shadow one declared further down
        let mut taken: HashSet<String> = self
            .namespaces_in_scope(node)
            .into_keys()
            .flatten()
            .collect();
        for descendant in self.descendants(node) {
            if let Some(element) = self.element(descendant) {
                taken.extend(element.prefixes().keys().flatten().cloned());
            }
        }
        let mut counter = 0;
        for uri in missing {
            let prefix = next_free_prefix(&taken, &mut counter);
            log::debug!("declaring generated prefix {} for {}", prefix, uri);
            if let Some(element) = self.element_mut(node) {
                element.set_prefix(Some(&prefix), uri);
            }
        }
        Ok(())
    }

    fn sibling_parent(&self, reference_node: Node) -> Result<Node, Error> {
        self.raw_parent(reference_node).ok_or_else(|| {
            Error::InvalidOperation("Cannot create siblings for an unattached node".into())
        })
    }

    fn add_structure_check(&self, parent: Node, child: Node) -> Result<(), Error> {
        match self.value_type(parent) {
            ValueType::Element | ValueType::Document => {}
            ValueType::Comment | ValueType::ProcessingInstruction => {
                return Err(Error::InvalidOperation(
                    "Cannot add children to a comment or processing instruction".into(),
                ));
            }
        }
        match self.value_type(child) {
            ValueType::Document => {
                return Err(Error::InvalidOperation("Cannot move the document".into()));
            }
            ValueType::Element => {
                if self.value_type(parent) == ValueType::Document && self.root().is_some() {
                    return Err(Error::InvalidOperation(
                        "Cannot add a second root element".into(),
                    ));
                }
            }
            ValueType::Comment | ValueType::ProcessingInstruction => {
                // these can exist everywhere
            }
        }
        Ok(())
    }

    fn remove_structure_check(&self, node: Node) -> Result<(), Error> {
        if self.is_element(node) && self.raw_parent(node) == Some(self.document_node()) {
            return Err(Error::InvalidOperation("Cannot move the root element".into()));
        }
        Ok(())
    }
}

fn next_free_prefix(taken: &HashSet<String>, counter: &mut usize) -> String {
    loop {
        let prefix = format!("n{}", counter);
        *counter += 1;
        if !taken.contains(&prefix) {
            return prefix;
        }
    }
}
