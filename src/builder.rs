use crate::error::Error;
use crate::handler::ContentHandler;
use crate::name::{Attribute, Name};
use crate::namespace::{NamespaceScopes, Namespaces};
use crate::qname::sorted_prefixes;
use crate::tree::{Node, Tree};

// before the first element start, processing instructions are held back
// so they can be placed in front of the root element once it exists
enum State {
    NoRoot { siblings: Vec<Node> },
    InTree { root: Node },
}

/// Builds a [`Tree`] from SAX-style events.
///
/// Feed it events through its [`ContentHandler`] implementation, then take
/// the result with [`TreeBuilder::into_tree`].
///
/// ```rust
/// use saxtree::{ContentHandler, Name, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.start_document()?;
/// builder.start_prefix_mapping(Some("p"), "urn:a")?;
/// builder.start_element(&Name::ns("urn:a", "doc"), "p:doc", &[])?;
/// builder.characters("Hello")?;
/// builder.end_element(&Name::ns("urn:a", "doc"), "p:doc")?;
/// builder.end_prefix_mapping(Some("p"))?;
/// builder.end_document()?;
///
/// let tree = builder.into_tree();
/// let root = tree.root().unwrap();
/// assert_eq!(tree.element(root).unwrap().name(), &Name::ns("urn:a", "doc"));
/// assert_eq!(tree.text(root), Some("Hello"));
/// # Ok::<(), saxtree::Error>(())
/// ```
pub struct TreeBuilder {
    tree: Tree,
    state: State,
    element_stack: Vec<Node>,
    scopes: NamespaceScopes,
    new_mappings: Namespaces,
}

impl TreeBuilder {
    /// Create a builder for a new tree.
    pub fn new() -> Self {
        TreeBuilder {
            tree: Tree::new(),
            state: State::NoRoot {
                siblings: Vec::new(),
            },
            element_stack: Vec::new(),
            scopes: NamespaceScopes::new(),
            new_mappings: Namespaces::new(),
        }
    }

    /// The tree as built so far.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The root element, once it has started.
    pub fn root(&self) -> Option<Node> {
        match self.state {
            State::NoRoot { .. } => None,
            State::InTree { root } => Some(root),
        }
    }

    /// The namespace bindings that are currently in scope.
    pub fn scopes(&self) -> &NamespaceScopes {
        &self.scopes
    }

    /// Finish building and take the tree.
    ///
    /// Processing instructions received without any element following them
    /// are kept at document level.
    pub fn into_tree(mut self) -> Tree {
        if let State::NoRoot { siblings } = &mut self.state {
            for sibling in std::mem::take(siblings) {
                if let Err(e) = self.tree.append_to_document(sibling) {
                    log::warn!("dropping leading processing instruction: {}", e);
                }
            }
        }
        self.tree
    }

    // a name without a namespace is in the current default namespace
    fn build_tag(&self, name: &Name) -> Name {
        if name.namespace().is_some() {
            name.clone()
        } else {
            name.in_namespace(self.scopes.default_namespace())
        }
    }

    fn current_element(&self, event: &str) -> Result<Node, Error> {
        self.element_stack.last().copied().ok_or_else(|| {
            Error::InvalidOperation(format!("{} outside of any element", event))
        })
    }

    // the prefix of the qualified name if it is bound to the namespace,
    // otherwise the first prefix bound to it, looking at the declarations on
    // the element itself before those inherited from the parent
    fn preferred_prefix(
        &self,
        namespace: Option<&str>,
        qname: &str,
        declared: &Namespaces,
        parent: Option<Node>,
    ) -> Option<String> {
        let namespace = namespace?;
        let used = qname.split_once(':').map(|(prefix, _)| prefix);
        if self.scopes.current(used) == Some(namespace) {
            return used.map(str::to_string);
        }
        let find = |namespaces: &Namespaces| {
            sorted_prefixes(namespaces)
                .into_iter()
                .find(|(_, uri)| *uri == namespace)
                .map(|(prefix, _)| prefix.map(str::to_string))
        };
        if let Some(prefix) = find(declared) {
            return prefix;
        }
        let inherited = parent
            .map(|parent| self.tree.namespaces_in_scope(parent))
            .unwrap_or_default();
        find(&inherited)
            .filter(|prefix| !declared.contains_key(prefix))
            .flatten()
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHandler for TreeBuilder {
    fn start_prefix_mapping(&mut self, prefix: Option<&str>, uri: &str) -> Result<(), Error> {
        log::trace!("start prefix mapping {:?} -> {}", prefix, uri);
        self.new_mappings
            .insert(prefix.map(str::to_string), uri.to_string());
        self.scopes.bind(prefix, uri);
        Ok(())
    }

    fn end_prefix_mapping(&mut self, prefix: Option<&str>) -> Result<(), Error> {
        log::trace!("end prefix mapping {:?}", prefix);
        self.scopes.unbind(prefix);
        Ok(())
    }

    fn start_element(
        &mut self,
        name: &Name,
        qname: &str,
        attributes: &[Attribute],
    ) -> Result<(), Error> {
        let tag = self.build_tag(name);
        log::trace!("start element {}", tag);
        let attributes = attributes
            .iter()
            .map(|attribute| (attribute.name.clone(), attribute.value.clone()))
            .collect::<Vec<_>>();
        let prefixes = std::mem::take(&mut self.new_mappings);
        let parent = self.element_stack.last().copied();
        let preferred_prefix = self.preferred_prefix(tag.namespace(), qname, &prefixes, parent);

        let element = match &mut self.state {
            State::NoRoot { siblings } => {
                let siblings = std::mem::take(siblings);
                let root = self.tree.new_root_element(tag, attributes, prefixes)?;
                for sibling in siblings {
                    self.tree.insert_before(root, sibling)?;
                }
                self.state = State::InTree { root };
                root
            }
            State::InTree { .. } => {
                let parent = parent.ok_or_else(|| {
                    Error::InvalidOperation("Second root element started".into())
                })?;
                self.tree.append_element(parent, tag, attributes, prefixes)?
            }
        };
        if let Some(element) = self.tree.element_mut(element) {
            element.set_preferred_prefix(preferred_prefix.as_deref());
        }
        self.element_stack.push(element);
        Ok(())
    }

    fn end_element(&mut self, name: &Name, _qname: &str) -> Result<(), Error> {
        let element = self.element_stack.pop().ok_or_else(|| {
            Error::InvalidOperation("Element end without an open element".into())
        })?;
        let tag = self.build_tag(name);
        log::trace!("end element {}", tag);
        let open = self
            .tree
            .element(element)
            .map(|element| element.name().clone())
            .ok_or_else(|| Error::InvalidOperation("Open node is not an element".into()))?;
        if open != tag {
            log::debug!("unexpected element closed: {} while {} is open", tag, open);
            return Err(Error::UnexpectedElementClosed {
                expected: open,
                found: tag,
            });
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        log::trace!("characters {:?}", text);
        let element = self.current_element("Character data")?;
        match self.tree.last_child(element) {
            Some(last_child) => self.tree.append_tail(last_child, text),
            None => self.tree.append_text(element, text),
        }
    }

    fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> Result<(), Error> {
        log::trace!("processing instruction {} {:?}", target, data);
        let pi = self.tree.new_processing_instruction(target, data);
        match &mut self.state {
            State::NoRoot { siblings } => {
                siblings.push(pi);
                Ok(())
            }
            State::InTree { .. } => match self.element_stack.last() {
                Some(&element) => self.tree.append(element, pi),
                None => self.tree.append_to_document(pi),
            },
        }
    }
}
