use genawaiter::rc::gen;
use genawaiter::yield_;

use crate::access::NodeEdge;
use crate::error::Error;
use crate::handler::{ContentHandler, Event};
use crate::name::{Attribute, Name};
use crate::namespace::Namespaces;
use crate::qname::{resolve_qname, PrefixPreference};
use crate::tree::{Node, Tree};
use crate::xmlvalue::{Element, Value};

/// Parameters for emitting events from a tree.
///
/// ```rust
/// use saxtree::emit::Parameters;
///
/// let parameters = Parameters {
///     document_events: false,
///     ..Default::default()
/// };
/// assert!(parameters.root_siblings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    /// Emit `start_document` and `end_document` around everything else.
    pub document_events: bool,
    /// Emit the processing instructions before and after the root element.
    pub root_siblings: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            document_events: true,
            root_siblings: true,
        }
    }
}

// what is needed to close an element once its children are done
struct OpenElement {
    name: Name,
    qname: String,
    new_prefixes: Vec<Option<String>>,
    namespaces: Namespaces,
}

// everything an element start needs, resolved before anything is emitted
struct StartElement {
    new_prefixes: Vec<(Option<String>, String)>,
    qname: String,
    attributes: Vec<Attribute>,
    namespaces: Namespaces,
}

fn resolve_start(
    tree: &Tree,
    node: Node,
    element: &Element,
    parent_namespaces: &Namespaces,
) -> Result<StartElement, Error> {
    let namespaces = tree.namespaces_in_scope(node);
    let new_prefixes = namespaces
        .iter()
        .filter(|(prefix, uri)| parent_namespaces.get(*prefix) != Some(*uri))
        .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
        .collect::<Vec<_>>();
    let attributes = element
        .attributes()
        .iter()
        .map(|(name, value)| {
            let qname = resolve_qname(
                name.namespace(),
                name.local(),
                &namespaces,
                PrefixPreference::NonDefault,
            )?;
            Ok(Attribute::new(name.clone(), qname, value.clone()))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    let name = element.name();
    let qname = resolve_qname(
        name.namespace(),
        name.local(),
        &namespaces,
        PrefixPreference::Prefix(element.preferred_prefix()),
    )?
    .into_owned();
    Ok(StartElement {
        new_prefixes,
        qname,
        attributes,
        namespaces,
    })
}

fn non_empty(text: Option<&str>) -> Option<Event> {
    text.filter(|text| !text.is_empty())
        .map(|text| Event::Characters(text.to_string()))
}

// comments and processing instructions, which have no children
fn leaf_events(tree: &Tree, node: Node) -> Vec<Event> {
    let mut events = Vec::new();
    if let Some(pi) = tree.processing_instruction(node) {
        events.push(Event::ProcessingInstruction {
            target: pi.target().to_string(),
            data: pi.data().map(str::to_string),
        });
    }
    events.extend(non_empty(tree.tail(node)));
    events
}

fn leading_siblings(tree: &Tree, node: Node) -> Vec<Node> {
    let mut siblings = Vec::new();
    let mut current = tree.previous_sibling(node);
    while let Some(sibling) = current.filter(|sibling| tree.is_processing_instruction(*sibling)) {
        siblings.push(sibling);
        current = tree.previous_sibling(sibling);
    }
    siblings.reverse();
    siblings
}

fn trailing_siblings(tree: &Tree, node: Node) -> Vec<Node> {
    let mut siblings = Vec::new();
    let mut current = tree.next_sibling(node);
    while let Some(sibling) = current.filter(|sibling| tree.is_processing_instruction(*sibling)) {
        siblings.push(sibling);
        current = tree.next_sibling(sibling);
    }
    siblings
}

pub(crate) fn gen_events(
    tree: &Tree,
    top: Option<Node>,
    parameters: Parameters,
) -> impl Iterator<Item = Result<Event, Error>> + '_ {
    gen!({
        let top = match top {
            Some(top) => top,
            None => {
                log::debug!("cannot emit events for a tree without a root element");
                yield_!(Err(Error::InvalidOperation(
                    "The tree has no root element".into()
                )));
                return;
            }
        };
        if parameters.document_events {
            yield_!(Ok(Event::StartDocument));
        }
        let with_siblings = parameters.root_siblings && tree.root() == Some(top);
        if with_siblings {
            for sibling in leading_siblings(tree, top) {
                for event in leaf_events(tree, sibling) {
                    yield_!(Ok(event));
                }
            }
        }

        let empty = Namespaces::new();
        let mut stack: Vec<OpenElement> = Vec::new();
        for edge in tree.traverse(top) {
            match edge {
                NodeEdge::Start(node) => match tree.value(node) {
                    Value::Element(element) => {
                        let parent_namespaces = stack
                            .last()
                            .map(|open| &open.namespaces)
                            .unwrap_or(&empty);
                        let start = match resolve_start(tree, node, element, parent_namespaces) {
                            Ok(start) => start,
                            Err(e) => {
                                log::debug!("cannot emit {}: {}", element.name(), e);
                                yield_!(Err(e));
                                return;
                            }
                        };
                        for (prefix, uri) in &start.new_prefixes {
                            yield_!(Ok(Event::StartPrefixMapping {
                                prefix: prefix.clone(),
                                uri: uri.clone(),
                            }));
                        }
                        yield_!(Ok(Event::StartElement {
                            name: element.name().clone(),
                            qname: start.qname.clone(),
                            attributes: start.attributes,
                        }));
                        if let Some(event) = non_empty(element.text()) {
                            yield_!(Ok(event));
                        }
                        stack.push(OpenElement {
                            name: element.name().clone(),
                            qname: start.qname,
                            new_prefixes: start
                                .new_prefixes
                                .into_iter()
                                .map(|(prefix, _)| prefix)
                                .collect(),
                            namespaces: start.namespaces,
                        });
                    }
                    Value::Comment(_) | Value::ProcessingInstruction(_) => {
                        for event in leaf_events(tree, node) {
                            yield_!(Ok(event));
                        }
                    }
                    Value::Document => {}
                },
                NodeEdge::End(node) => {
                    if !tree.is_element(node) {
                        continue;
                    }
                    let open = match stack.pop() {
                        Some(open) => open,
                        None => continue,
                    };
                    yield_!(Ok(Event::EndElement {
                        name: open.name,
                        qname: open.qname,
                    }));
                    for prefix in open.new_prefixes.into_iter().rev() {
                        yield_!(Ok(Event::EndPrefixMapping { prefix }));
                    }
                    if let Some(event) = non_empty(tree.tail(node)) {
                        yield_!(Ok(event));
                    }
                }
            }
        }

        if with_siblings {
            for sibling in trailing_siblings(tree, top) {
                for event in leaf_events(tree, sibling) {
                    yield_!(Ok(event));
                }
            }
        }
        if parameters.document_events {
            yield_!(Ok(Event::EndDocument));
        }
    })
    .into_iter()
}

/// ## Emitting events
impl Tree {
    /// Lazily generate the events describing the whole document.
    ///
    /// The first error ends the sequence. A tree without a root element
    /// produces a single [`Error::InvalidOperation`].
    ///
    /// ```rust
    /// use saxtree::{Event, Name, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.new_root_element(Name::new("doc"), [], [])?;
    /// tree.set_text(root, Some("Hello"))?;
    ///
    /// let events = tree.events().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(events.len(), 5);
    /// assert_eq!(events[2], Event::Characters("Hello".to_string()));
    /// # Ok::<(), saxtree::Error>(())
    /// ```
    pub fn events(&self) -> impl Iterator<Item = Result<Event, Error>> + '_ {
        self.events_with(Parameters::default())
    }

    /// Lazily generate the events describing the whole document, with
    /// explicit parameters.
    pub fn events_with(
        &self,
        parameters: Parameters,
    ) -> impl Iterator<Item = Result<Event, Error>> + '_ {
        gen_events(self, self.root(), parameters)
    }

    /// Lazily generate the events describing a single node and its
    /// descendants.
    ///
    /// Unlike the elements below it, the node's element is not compared
    /// against its parent's namespaces: it starts a scope for every namespace
    /// that is in scope at it, inherited ones included, so the events stand
    /// on their own. Document-level processing instructions are only
    /// included if `node` is the root element.
    pub fn node_events(
        &self,
        node: Node,
        parameters: Parameters,
    ) -> impl Iterator<Item = Result<Event, Error>> + '_ {
        gen_events(self, Some(node), parameters)
    }

    /// Send the events describing the whole document to a handler.
    ///
    /// ```rust
    /// use saxtree::{Name, Tree, TreeBuilder};
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.new_root_element(
    ///     Name::ns("urn:a", "doc"),
    ///     [],
    ///     [(Some("p".to_string()), "urn:a".to_string())],
    /// )?;
    /// tree.append_element(root, Name::ns("urn:a", "child"), [], [])?;
    ///
    /// let mut builder = TreeBuilder::new();
    /// tree.saxify(&mut builder)?;
    /// let copy = builder.into_tree();
    /// assert_eq!(copy.to_fixed()?, tree.to_fixed()?);
    /// # Ok::<(), saxtree::Error>(())
    /// ```
    pub fn saxify<H: ContentHandler + ?Sized>(&self, handler: &mut H) -> Result<(), Error> {
        self.saxify_with(handler, Parameters::default())
    }

    /// Send the events describing the whole document to a handler, with
    /// explicit parameters.
    pub fn saxify_with<H: ContentHandler + ?Sized>(
        &self,
        handler: &mut H,
        parameters: Parameters,
    ) -> Result<(), Error> {
        dispatch_all(self.events_with(parameters), handler)
    }

    /// Send the events describing a node and its descendants to a handler.
    ///
    /// See [`Tree::node_events`] for how namespaces in scope at `node` are
    /// declared.
    pub fn saxify_node<H: ContentHandler + ?Sized>(
        &self,
        node: Node,
        handler: &mut H,
        parameters: Parameters,
    ) -> Result<(), Error> {
        dispatch_all(self.node_events(node, parameters), handler)
    }
}

fn dispatch_all<H: ContentHandler + ?Sized>(
    events: impl Iterator<Item = Result<Event, Error>>,
    handler: &mut H,
) -> Result<(), Error> {
    for event in events {
        let event = event?;
        log::trace!("emit {}", event);
        event.dispatch(handler)?;
    }
    Ok(())
}
