//! Proptest support
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. This module lets you generate an arbitrary document
//! that survives a trip through events and back.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! saxtree = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use ahash::HashSet;
use proptest::prelude::*;

use crate::fixed::{Content, Document, DocumentContent, Element, ProcessingInstruction};
use crate::name::Name;
use crate::namespace::Namespaces;
use crate::xmlvalue::Attributes;

const NAMESPACES: &[&str] = &["", "http://example.com/x", "http://example.com/y"];
// the default prefix is left out: an unprefixed element without a namespace
// cannot be told apart from one in the default namespace
const PREFIXES: &[&str] = &["x", "y", "z"];
const ELEMENT_NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const ATTRIBUTE_NAMES: &[&str] = &["q", "r", "s"];
const PI_NAMES: &[&str] = &["pi1", "pi2", "pi3", "pi4", "pi5"];
const TEXT: &str = "[a-z \u{000a}<>&]{1,8}";

fn name(namespace: &str, local: &str) -> Name {
    Name::with_namespace(Some(namespace).filter(|ns| !ns.is_empty()), local)
}

fn arb_attribute() -> impl Strategy<Value = (Name, String)> {
    (
        prop::sample::select(ATTRIBUTE_NAMES),
        prop::sample::select(NAMESPACES),
        "[a-z ]{0,6}",
    )
        .prop_map(|(local, namespace, value)| (name(namespace, local), value))
}

fn arb_prefix() -> impl Strategy<Value = (Option<String>, String)> {
    (
        prop::sample::select(PREFIXES),
        prop::sample::select(&NAMESPACES[1..]),
    )
        .prop_map(|(prefix, namespace)| (Some(prefix.to_string()), namespace.to_string()))
}

fn arb_processing_instruction() -> impl Strategy<Value = ProcessingInstruction> {
    (
        prop::sample::select(PI_NAMES),
        prop::option::of("[a-z]{1,6}"),
    )
        .prop_map(|(target, data)| ProcessingInstruction {
            target: target.to_string(),
            data,
        })
}

fn unduplicate_prefixes(prefixes: Vec<(Option<String>, String)>) -> Namespaces {
    let mut seen = HashSet::default();
    prefixes
        .into_iter()
        .filter(|(prefix, _)| seen.insert(prefix.clone()))
        .collect()
}

fn element(
    local: &str,
    namespace: &str,
    attributes: Vec<(Name, String)>,
    prefixes: Vec<(Option<String>, String)>,
    children: Vec<Content>,
) -> Element {
    Element {
        name: name(namespace, local),
        prefixes: unduplicate_prefixes(prefixes),
        attributes: attributes.into_iter().collect::<Attributes>(),
        children,
    }
}

// comments are left out: their text never becomes an event
fn arb_content() -> impl Strategy<Value = Content> {
    let leaf = prop_oneof![
        TEXT.prop_map(Content::Text),
        arb_processing_instruction().prop_map(Content::ProcessingInstruction),
    ];

    leaf.prop_recursive(
        6,   // levels deep
        128, // maximum size of 128 nodes
        6,   // up to 6 items per collection
        |inner| {
            (
                prop::sample::select(ELEMENT_NAMES),
                prop::sample::select(NAMESPACES),
                prop::collection::vec(arb_attribute(), 0..3),
                prop::collection::vec(arb_prefix(), 0..3),
                prop::collection::vec(inner, 0..6),
            )
                .prop_map(|(local, namespace, attributes, prefixes, children)| {
                    Content::Element(element(local, namespace, attributes, prefixes, children))
                })
        },
    )
}

prop_compose! {
    fn arb_document_element()(local in prop::sample::select(ELEMENT_NAMES),
                              namespace in prop::sample::select(NAMESPACES),
                              attributes in prop::collection::vec(arb_attribute(), 0..3),
                              prefixes in prop::collection::vec(arb_prefix(), 0..3),
                              children in prop::collection::vec(arb_content(), 0..6)) -> Element {
        element(local, namespace, attributes, prefixes, children)
    }
}

fn arb_document_content() -> impl Strategy<Value = DocumentContent> {
    prop_oneof![
        "[a-z ]{0,6}".prop_map(DocumentContent::Comment),
        arb_processing_instruction().prop_map(DocumentContent::ProcessingInstruction),
    ]
}

/// Generate a random document.
///
/// Turn it into a tree with [`Document::to_tree`]. Namespaces may be used
/// without a prefix bound to them; call
/// [`Tree::create_missing_prefixes`](crate::Tree::create_missing_prefixes)
/// on the root element before emitting events.
///
/// Example:
///
/// ```notrust
/// use proptest::prelude::*;
/// use saxtree::proptest::arb_document;
/// use saxtree::TreeBuilder;
///
/// proptest! {
///   #[test]
///   fn test_events_build_a_tree(document in arb_document()) {
///     let mut tree = document.to_tree().unwrap();
///     let root = tree.root().unwrap();
///     tree.create_missing_prefixes(root).unwrap();
///     let mut builder = TreeBuilder::new();
///     prop_assert!(tree.saxify(&mut builder).is_ok());
///   }
/// }
/// ```
pub fn arb_document() -> impl Strategy<Value = Document> {
    (
        prop::collection::vec(arb_document_content(), 0..4),
        arb_document_element(),
        prop::collection::vec(arb_document_content(), 0..4),
    )
        .prop_map(|(before, document_element, after)| Document {
            before,
            document_element,
            after,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::handler::Event;
    use crate::tree::Tree;

    fn rebuild(tree: &Tree) -> Tree {
        let mut builder = TreeBuilder::new();
        tree.saxify(&mut builder).unwrap();
        builder.into_tree()
    }

    // every scope start is closed by an end for the same prefix, in LIFO
    // order, and scopes never cross element boundaries
    fn check_scope_pairing(events: &[Event]) -> Result<(), String> {
        let mut open: Vec<Vec<Option<String>>> = vec![Vec::new()];
        for event in events {
            match event {
                Event::StartPrefixMapping { prefix, .. } => {
                    open.last_mut()
                        .ok_or("scope start outside element")?
                        .push(prefix.clone());
                }
                Event::StartElement { .. } => open.push(Vec::new()),
                Event::EndElement { .. } => {
                    let inner = open.pop().ok_or("unbalanced element end")?;
                    if !inner.is_empty() {
                        return Err(format!("scopes left open inside element: {:?}", inner));
                    }
                }
                Event::EndPrefixMapping { prefix } => {
                    let current = open.last_mut().ok_or("scope end outside element")?;
                    match current.pop() {
                        Some(expected) if &expected == prefix => {}
                        other => {
                            return Err(format!("scope end {:?}, expected {:?}", prefix, other));
                        }
                    }
                }
                _ => {}
            }
        }
        match open.as_slice() {
            [outer] if outer.is_empty() => Ok(()),
            _ => Err(format!("unclosed scopes: {:?}", open)),
        }
    }

    // what survives a trip through events: document-level comments and the
    // instructions beyond them are not emitted, and neither are
    // declarations that repeat an inherited binding
    fn emitted_part(mut document: Document) -> Document {
        if let Some(last) = document
            .before
            .iter()
            .rposition(|content| matches!(content, DocumentContent::Comment(_)))
        {
            document.before.drain(..=last);
        }
        if let Some(first) = document
            .after
            .iter()
            .position(|content| matches!(content, DocumentContent::Comment(_)))
        {
            document.after.truncate(first);
        }
        drop_redundant_prefixes(&mut document.document_element, &Namespaces::new());
        document
    }

    fn drop_redundant_prefixes(element: &mut Element, inherited: &Namespaces) {
        let mut in_scope = inherited.clone();
        in_scope.extend(element.prefixes.clone());
        element
            .prefixes
            .retain(|prefix, uri| inherited.get(prefix) != Some(&*uri));
        for child in &mut element.children {
            if let Content::Element(child) = child {
                drop_redundant_prefixes(child, &in_scope);
            }
        }
    }

    proptest! {
        #[test]
        fn test_arb_document_roundtrip(document in arb_document()) {
            let mut tree = document.to_tree().unwrap();
            let root = tree.root().unwrap();
            tree.create_missing_prefixes(root).unwrap();

            let events = tree.events().collect::<Result<Vec<_>, _>>().unwrap();
            prop_assert_eq!(check_scope_pairing(&events), Ok(()));

            let copy = rebuild(&tree);
            let copied_events = copy.events().collect::<Result<Vec<_>, _>>().unwrap();
            prop_assert_eq!(&copied_events, &events);
        }
    }

    proptest! {
        #[test]
        fn test_arb_document_is_a_fixed_point(document in arb_document()) {
            let mut tree = document.to_tree().unwrap();
            let root = tree.root().unwrap();
            tree.create_missing_prefixes(root).unwrap();

            let once = rebuild(&tree);
            let twice = rebuild(&once);
            prop_assert_eq!(once.to_fixed().unwrap(), twice.to_fixed().unwrap());
        }
    }

    proptest! {
        #[test]
        fn test_arb_document_rebuilds_the_tree(document in arb_document()) {
            let mut tree = document.to_tree().unwrap();
            let root = tree.root().unwrap();
            tree.create_missing_prefixes(root).unwrap();

            let expected = emitted_part(tree.to_fixed().unwrap());
            prop_assert_eq!(rebuild(&tree).to_fixed().unwrap(), expected);
        }
    }
}
