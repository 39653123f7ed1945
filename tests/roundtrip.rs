use rstest::rstest;

use saxtree::fixed::{Content, Document, DocumentContent, Element, ProcessingInstruction};
use saxtree::{Name, Namespaces, Tree, TreeBuilder};

fn el(name: &str, prefixes: &[(Option<&str>, &str)], children: Vec<Content>) -> Element {
    el_attr(name, prefixes, &[], children)
}

fn el_attr(
    name: &str,
    prefixes: &[(Option<&str>, &str)],
    attributes: &[(&str, &str)],
    children: Vec<Content>,
) -> Element {
    Element {
        name: Name::from(name),
        prefixes: prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.map(str::to_string), uri.to_string()))
            .collect::<Namespaces>(),
        attributes: attributes
            .iter()
            .map(|(name, value)| (Name::from(*name), value.to_string()))
            .collect(),
        children,
    }
}

fn text(text: &str) -> Content {
    Content::Text(text.to_string())
}

fn pi(target: &str, data: Option<&str>) -> ProcessingInstruction {
    ProcessingInstruction {
        target: target.to_string(),
        data: data.map(str::to_string),
    }
}

fn doc(document_element: Element) -> Document {
    Document {
        before: vec![],
        document_element,
        after: vec![],
    }
}

fn rebuild(tree: &Tree) -> Tree {
    let mut builder = TreeBuilder::new();
    tree.saxify(&mut builder).unwrap();
    builder.into_tree()
}

#[rstest]
#[case::plain(doc(el(
    "root",
    &[],
    vec![
        Content::Element(el("a", &[], vec![text("1")])),
        Content::Element(el("b", &[], vec![text("2")])),
    ]
)))]
#[case::prefixed(doc(el(
    "{http://example.com}root",
    &[(Some("foo"), "http://example.com")],
    vec![
        Content::Element(el("{http://example.com}a", &[], vec![text("1")])),
        Content::Element(el("{http://example.com}b", &[], vec![text("2")])),
    ]
)))]
#[case::some_prefixed(doc(el(
    "root",
    &[(Some("foo"), "http://example.com")],
    vec![
        Content::Element(el("a", &[], vec![text("1")])),
        Content::Element(el("{http://example.com}b", &[], vec![text("2")])),
    ]
)))]
#[case::default_namespace(doc(el(
    "{http://example.com}root",
    &[(None, "http://example.com")],
    vec![
        Content::Element(el("{http://example.com}a", &[], vec![text("1")])),
        Content::Element(el("{http://example.com}b", &[], vec![])),
    ]
)))]
#[case::rebound_prefix(doc(el(
    "{urn:outer}root",
    &[(Some("p"), "urn:outer")],
    vec![Content::Element(el(
        "{urn:inner}a",
        &[(Some("p"), "urn:inner")],
        vec![Content::Element(el("{urn:inner}b", &[], vec![]))]
    ))]
)))]
#[case::two_prefixes_one_namespace(doc(el_attr(
    "{urn:a}root",
    &[(None, "urn:a"), (Some("p"), "urn:a")],
    &[("{urn:a}attr", "value"), ("plain", "other")],
    vec![]
)))]
#[case::mixed_content(doc(el(
    "root",
    &[],
    vec![
        text("before"),
        Content::Element(el("a", &[], vec![])),
        text("between"),
        Content::ProcessingInstruction(pi("inner", Some("data"))),
        text("after"),
    ]
)))]
#[case::document_siblings(Document {
    before: vec![
        DocumentContent::ProcessingInstruction(pi("x", None)),
        DocumentContent::ProcessingInstruction(pi("y", Some("data"))),
    ],
    document_element: el("root", &[], vec![]),
    after: vec![DocumentContent::ProcessingInstruction(pi("z", None))],
})]
fn test_roundtrip(#[case] document: Document) {
    let tree = document.to_tree().unwrap();
    let copy = rebuild(&tree);
    assert_eq!(copy.to_fixed().unwrap(), document);
}

#[test]
fn test_roundtrip_is_stable() {
    let document = doc(el(
        "{urn:a}root",
        &[(Some("z"), "urn:a"), (Some("b"), "urn:b")],
        vec![Content::Element(el(
            "{urn:b}child",
            &[(Some("a"), "urn:b")],
            vec![text("content")],
        ))],
    ));
    let tree = document.to_tree().unwrap();
    let first = tree.events().collect::<Result<Vec<_>, _>>().unwrap();
    let second = rebuild(&tree)
        .events()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(first, second);
}
