use insta::assert_snapshot;

use saxtree::emit::Parameters;
use saxtree::{Error, Event, Name, Tree};

fn prefixes(pairs: &[(Option<&str>, &str)]) -> Vec<(Option<String>, String)> {
    pairs
        .iter()
        .map(|(prefix, uri)| (prefix.map(str::to_string), uri.to_string()))
        .collect()
}

fn render(tree: &Tree) -> String {
    let mut events: Vec<Event> = Vec::new();
    tree.saxify(&mut events).unwrap();
    events
        .iter()
        .map(|event| event.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_attribute_avoids_default_prefix() {
    let mut tree = Tree::new();
    tree.new_root_element(
        Name::ns("urn:a", "doc"),
        [(Name::ns("urn:a", "name"), "value".to_string())],
        prefixes(&[(None, "urn:a"), (Some("p"), "urn:a")]),
    )
    .unwrap();
    assert_snapshot!(render(&tree), @r###"
    start-document
    start-prefix-mapping #default urn:a
    start-prefix-mapping p urn:a
    start-element {urn:a}doc doc p:name="value"
    end-element {urn:a}doc doc
    end-prefix-mapping p
    end-prefix-mapping #default
    end-document
    "###);
}

#[test]
fn test_attribute_uses_default_prefix_as_last_resort() {
    let mut tree = Tree::new();
    tree.new_root_element(
        Name::ns("urn:a", "doc"),
        [(Name::ns("urn:a", "name"), "value".to_string())],
        prefixes(&[(None, "urn:a")]),
    )
    .unwrap();
    let events = tree.events().collect::<Result<Vec<_>, _>>().unwrap();
    match &events[2] {
        Event::StartElement { attributes, .. } => assert_eq!(attributes[0].qname, "name"),
        event => panic!("unexpected event {}", event),
    }
}

#[test]
fn test_element_prefers_recorded_prefix() {
    let mut tree = Tree::new();
    let root = tree
        .new_root_element(
            Name::ns("urn:a", "doc"),
            [],
            prefixes(&[(Some("a"), "urn:a"), (Some("b"), "urn:a")]),
        )
        .unwrap();
    let child = tree
        .append_element(root, Name::ns("urn:a", "child"), [], [])
        .unwrap();
    tree.element_mut(child)
        .unwrap()
        .set_preferred_prefix(Some("b"));
    // a recorded prefix that isn't bound falls back to the sorted scan
    tree.element_mut(root)
        .unwrap()
        .set_preferred_prefix(Some("unbound"));
    assert_snapshot!(render(&tree), @r###"
    start-document
    start-prefix-mapping a urn:a
    start-prefix-mapping b urn:a
    start-element {urn:a}doc a:doc
    start-element {urn:a}child b:child
    end-element {urn:a}child b:child
    end-element {urn:a}doc a:doc
    end-prefix-mapping b
    end-prefix-mapping a
    end-document
    "###);
}

#[test]
fn test_mixed_content() {
    let mut tree = Tree::new();
    let root = tree.new_root_element(Name::new("p"), [], []).unwrap();
    tree.set_text(root, Some("Hello ")).unwrap();
    let em = tree.append_element(root, Name::new("em"), [], []).unwrap();
    tree.set_text(em, Some("world")).unwrap();
    tree.set_tail(em, Some("!")).unwrap();
    let comment = tree.new_comment("not emitted");
    tree.append(root, comment).unwrap();
    tree.set_tail(comment, Some(" bye")).unwrap();
    let pi = tree.new_processing_instruction("target", Some("data"));
    tree.append(root, pi).unwrap();
    tree.set_tail(pi, Some("")).unwrap();
    assert_snapshot!(render(&tree), @r###"
    start-document
    start-element p p
    characters "Hello "
    start-element em em
    characters "world"
    end-element em em
    characters "!"
    characters " bye"
    processing-instruction target "data"
    end-element p p
    end-document
    "###);
}

#[test]
fn test_document_level_processing_instructions() {
    let mut tree = Tree::new();
    let root = tree.new_root_element(Name::new("doc"), [], []).unwrap();
    let x = tree.new_processing_instruction("x", None);
    let y = tree.new_processing_instruction("y", None);
    let z = tree.new_processing_instruction("z", None);
    let comment = tree.new_comment("stop");
    let hidden = tree.new_processing_instruction("hidden", None);
    tree.insert_before(root, y).unwrap();
    tree.insert_before(y, x).unwrap();
    tree.insert_before(x, comment).unwrap();
    tree.insert_before(comment, hidden).unwrap();
    tree.append_to_document(z).unwrap();
    assert_snapshot!(render(&tree), @r###"
    start-document
    processing-instruction x
    processing-instruction y
    start-element doc doc
    end-element doc doc
    processing-instruction z
    end-document
    "###);
}

#[test]
fn test_parameters() {
    let mut tree = Tree::new();
    let root = tree.new_root_element(Name::new("doc"), [], []).unwrap();
    let pi = tree.new_processing_instruction("pi", None);
    tree.insert_before(root, pi).unwrap();
    let events = tree
        .events_with(Parameters {
            document_events: false,
            root_siblings: false,
        })
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        events,
        vec![
            Event::StartElement {
                name: Name::new("doc"),
                qname: "doc".to_string(),
                attributes: vec![],
            },
            Event::EndElement {
                name: Name::new("doc"),
                qname: "doc".to_string(),
            },
        ]
    );
}

#[test]
fn test_unresolvable_namespace() {
    let mut tree = Tree::new();
    tree.new_root_element(
        Name::new("doc"),
        [(Name::ns("urn:unbound", "attr"), "value".to_string())],
        [],
    )
    .unwrap();
    let mut events: Vec<Event> = Vec::new();
    let err = tree.saxify(&mut events).unwrap_err();
    assert!(matches!(err, Error::UnresolvableNamespace(ref uri) if uri == "urn:unbound"));
    // nothing is emitted for the element that failed
    assert_eq!(events, vec![Event::StartDocument]);
}

#[test]
fn test_create_missing_prefixes_makes_emission_succeed() {
    let mut tree = Tree::new();
    let root = tree
        .new_root_element(
            Name::ns("urn:a", "doc"),
            [(Name::ns("urn:b", "attr"), "value".to_string())],
            [],
        )
        .unwrap();
    tree.append_element(root, Name::ns("urn:c", "child"), [], [])
        .unwrap();
    tree.create_missing_prefixes(root).unwrap();
    assert_snapshot!(render(&tree), @r###"
    start-document
    start-prefix-mapping n0 urn:a
    start-prefix-mapping n1 urn:b
    start-prefix-mapping n2 urn:c
    start-element {urn:a}doc n0:doc n1:attr="value"
    start-element {urn:c}child n2:child
    end-element {urn:c}child n2:child
    end-element {urn:a}doc n0:doc
    end-prefix-mapping n2
    end-prefix-mapping n1
    end-prefix-mapping n0
    end-document
    "###);
}

#[test]
fn test_saxify_node_declares_namespaces_in_scope() {
    let mut tree = Tree::new();
    let root = tree
        .new_root_element(
            Name::ns("urn:a", "doc"),
            [],
            prefixes(&[(None, "urn:a"), (Some("p"), "urn:p")]),
        )
        .unwrap();
    let child = tree
        .append_element(root, Name::ns("urn:a", "child"), [], [])
        .unwrap();
    tree.set_tail(child, Some("tail")).unwrap();
    let mut events: Vec<Event> = Vec::new();
    tree.saxify_node(
        child,
        &mut events,
        Parameters {
            document_events: false,
            ..Default::default()
        },
    )
    .unwrap();
    let rendered = events
        .iter()
        .map(|event| event.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!(rendered, @r###"
    start-prefix-mapping #default urn:a
    start-prefix-mapping p urn:p
    start-element {urn:a}child child
    end-element {urn:a}child child
    end-prefix-mapping p
    end-prefix-mapping #default
    characters "tail"
    "###);
}
