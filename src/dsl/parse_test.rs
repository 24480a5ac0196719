
use super::*;
use crate::dsl::StyleHint;

#[test]
fn minimal_document() {
    let doc = parse("flow\n[start] Begin\n[end] Done\nBegin -> Done").expect("parse");
    assert_eq!(doc.direction, Direction::TopBottom);
    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(doc.edges.len(), 1);
    assert_eq!(doc.nodes[0].declared_id, "Begin");
    assert_eq!(doc.edges[0].source, "Begin");
    assert_eq!(doc.edges[0].target, "Done");
}

#[test]
fn direction_header_is_honored() {
    let doc = parse("flow\ndirection LR\n[start] A").expect("parse");
    assert_eq!(doc.direction, Direction::LeftRight);
}

#[test]
fn direction_keywords_are_case_sensitive() {
    let err = parse("flow\ndirection tb").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { line: 2, .. }));
}

#[test]
fn implicit_id_is_label_verbatim() {
    let doc = parse("[process] User enters credentials").expect("parse");
    assert_eq!(doc.nodes[0].declared_id, "User enters credentials");
    assert_eq!(doc.nodes[0].label, "User enters credentials");
}

#[test]
fn node_after_edge_is_ordering_error() {
    let input = "flow\n[start] A\n[end] B\nA -> B\n[process] C";
    let err = parse(input).unwrap_err();
    assert!(matches!(err, ParseError::Ordering { line: 5 }));
    assert_eq!(err.error_code(), "E_ORDERING");
}

#[test]
fn duplicate_explicit_id_is_fatal() {
    let input = "[process] a: First\n[process] a: Second";
    let err = parse(input).unwrap_err();
    match err {
        ParseError::DuplicateId { id, line, first_line } => {
            assert_eq!(id, "a");
            assert_eq!(line, 2);
            assert_eq!(first_line, 1);
        }
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn implicit_and_explicit_ids_share_a_namespace() {
    // Line 1 declares implicit id "Login"; line 2 collides explicitly.
    let input = "[process] Login\n[browser] Login: Login page";
    let err = parse(input).unwrap_err();
    assert!(matches!(err, ParseError::DuplicateId { line: 2, first_line: 1, .. }));
    assert_eq!(err.error_code(), "E_DUPLICATE_ID");
}

#[test]
fn duplicate_ids_differing_in_case_are_distinct() {
    // Declared ids are case-sensitive; only reconciliation folds case.
    let doc = parse("[process] login\n[process] Login").expect("parse");
    assert_eq!(doc.nodes.len(), 2);
}

#[test]
fn unknown_type_normalizes_to_process() {
    let doc = parse("[cloud] Storage\n[decision] Check").expect("parse");
    assert_eq!(doc.nodes[0].kind, "process");
    assert_eq!(doc.nodes[1].kind, "decision");
}

#[test]
fn all_known_types_survive() {
    for kind in KNOWN_NODE_TYPES {
        let doc = parse(&format!("[{kind}] X")).expect("parse");
        assert_eq!(doc.nodes[0].kind, *kind);
    }
}

#[test]
fn empty_input_is_an_empty_document() {
    let doc = parse("").expect("parse");
    assert!(doc.nodes.is_empty());
    assert!(doc.edges.is_empty());

    let doc = parse("# only a comment\n\n").expect("parse");
    assert!(doc.nodes.is_empty());
}

#[test]
fn edges_may_reference_undeclared_ids() {
    // Reference checking happens downstream, not in the parser.
    let doc = parse("[start] A\nA -> Ghost").expect("parse");
    assert_eq!(doc.edges.len(), 1);
    assert_eq!(doc.edges[0].target, "Ghost");
}

#[test]
fn edge_metadata_is_carried_through() {
    let input = "[decision] Check\n[process] Ship\nCheck ->|yes| Ship {dashed, animated}";
    let doc = parse(input).expect("parse");
    let edge = &doc.edges[0];
    assert_eq!(edge.label.as_deref(), Some("yes"));
    assert_eq!(edge.style_hint, Some(StyleHint::Dashed));
    assert!(edge.animated);
    assert_eq!(edge.line, 3);
}
