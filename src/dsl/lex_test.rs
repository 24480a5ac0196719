
use super::*;

fn single(input: &str) -> Token {
    let lines = tokenize(input).expect("tokenize");
    assert_eq!(lines.len(), 1, "expected exactly one classified line");
    lines.into_iter().next().unwrap().token
}

#[test]
fn header_and_direction() {
    let lines = tokenize("flow\ndirection LR").expect("tokenize");
    assert_eq!(lines[0].token, Token::Flow);
    assert_eq!(lines[0].number, 1);
    assert_eq!(lines[1].token, Token::Direction(Direction::LeftRight));
    assert_eq!(lines[1].number, 2);
}

#[test]
fn comments_and_blanks_are_skipped() {
    let lines = tokenize("# header comment\n\nflow\n   \n# trailing").expect("tokenize");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].number, 3);
}

#[test]
fn line_numbers_survive_skipped_lines() {
    let lines = tokenize("# one\n\n[start] A\n\nA -> A").expect("tokenize");
    assert_eq!(lines[0].number, 3);
    assert_eq!(lines[1].number, 5);
}

#[test]
fn node_with_implicit_id() {
    let token = single("[process] Login");
    assert_eq!(
        token,
        Token::Node { kind: "process".into(), id: None, label: "Login".into(), sub_label: None }
    );
}

#[test]
fn node_with_explicit_id() {
    let token = single("[process] login_step: User enters credentials");
    assert_eq!(
        token,
        Token::Node {
            kind: "process".into(),
            id: Some("login_step".into()),
            label: "User enters credentials".into(),
            sub_label: None,
        }
    );
}

#[test]
fn node_with_sub_label() {
    let token = single("[system] db: Database | PostgreSQL 16");
    assert_eq!(
        token,
        Token::Node {
            kind: "system".into(),
            id: Some("db".into()),
            label: "Database".into(),
            sub_label: Some("PostgreSQL 16".into()),
        }
    );
}

#[test]
fn node_errors() {
    assert!(matches!(tokenize("[process Login"), Err(ParseError::Syntax { line: 1, .. })));
    assert!(matches!(tokenize("[process]"), Err(ParseError::Syntax { line: 1, .. })));
    assert!(matches!(tokenize("[process] : no id"), Err(ParseError::Syntax { line: 1, .. })));
}

#[test]
fn plain_edge() {
    let token = single("Login -> Dashboard");
    assert_eq!(
        token,
        Token::Edge {
            source: "Login".into(),
            target: "Dashboard".into(),
            label: None,
            style_hint: None,
            animated: false,
        }
    );
}

#[test]
fn labeled_edge() {
    let token = single("Check -> |yes| Ship");
    // Pipe label sits directly after the arrow, whitespace-tolerant.
    let token2 = single("Check ->|yes| Ship");
    assert_eq!(token, token2);
    assert_eq!(
        token,
        Token::Edge {
            source: "Check".into(),
            target: "Ship".into(),
            label: Some("yes".into()),
            style_hint: None,
            animated: false,
        }
    );
}

#[test]
fn edge_attribute_block() {
    let token = single("A -> B {dashed, animated}");
    assert_eq!(
        token,
        Token::Edge {
            source: "A".into(),
            target: "B".into(),
            label: None,
            style_hint: Some(StyleHint::Dashed),
            animated: true,
        }
    );
}

#[test]
fn unknown_attributes_are_ignored() {
    let token = single("A -> B {sparkly, straight}");
    assert_eq!(
        token,
        Token::Edge {
            source: "A".into(),
            target: "B".into(),
            label: None,
            style_hint: Some(StyleHint::Straight),
            animated: false,
        }
    );
}

#[test]
fn edge_errors() {
    assert!(matches!(tokenize("A ->"), Err(ParseError::Syntax { line: 1, .. })));
    assert!(matches!(tokenize("-> B"), Err(ParseError::Syntax { line: 1, .. })));
    assert!(matches!(tokenize("A ->|never closed B"), Err(ParseError::Syntax { line: 1, .. })));
}

#[test]
fn unknown_direction_is_rejected() {
    let err = tokenize("direction UP").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
}

#[test]
fn unrecognized_line_is_rejected() {
    let err = tokenize("flow\nthis is not a thing").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { line: 2, .. }));
}
