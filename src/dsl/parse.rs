//! Forward-pass parser for the flow DSL.
//!
//! DESIGN
//! ======
//! One pass over the classified lines, strictly two-phase: all node
//! declarations must precede all edge declarations. The first node line seen
//! after an edge line is a fatal ordering error. Implicit node ids (label
//! doubles as id) and explicit ids share one namespace; any collision is
//! fatal rather than silently overwriting the earlier declaration.

use std::collections::HashMap;

use super::ast::{Direction, Document, EdgeDecl, NodeDecl};
use super::lex::{self, Token};
use crate::error::ErrorCode;

/// Node types the DSL knows about. Anything else is advisory and normalizes
/// to `process`.
const KNOWN_NODE_TYPES: &[&str] = &[
    "start", "end", "process", "decision", "system", "note", "section",
    "browser", "mobile", "button", "input", "icon", "image",
];

const DEFAULT_NODE_TYPE: &str = "process";

/// Fatal parse failures. Any of these aborts the whole pipeline run before
/// the canvas is touched.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A line matched no grammar production.
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A node declaration appeared after the first edge declaration.
    #[error("line {line}: node declared after edges (declare all nodes before any edge)")]
    Ordering { line: usize },

    /// Two node declarations resolved to the same identifier.
    #[error("line {line}: duplicate node id {id:?} (first declared on line {first_line})")]
    DuplicateId { id: String, line: usize, first_line: usize },
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "E_SYNTAX",
            Self::Ordering { .. } => "E_ORDERING",
            Self::DuplicateId { .. } => "E_DUPLICATE_ID",
        }
    }
}

/// Parse DSL text (already unwrapped from any code fence) into a [`Document`].
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed lines, a node declaration after
/// the first edge, or colliding node identifiers.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let lines = lex::tokenize(input)?;

    let mut direction = Direction::default();
    let mut nodes: Vec<NodeDecl> = Vec::new();
    let mut edges: Vec<EdgeDecl> = Vec::new();
    let mut declared: HashMap<String, usize> = HashMap::new();
    let mut seen_edge = false;

    for line in lines {
        match line.token {
            Token::Flow => {}
            Token::Direction(dir) => direction = dir,
            Token::Node { kind, id, label, sub_label } => {
                if seen_edge {
                    return Err(ParseError::Ordering { line: line.number });
                }
                // Implicit id: the label text itself, verbatim.
                let declared_id = id.unwrap_or_else(|| label.clone());
                if let Some(&first_line) = declared.get(&declared_id) {
                    return Err(ParseError::DuplicateId {
                        id: declared_id,
                        line: line.number,
                        first_line,
                    });
                }
                declared.insert(declared_id.clone(), line.number);
                nodes.push(NodeDecl {
                    declared_id,
                    kind: normalize_type(&kind),
                    label,
                    sub_label,
                    line: line.number,
                });
            }
            Token::Edge { source, target, label, style_hint, animated } => {
                seen_edge = true;
                edges.push(EdgeDecl {
                    source,
                    target,
                    label,
                    style_hint,
                    animated,
                    line: line.number,
                });
            }
        }
    }

    Ok(Document { direction, nodes, edges })
}

/// Unknown node types are accepted and normalized rather than rejected —
/// type checking is advisory, not structural.
fn normalize_type(raw: &str) -> String {
    if KNOWN_NODE_TYPES.contains(&raw) {
        raw.to_owned()
    } else {
        DEFAULT_NODE_TYPE.to_owned()
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
