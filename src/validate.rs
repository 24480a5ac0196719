//! Edge reference validation.
//!
//! Walks every edge declaration and confirms both endpoints match a declared
//! node id. Unresolvable references are non-fatal: the edge is dropped and a
//! warning is recorded, and parsing of the rest of the document stands. An
//! all-nodes, no-edges document is legal.

use std::collections::HashSet;

use tracing::warn;

use crate::dsl::{Document, EdgeDecl};

/// A non-fatal record of an edge that referenced an undeclared node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub source: String,
    pub target: String,
    /// The endpoint that failed to resolve (the source, if both did).
    pub missing: String,
    pub line: usize,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: edge {} -> {} references undeclared node {:?}",
            self.line, self.source, self.target, self.missing
        )
    }
}

/// Result of reference checking: the surviving edges plus warnings for the
/// dropped ones.
#[derive(Debug)]
pub struct Validated {
    pub edges: Vec<EdgeDecl>,
    pub dropped: Vec<DanglingReference>,
}

/// Filter edges down to those whose endpoints both resolve to declared ids.
#[must_use]
pub fn check_references(document: &Document) -> Validated {
    let declared: HashSet<&str> = document
        .nodes
        .iter()
        .map(|n| n.declared_id.as_str())
        .collect();

    let mut edges = Vec::with_capacity(document.edges.len());
    let mut dropped = Vec::new();

    for edge in &document.edges {
        let missing = if !declared.contains(edge.source.as_str()) {
            Some(&edge.source)
        } else if !declared.contains(edge.target.as_str()) {
            Some(&edge.target)
        } else {
            None
        };

        match missing {
            None => edges.push(edge.clone()),
            Some(missing) => {
                let reference = DanglingReference {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    missing: missing.clone(),
                    line: edge.line,
                };
                warn!(%reference, "validate: dropping edge with dangling reference");
                dropped.push(reference);
            }
        }
    }

    Validated { edges, dropped }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
