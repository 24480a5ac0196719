//! Reconciliation — mapping parsed nodes onto stable canvas identities.
//!
//! DESIGN
//! ======
//! A regeneration must not discard the identity of nodes the user already
//! has on the canvas: a node whose label still matches keeps its canonical
//! id, so positions, styling, and anything else keyed by id survive. The
//! match is by label, case-insensitive, against an index built once per run
//! from the snapshot taken at pipeline start. When the live canvas has
//! duplicate labels the first one (snapshot order) wins — an explicit
//! tie-break, not an artifact of map insertion order.
//!
//! The mapping is label-driven on the declared side too: two declarations
//! with distinct ids but the same label resolve to the same canonical id,
//! and the consumer sees last-writer-wins between them. The parser only
//! rejects duplicate declared ids, not duplicate labels.
//!
//! Edge identifiers are derived from `(source, target, sequence)` so two
//! regenerations in the same instant can never collide; wall-clock ids are
//! deliberately avoided here.

use std::collections::HashMap;

use tracing::debug;

use crate::dsl::{EdgeDecl, NodeDecl, StyleHint};
use crate::graph::Node;

/// A parsed node resolved to its canonical identifier.
#[derive(Debug, Clone)]
pub struct ReconciledNode {
    /// Canonical id: an existing live node's id on a label match, otherwise
    /// the declared id (the node will be created under it).
    pub id: String,
    pub kind: String,
    pub label: String,
    pub sub_label: Option<String>,
    /// `true` when no live node matched and this one will be created.
    pub is_new: bool,
}

/// An edge rewritten through the identity map, with its final id assigned.
#[derive(Debug, Clone)]
pub struct ReconciledEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub style_hint: Option<StyleHint>,
    pub animated: bool,
}

/// Output of one reconciliation pass.
#[derive(Debug)]
pub struct Reconciled {
    pub nodes: Vec<ReconciledNode>,
    pub edges: Vec<ReconciledEdge>,
    /// Transient `declared_id -> canonical_id` table; never persisted.
    pub identity: HashMap<String, String>,
}

/// Map every parsed node onto an existing canvas identity where the label
/// matches, and rewrite edges through the resulting map.
///
/// Every surviving edge's endpoints were validated against declared ids, and
/// every declared id receives a map entry, so this step cannot introduce a
/// dangling edge.
#[must_use]
pub fn reconcile(nodes: &[NodeDecl], edges: &[EdgeDecl], live: &[Node]) -> Reconciled {
    let index = label_index(live);

    let mut identity = HashMap::with_capacity(nodes.len());
    let mut out_nodes = Vec::with_capacity(nodes.len());

    for decl in nodes {
        let existing = index.get(decl.label.to_lowercase().as_str());
        let (canonical, is_new) = match existing {
            Some(id) => ((*id).to_owned(), false),
            None => (decl.declared_id.clone(), true),
        };
        debug!(declared = %decl.declared_id, canonical = %canonical, is_new, "reconcile: node mapped");
        identity.insert(decl.declared_id.clone(), canonical.clone());
        out_nodes.push(ReconciledNode {
            id: canonical,
            kind: decl.kind.clone(),
            label: decl.label.clone(),
            sub_label: decl.sub_label.clone(),
            is_new,
        });
    }

    let out_edges = edges
        .iter()
        .enumerate()
        .map(|(seq, edge)| {
            let source = identity[&edge.source].clone();
            let target = identity[&edge.target].clone();
            ReconciledEdge {
                id: edge_id(&source, &target, seq),
                source,
                target,
                label: edge.label.clone(),
                style_hint: edge.style_hint,
                animated: edge.animated,
            }
        })
        .collect();

    Reconciled { nodes: out_nodes, edges: out_edges, identity }
}

/// Build the case-insensitive `label -> canonical id` index from the live
/// snapshot. First match wins for duplicate labels.
fn label_index(live: &[Node]) -> HashMap<String, &str> {
    let mut index = HashMap::with_capacity(live.len());
    for node in live {
        index
            .entry(node.data.label.to_lowercase())
            .or_insert(node.id.as_str());
    }
    index
}

/// Deterministic edge identifier seeded from endpoints and sequence index.
fn edge_id(source: &str, target: &str, seq: usize) -> String {
    format!("e-{source}-{target}-{seq}")
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
