//! Canonical graph types — the committed node/edge representation.
//!
//! DESIGN
//! ======
//! These structs serialize to the interchange schema the rest of the
//! application consumes: `Node { id, type, data: { label, subLabel? },
//! position: { x, y } }` and `Edge { id, source, target, type, animated,
//! style: { strokeWidth, stroke? }, label? }`. Field names are fixed by that
//! schema; everything else in the crate works in terms of these types.

use serde::{Deserialize, Serialize};

// =============================================================================
// NODE
// =============================================================================

/// A 2D canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// User-visible node content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(rename = "subLabel", skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
}

/// A committed diagram node. `id` is the stable, long-lived identifier used
/// by the rest of the application; it never changes across regenerations as
/// long as the node's label still matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: NodeData,
    pub position: Position,
}

impl Node {
    /// Convenience constructor for a node without a trusted position yet.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            data: NodeData { label: label.into(), sub_label: None },
            position: Position::default(),
        }
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// Stroke styling for a committed edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self { stroke_width: 2.0, stroke: None }
    }
}

/// A committed diagram edge. `source` and `target` always reference nodes
/// present in the same committed graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub animated: bool,
    pub style: EdgeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
