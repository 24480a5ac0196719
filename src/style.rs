//! Edge style policy — filling unset rendering attributes from global
//! defaults.
//!
//! Pure and infallible: per-edge hints win over the global default type, a
//! `curved` hint always forces the bezier connector type, `animated` is a
//! logical OR with the default, and stroke width/color come from the
//! defaults unless the edge declared its own.

use crate::dsl::StyleHint;
use crate::graph::{Edge, EdgeStyle};
use crate::reconcile::ReconciledEdge;

/// Bezier connector type — what a `curved` hint always resolves to.
const CURVED_EDGE_TYPE: &str = "default";

/// Caller-supplied global edge defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDefaults {
    pub kind: String,
    pub animated: bool,
    pub stroke_width: f64,
    pub color: Option<String>,
}

impl Default for EdgeDefaults {
    fn default() -> Self {
        Self { kind: "smoothstep".into(), animated: true, stroke_width: 2.0, color: None }
    }
}

/// Apply the style policy to every reconciled edge, producing committed
/// [`Edge`] values.
#[must_use]
pub fn apply(edges: Vec<ReconciledEdge>, defaults: &EdgeDefaults) -> Vec<Edge> {
    edges
        .into_iter()
        .map(|edge| {
            let kind = match edge.style_hint {
                Some(StyleHint::Curved) => CURVED_EDGE_TYPE.to_owned(),
                Some(StyleHint::Straight) => "straight".to_owned(),
                Some(StyleHint::Dashed) => "dashed".to_owned(),
                None => defaults.kind.clone(),
            };
            Edge {
                id: edge.id,
                source: edge.source,
                target: edge.target,
                kind,
                animated: edge.animated || defaults.animated,
                style: EdgeStyle {
                    stroke_width: defaults.stroke_width,
                    stroke: defaults.color.clone(),
                },
                label: edge.label,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "style_test.rs"]
mod tests;
