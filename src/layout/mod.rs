//! Layout adapter — assigning positions to nodes that lack a trusted one.
//!
//! DESIGN
//! ======
//! The layout collaborator is a pure function from (nodes, edges, params) to
//! positioned nodes, behind an async trait so the pipeline can await it and
//! tests can substitute a mock. Layout must be deterministic for a fixed
//! input graph and parameter set. The pipeline never commits a node without
//! a position: the adapter wraps the engine in a bounded timeout and falls
//! back to deterministic grid placement in declaration order on timeout or
//! engine failure.

pub mod layered;

use std::time::Duration;

use tracing::warn;

use crate::dsl::Direction;
use crate::error::ErrorCode;
use crate::graph::{Node, Position};

pub use layered::LayeredEngine;

// Grid fallback spacing (logical pixels).
const GRID_SPACING_X: f64 = 240.0;
const GRID_SPACING_Y: f64 = 140.0;

/// Which algorithm the engine should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAlgorithm {
    /// Rank nodes by longest path from the roots — tree-like hierarchy.
    #[default]
    Tree,
    /// Plain rows-and-columns placement in declaration order.
    Grid,
}

/// How far apart to place nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    Compact,
    #[default]
    Loose,
}

impl Spacing {
    /// (across-flow, along-flow) gaps in logical pixels.
    #[must_use]
    pub fn gaps(self) -> (f64, f64) {
        match self {
            Self::Compact => (180.0, 100.0),
            Self::Loose => (260.0, 160.0),
        }
    }
}

/// Parameters for one layout invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutParams {
    pub direction: Direction,
    pub algorithm: LayoutAlgorithm,
    pub spacing: Spacing,
}

/// Layout failures. Both variants are non-fatal to the pipeline: the grid
/// fallback takes over.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout computation exceeded {0:?}")]
    Timeout(Duration),

    #[error("layout engine failed: {0}")]
    Engine(String),
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "E_LAYOUT_TIMEOUT",
            Self::Engine(_) => "E_LAYOUT_ENGINE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Async seam for the layout collaborator. Mockable in tests.
#[async_trait::async_trait]
pub trait LayoutEngine: Send + Sync {
    /// Return `nodes` with every `position` populated. Incoming coordinates
    /// are untrustworthy and must be ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the computation fails internally.
    async fn layout(
        &self,
        nodes: Vec<Node>,
        edges: &[crate::graph::Edge],
        params: &LayoutParams,
    ) -> Result<Vec<Node>, LayoutError>;
}

/// Run the engine under a bounded timeout, falling back to grid placement on
/// timeout or failure. Returns the positioned nodes and whether the fallback
/// was used.
pub async fn layout_with_fallback(
    engine: &dyn LayoutEngine,
    nodes: Vec<Node>,
    edges: &[crate::graph::Edge],
    params: &LayoutParams,
    timeout: Duration,
) -> (Vec<Node>, bool) {
    let fallback_input = nodes.clone();

    let result = tokio::time::timeout(timeout, engine.layout(nodes, edges, params))
        .await
        .map_err(|_| LayoutError::Timeout(timeout))
        .and_then(|inner| inner);

    match result {
        Ok(positioned) => (positioned, false),
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "layout: falling back to grid placement");
            (grid_positions(fallback_input), true)
        }
    }
}

/// Deterministic grid placement in declaration order: fixed row/column
/// spacing, row width scales with the node count.
#[must_use]
pub fn grid_positions(mut nodes: Vec<Node>) -> Vec<Node> {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let columns = ((nodes.len() as f64).sqrt().ceil() as usize).max(1);

    for (i, node) in nodes.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let (col, row) = ((i % columns) as f64, (i / columns) as f64);
        node.position = Position { x: col * GRID_SPACING_X, y: row * GRID_SPACING_Y };
    }
    nodes
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
