//! Live canvas context — the one shared resource the pipeline touches.
//!
//! DESIGN
//! ======
//! The live diagram is an explicit context object passed into the
//! orchestrator, not an ambient global. The pipeline interface is
//! deliberately narrow: `begin_run` hands out a consistent read-only
//! snapshot plus a generation token, and `commit` performs a single atomic
//! replace of the node/edge collections — never incremental patches. A run
//! whose token is stale (a newer run began after its snapshot) is refused at
//! commit time, so a superseded regeneration is discarded instead of
//! clobbering a newer result.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::error::ErrorCode;
use crate::graph::{Edge, Node};

/// Read-only copy of the live diagram, taken once at pipeline start.
/// Serializes as the application's document interchange shape.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Opaque generation token issued by [`Canvas::begin_run`] and checked
/// immediately before commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Commit refusals.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// A newer regeneration began after this run's snapshot was taken.
    #[error("run superseded: generation {held} is stale (latest is {latest})")]
    Superseded { held: u64, latest: u64 },
}

impl ErrorCode for CommitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Superseded { .. } => "E_SUPERSEDED",
        }
    }
}

#[derive(Default)]
struct CanvasInner {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Bumped on every `begin_run`; a commit must hold the latest value.
    generation: u64,
}

/// Shared live-canvas state. Clone is cheap; all state is behind one lock.
#[derive(Clone, Default)]
pub struct Canvas {
    inner: Arc<RwLock<CanvasInner>>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the canvas with existing content (e.g. a loaded document).
    pub async fn replace(&self, nodes: Vec<Node>, edges: Vec<Edge>) {
        let mut inner = self.inner.write().await;
        inner.nodes = nodes;
        inner.edges = edges;
    }

    /// Take a consistent snapshot and register a new pipeline run. The
    /// returned token must be presented at commit.
    pub async fn begin_run(&self) -> (Snapshot, RunToken) {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        let snapshot = Snapshot { nodes: inner.nodes.clone(), edges: inner.edges.clone() };
        (snapshot, RunToken(inner.generation))
    }

    /// Read the current diagram without registering a run.
    pub async fn read_snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        Snapshot { nodes: inner.nodes.clone(), edges: inner.edges.clone() }
    }

    /// Atomically replace the diagram contents.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::Superseded`] when a newer run began after
    /// `token` was issued; the canvas is left untouched in that case.
    pub async fn commit(&self, token: RunToken, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), CommitError> {
        let mut inner = self.inner.write().await;
        if token.0 != inner.generation {
            return Err(CommitError::Superseded { held: token.0, latest: inner.generation });
        }
        info!(nodes = nodes.len(), edges = edges.len(), generation = token.0, "canvas: commit");
        inner.nodes = nodes;
        inner.edges = edges;
        Ok(())
    }
}

#[cfg(test)]
#[path = "canvas_test.rs"]
mod tests;
