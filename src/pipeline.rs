//! Pipeline orchestrator — DSL text in, committed canvas out.
//!
//! DESIGN
//! ======
//! Stages run strictly sequentially: Parsing → Validating → Reconciling →
//! Styling → LayingOut → Committing. No stage writes to the canvas except
//! the final commit, and the commit is all-or-nothing: a fatal error in
//! Parsing, Validating, or Committing leaves the live canvas untouched.
//! Layout failure is not fatal — the grid fallback guarantees every node a
//! position. The canvas snapshot and generation token are taken once at run
//! start; a superseded run is refused at commit rather than committed.

use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::canvas::{Canvas, CommitError};
use crate::dsl::{self, ParseError};
use crate::error::ErrorCode;
use crate::graph::Node;
use crate::layout::{LayoutEngine, LayoutParams, layout_with_fallback};
use crate::reconcile;
use crate::style::{self, EdgeDefaults};
use crate::validate::{self, DanglingReference};

/// Default bound on one layout computation.
pub const DEFAULT_LAYOUT_TIMEOUT: Duration = Duration::from_secs(2);

/// Orchestrator state, exposed for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Parsing,
    Validating,
    Reconciling,
    Styling,
    LayingOut,
    Committing,
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Parsing => "parsing",
            Self::Validating => "validating",
            Self::Reconciling => "reconciling",
            Self::Styling => "styling",
            Self::LayingOut => "laying_out",
            Self::Committing => "committing",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Caller-supplied knobs for one run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub edge_defaults: EdgeDefaults,
    pub layout: LayoutParams,
    pub layout_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            edge_defaults: EdgeDefaults::default(),
            layout: LayoutParams::default(),
            layout_timeout: DEFAULT_LAYOUT_TIMEOUT,
        }
    }
}

/// Outcome of a successful run, including aggregated non-fatal warnings.
#[derive(Debug)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub nodes_committed: usize,
    pub edges_committed: usize,
    /// Edges dropped for referencing undeclared nodes.
    pub dropped: Vec<DanglingReference>,
    /// `true` when the grid fallback positioned the nodes.
    pub fallback_layout: bool,
}

impl PipelineReport {
    /// One-line summary for the caller, e.g.
    /// `"diagram generated, 2 connections skipped"`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.dropped.len() {
            0 => "diagram generated".to_owned(),
            1 => "diagram generated, 1 connection skipped".to_owned(),
            n => format!("diagram generated, {n} connections skipped"),
        }
    }
}

/// Fatal run failures. The canvas is untouched in every case.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Commit(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Parse(e) => e.retryable(),
            Self::Commit(e) => e.retryable(),
        }
    }
}

/// Run the full pipeline: unwrap the text envelope, parse, validate,
/// reconcile against the live canvas, apply edge styling, lay out, and
/// commit atomically.
///
/// # Errors
///
/// Returns a [`PipelineError`] for malformed DSL or a superseded run; in
/// both cases the canvas is left byte-for-byte unchanged.
pub async fn run(
    canvas: &Canvas,
    engine: &dyn LayoutEngine,
    text: &str,
    options: &PipelineOptions,
) -> Result<PipelineReport, PipelineError> {
    let run_id = Uuid::new_v4();
    let mut stage = Stage::Idle;
    info!(%run_id, text_len = text.len(), "pipeline: run started");

    // Snapshot and generation token, once, before any stage runs.
    let (snapshot, token) = canvas.begin_run().await;
    let dsl_text = dsl::unwrap_envelope(text);

    advance(run_id, &mut stage, Stage::Parsing);
    let document = dsl::parse(&dsl_text).inspect_err(|e| fail(run_id, &mut stage, e))?;

    advance(run_id, &mut stage, Stage::Validating);
    let validated = validate::check_references(&document);

    advance(run_id, &mut stage, Stage::Reconciling);
    let reconciled = reconcile::reconcile(&document.nodes, &validated.edges, &snapshot.nodes);

    advance(run_id, &mut stage, Stage::Styling);
    let edges = style::apply(reconciled.edges, &options.edge_defaults);

    // Regenerated coordinates are untrustworthy; every node gets laid out.
    let nodes: Vec<Node> = reconciled
        .nodes
        .into_iter()
        .map(|n| {
            let mut node = Node::new(n.id, n.kind, n.label);
            node.data.sub_label = n.sub_label;
            node
        })
        .collect();

    advance(run_id, &mut stage, Stage::LayingOut);
    let params = LayoutParams { direction: document.direction, ..options.layout };
    let (nodes, fallback_layout) =
        layout_with_fallback(engine, nodes, &edges, &params, options.layout_timeout).await;

    advance(run_id, &mut stage, Stage::Committing);
    let (nodes_committed, edges_committed) = (nodes.len(), edges.len());
    canvas
        .commit(token, nodes, edges)
        .await
        .inspect_err(|e| fail(run_id, &mut stage, e))?;

    stage = Stage::Idle;
    let report = PipelineReport {
        run_id,
        nodes_committed,
        edges_committed,
        dropped: validated.dropped,
        fallback_layout,
    };
    info!(
        %run_id,
        stage = %stage,
        nodes = report.nodes_committed,
        edges = report.edges_committed,
        skipped = report.dropped.len(),
        fallback_layout,
        "pipeline: run committed"
    );
    Ok(report)
}

fn advance(run_id: Uuid, stage: &mut Stage, next: Stage) {
    debug!(%run_id, from = %stage, to = %next, "pipeline: stage");
    *stage = next;
}

fn fail(run_id: Uuid, stage: &mut Stage, error: &impl ErrorCode) {
    warn!(%run_id, stage = %stage, error = %error, code = error.error_code(), "pipeline: run failed");
    *stage = Stage::Failed;
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
