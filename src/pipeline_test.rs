
use super::*;
use crate::graph::Edge;
use crate::layout::{LayeredEngine, LayoutError};

struct SlowEngine;

#[async_trait::async_trait]
impl LayoutEngine for SlowEngine {
    async fn layout(
        &self,
        nodes: Vec<Node>,
        _edges: &[Edge],
        _params: &LayoutParams,
    ) -> Result<Vec<Node>, LayoutError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(nodes)
    }
}

async fn run_ok(canvas: &Canvas, text: &str) -> PipelineReport {
    run(canvas, &LayeredEngine, text, &PipelineOptions::default()).await.expect("pipeline run")
}

// First generation on a blank canvas: every node created, every position
// assigned, defaults applied.
#[tokio::test]
async fn fresh_generation() {
    let canvas = Canvas::new();
    let text = "flow\ndirection TB\n[start] Begin\n[decision] Valid?\n[end] Done\nBegin -> Valid?\nValid? ->|yes| Done";
    let report = run_ok(&canvas, text).await;

    assert_eq!(report.nodes_committed, 3);
    assert_eq!(report.edges_committed, 2);
    assert!(report.dropped.is_empty());
    assert!(!report.fallback_layout);
    assert_eq!(report.summary(), "diagram generated");

    let snapshot = canvas.read_snapshot().await;
    assert_eq!(snapshot.nodes.len(), 3);
    assert_eq!(snapshot.edges.len(), 2);
    assert_eq!(snapshot.edges[1].label.as_deref(), Some("yes"));
    assert_eq!(snapshot.edges[0].kind, "smoothstep");
    assert!(snapshot.edges[0].animated);

    // Distinct positions for every node.
    for i in 0..snapshot.nodes.len() {
        for j in i + 1..snapshot.nodes.len() {
            assert_ne!(snapshot.nodes[i].position, snapshot.nodes[j].position);
        }
    }
}

// Regeneration with a node whose label matches keeps its canonical id.
#[tokio::test]
async fn regeneration_preserves_identity() {
    let canvas = Canvas::new();
    run_ok(&canvas, "[process] Checkout\n[end] Done\nCheckout -> Done").await;

    let first = canvas.read_snapshot().await;
    let checkout_id = first.nodes.iter().find(|n| n.data.label == "Checkout").unwrap().id.clone();

    // Same label, different declared id and extra node this time.
    run_ok(&canvas, "[process] pay: Checkout\n[end] Done\n[note] New step\npay -> Done").await;

    let second = canvas.read_snapshot().await;
    let checkout = second.nodes.iter().find(|n| n.data.label == "Checkout").unwrap();
    assert_eq!(checkout.id, checkout_id);
    assert_eq!(second.nodes.len(), 3);
}

// A fatal parse error leaves the canvas untouched.
#[tokio::test]
async fn parse_failure_is_atomic() {
    let canvas = Canvas::new();
    run_ok(&canvas, "[start] Keep me").await;

    let err = run(
        &canvas,
        &LayeredEngine,
        "[start] A\nA -> A\n[end] B",
        &PipelineOptions::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error_code(), "E_ORDERING");

    let snapshot = canvas.read_snapshot().await;
    assert_eq!(snapshot.nodes.len(), 1);
    assert_eq!(snapshot.nodes[0].data.label, "Keep me");
}

#[tokio::test]
async fn duplicate_id_aborts_the_run() {
    let canvas = Canvas::new();
    let err = run(
        &canvas,
        &LayeredEngine,
        "[process] a: One\n[process] a: Two",
        &PipelineOptions::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.error_code(), "E_DUPLICATE_ID");
    assert!(canvas.read_snapshot().await.nodes.is_empty());
}

// Dangling edges are dropped with warnings; the rest commits.
#[tokio::test]
async fn dangling_edges_are_skipped_not_fatal() {
    let canvas = Canvas::new();
    let text = "[start] A\n[end] B\nA -> B\nA -> Ghost\nPhantom -> B";
    let report = run_ok(&canvas, text).await;

    assert_eq!(report.edges_committed, 1);
    assert_eq!(report.dropped.len(), 2);
    assert_eq!(report.summary(), "diagram generated, 2 connections skipped");

    let snapshot = canvas.read_snapshot().await;
    assert_eq!(snapshot.nodes.len(), 2);
    assert_eq!(snapshot.edges.len(), 1);
}

#[tokio::test]
async fn one_skip_summary_is_singular() {
    let canvas = Canvas::new();
    let report = run_ok(&canvas, "[start] A\nA -> Ghost").await;
    assert_eq!(report.summary(), "diagram generated, 1 connection skipped");
}

// Layout timeout falls back to the grid; the run still commits.
#[tokio::test]
async fn layout_timeout_commits_with_grid_fallback() {
    let canvas = Canvas::new();
    let options = PipelineOptions {
        layout_timeout: Duration::from_millis(20),
        ..PipelineOptions::default()
    };
    let report = run(&canvas, &SlowEngine, "[start] A\n[end] B\nA -> B", &options)
        .await
        .expect("pipeline run");

    assert!(report.fallback_layout);
    let snapshot = canvas.read_snapshot().await;
    assert_eq!(snapshot.nodes.len(), 2);
    assert_ne!(snapshot.nodes[0].position, snapshot.nodes[1].position);
}

// A run superseded by a newer one is refused at commit: race a slow run
// against a fast one that starts after it.
#[tokio::test]
async fn superseded_run_is_refused() {
    let canvas = Canvas::new();

    // No timeout headroom for the fallback: the slow run spends ~20ms in
    // layout, during which the fast run takes a newer token and commits.
    let options = PipelineOptions {
        layout_timeout: Duration::from_millis(20),
        ..PipelineOptions::default()
    };
    let slow_canvas = canvas.clone();
    let slow = tokio::spawn(async move {
        run(&slow_canvas, &SlowEngine, "[start] Loser", &options).await
    });

    // Give the slow run time to take its token, then land a fast one.
    tokio::time::sleep(Duration::from_millis(5)).await;
    run_ok(&canvas, "[start] Fast").await;

    let err = slow.await.expect("join").unwrap_err();
    assert_eq!(err.error_code(), "E_SUPERSEDED");

    let snapshot = canvas.read_snapshot().await;
    assert_eq!(snapshot.nodes[0].data.label, "Fast");
}

// Generated text arrives fenced; the envelope is stripped before parsing.
#[tokio::test]
async fn fenced_input_is_unwrapped() {
    let canvas = Canvas::new();
    let report = run_ok(&canvas, "```flowmind\nflow\n[start] A\n```").await;
    assert_eq!(report.nodes_committed, 1);
}

#[tokio::test]
async fn direction_header_reaches_layout() {
    let canvas = Canvas::new();
    run_ok(&canvas, "flow\ndirection LR\n[start] A\n[end] B\nA -> B").await;
    let snapshot = canvas.read_snapshot().await;
    let a = snapshot.nodes.iter().find(|n| n.id == "A").unwrap();
    let b = snapshot.nodes.iter().find(|n| n.id == "B").unwrap();
    assert!(b.position.x > a.position.x);
}

#[tokio::test]
async fn sub_labels_are_committed() {
    let canvas = Canvas::new();
    run_ok(&canvas, "[system] db: Database | PostgreSQL 16").await;
    let snapshot = canvas.read_snapshot().await;
    assert_eq!(snapshot.nodes[0].data.sub_label.as_deref(), Some("PostgreSQL 16"));
}

#[tokio::test]
async fn empty_document_commits_empty_canvas() {
    let canvas = Canvas::new();
    run_ok(&canvas, "[start] About to vanish").await;
    let report = run_ok(&canvas, "flow\n# nothing else").await;
    assert_eq!(report.nodes_committed, 0);
    assert!(canvas.read_snapshot().await.nodes.is_empty());
}
