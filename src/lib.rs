//! flowgen — text-to-diagram generation pipeline.
//!
//! Converts a line-oriented flow DSL (written by hand or produced by an
//! LLM) into a styled, laid-out node/edge graph and commits it atomically
//! to an in-memory canvas. See [`pipeline::run`] for the end-to-end flow.

pub mod canvas;
pub mod dsl;
pub mod error;
pub mod generate;
pub mod graph;
pub mod layout;
pub mod llm;
pub mod pipeline;
pub mod reconcile;
pub mod style;
pub mod validate;

pub use canvas::Canvas;
pub use error::ErrorCode;
pub use graph::{Edge, Node};
pub use pipeline::{PipelineOptions, PipelineReport};
