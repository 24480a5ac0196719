//! Flow DSL — line-oriented diagram description language.
//!
//! The DSL is a header block (`flow`, `direction`), node declaration lines,
//! then edge declaration lines, in that strict order. The lexer classifies
//! lines, the parser enforces ordering and identity rules, and the envelope
//! helper strips code fencing from generated text before either runs.

pub mod ast;
pub mod envelope;
pub mod lex;
pub mod parse;

pub use ast::{Direction, Document, EdgeDecl, NodeDecl, StyleHint};
pub use envelope::unwrap_envelope;
pub use parse::{ParseError, parse};
