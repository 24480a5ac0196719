//! Line classifier for the flow DSL.
//!
//! The grammar is line-oriented with no backtracking: every non-blank,
//! non-comment line is exactly one of header keyword, direction directive,
//! node declaration, or edge declaration. The lexer classifies lines and
//! extracts their fields; ordering rules are enforced by the parser.

use super::ast::{Direction, StyleHint};
use super::parse::ParseError;

/// A classified DSL line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// The `flow` header keyword.
    Flow,
    /// A `direction <TB|LR|BT|RL>` directive.
    Direction(Direction),
    /// A node declaration.
    Node {
        kind: String,
        /// Explicit id when the line used `id: label`; `None` means the
        /// label doubles as the declared id.
        id: Option<String>,
        label: String,
        sub_label: Option<String>,
    },
    /// An edge declaration.
    Edge {
        source: String,
        target: String,
        label: Option<String>,
        style_hint: Option<StyleHint>,
        animated: bool,
    },
}

/// A classified line paired with its 1-based source line number.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub token: Token,
}

/// Split raw DSL text into classified lines. Comments (`#`) and blank lines
/// are dropped here; everything else must classify or the whole input is
/// rejected.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] with the offending line number for any
/// line that matches no grammar production.
pub fn tokenize(input: &str) -> Result<Vec<Line>, ParseError> {
    let mut lines = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let token = classify(line, number)?;
        lines.push(Line { number, token });
    }
    Ok(lines)
}

/// Classify a single trimmed, non-empty, non-comment line.
fn classify(line: &str, number: usize) -> Result<Token, ParseError> {
    if line == "flow" {
        return Ok(Token::Flow);
    }

    if let Some(rest) = line.strip_prefix("direction ") {
        let raw = rest.trim();
        return Direction::from_keyword(raw)
            .map(Token::Direction)
            .ok_or_else(|| ParseError::Syntax {
                line: number,
                message: format!("unknown direction {raw:?} (expected TB, LR, BT, or RL)"),
            });
    }

    if line.starts_with('[') {
        return classify_node(line, number);
    }

    if line.contains("->") {
        return classify_edge(line, number);
    }

    Err(ParseError::Syntax {
        line: number,
        message: format!("unrecognized line: {line:?}"),
    })
}

/// Parse a node declaration: `[type] id: label` or `[type] label`, with an
/// optional ` | sub label` suffix.
fn classify_node(line: &str, number: usize) -> Result<Token, ParseError> {
    let Some(close) = line.find(']') else {
        return Err(ParseError::Syntax {
            line: number,
            message: "node type bracket is never closed".into(),
        });
    };

    let kind = line[1..close].trim().to_owned();
    let rest = line[close + 1..].trim();
    if rest.is_empty() {
        return Err(ParseError::Syntax {
            line: number,
            message: "node declaration has no label".into(),
        });
    }

    // Optional sub-label after a pipe. Node lines carry no arrows, so the
    // pipe is unambiguous here.
    let (rest, sub_label) = match rest.split_once('|') {
        Some((head, sub)) => (head.trim(), Some(sub.trim().to_owned()).filter(|s| !s.is_empty())),
        None => (rest, None),
    };

    let (id, label) = match rest.split_once(':') {
        Some((id, label)) => {
            let id = id.trim();
            let label = label.trim();
            if id.is_empty() || label.is_empty() {
                return Err(ParseError::Syntax {
                    line: number,
                    message: "node declaration has an empty id or label".into(),
                });
            }
            (Some(id.to_owned()), label.to_owned())
        }
        None => (None, rest.to_owned()),
    };

    Ok(Token::Node { kind, id, label, sub_label })
}

/// Parse an edge declaration: `A -> B` or `A ->|label| B`, with an optional
/// trailing `{attr, ...}` block carrying style hints.
fn classify_edge(line: &str, number: usize) -> Result<Token, ParseError> {
    // Peel a trailing attribute block first so `->` search never sees it.
    let (line, style_hint, animated) = split_attributes(line);

    let Some(arrow) = line.find("->") else {
        return Err(ParseError::Syntax {
            line: number,
            message: "edge declaration is missing '->'".into(),
        });
    };

    let source = line[..arrow].trim();
    let mut rest = line[arrow + 2..].trim();

    // Optional |label| immediately after the arrow.
    let mut label = None;
    if let Some(after_pipe) = rest.strip_prefix('|') {
        let Some(close) = after_pipe.find('|') else {
            return Err(ParseError::Syntax {
                line: number,
                message: "edge label pipe is never closed".into(),
            });
        };
        let text = after_pipe[..close].trim();
        if !text.is_empty() {
            label = Some(text.to_owned());
        }
        rest = after_pipe[close + 1..].trim();
    }

    let target = rest;
    if source.is_empty() || target.is_empty() {
        return Err(ParseError::Syntax {
            line: number,
            message: "edge declaration has an empty endpoint".into(),
        });
    }

    Ok(Token::Edge {
        source: source.to_owned(),
        target: target.to_owned(),
        label,
        style_hint,
        animated,
    })
}

/// Strip a trailing `{...}` attribute block and interpret its tokens.
/// Unknown attributes are advisory and ignored.
fn split_attributes(line: &str) -> (&str, Option<StyleHint>, bool) {
    let trimmed = line.trim_end();
    let Some(open) = trimmed.rfind('{') else {
        return (line, None, false);
    };
    if !trimmed.ends_with('}') {
        return (line, None, false);
    }

    let mut style_hint = None;
    let mut animated = false;
    for attr in trimmed[open + 1..trimmed.len() - 1].split(',') {
        let attr = attr.trim();
        if attr == "animated" {
            animated = true;
        } else if let Some(hint) = StyleHint::from_keyword(attr) {
            style_hint = Some(hint);
        }
    }

    (&trimmed[..open], style_hint, animated)
}

#[cfg(test)]
#[path = "lex_test.rs"]
mod tests;
