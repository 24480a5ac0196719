//! AST types for the flow DSL.

use serde::{Deserialize, Serialize};

/// A parsed DSL document: header options plus ordered node and edge
/// declarations. Produced once per parse and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    pub direction: Direction,
    pub nodes: Vec<NodeDecl>,
    pub edges: Vec<EdgeDecl>,
}

/// Flow direction declared in the document header. Defaults to top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "BT")]
    BottomTop,
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    /// Parse a `direction` header value. Keywords are case-sensitive.
    #[must_use]
    pub fn from_keyword(raw: &str) -> Option<Self> {
        match raw {
            "TB" => Some(Self::TopBottom),
            "LR" => Some(Self::LeftRight),
            "BT" => Some(Self::BottomTop),
            "RL" => Some(Self::RightLeft),
            _ => None,
        }
    }

    /// `true` when the main flow axis is vertical.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopBottom | Self::BottomTop)
    }

    /// `true` when flow runs against the axis (bottom-to-top, right-to-left).
    #[must_use]
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomTop | Self::RightLeft)
    }
}

/// A node declaration line. `declared_id` is either explicit (written before
/// a `:`) or the label text verbatim when no explicit id was given.
#[derive(Debug, Clone)]
pub struct NodeDecl {
    pub declared_id: String,
    pub kind: String,
    pub label: String,
    pub sub_label: Option<String>,
    /// 1-based source line, for error reporting.
    pub line: usize,
}

/// An edge declaration line. `source`/`target` reference `declared_id`
/// values, not final canonical identifiers.
#[derive(Debug, Clone)]
pub struct EdgeDecl {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub style_hint: Option<StyleHint>,
    pub animated: bool,
    /// 1-based source line, for error reporting.
    pub line: usize,
}

/// Rendering hint recognized from edge attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    Straight,
    Curved,
    Dashed,
}

impl StyleHint {
    #[must_use]
    pub fn from_keyword(raw: &str) -> Option<Self> {
        match raw {
            "straight" => Some(Self::Straight),
            "curved" => Some(Self::Curved),
            "dashed" => Some(Self::Dashed),
            _ => None,
        }
    }
}
