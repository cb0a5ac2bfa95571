//! Element types for workflow graphs.
//!
//! Elements are the nodes a user drops onto the canvas. Each element has:
//! - A unique ID within the workflow
//! - A kind (circle, arrow, or text) fixed at creation
//! - A canvas position
//! - Free-form text content

use flowsketch_core::ElementId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a workflow element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A step in the workflow; the only kind that can be an export root.
    Circle,
    /// A free-standing arrow shape.
    Arrow,
    /// A text label, usually attached to a circle by a connection.
    Text,
}

impl ElementKind {
    /// Returns the kind name as used in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }

    /// Content given to a freshly dropped element of this kind.
    #[must_use]
    pub const fn default_content(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Text => "Text",
            Self::Arrow => "",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point on the editor canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite. JSON has no encoding for
    /// NaN or infinity.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A node in the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, immutable once assigned.
    pub id: ElementId,
    /// Element kind, immutable once assigned.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Canvas position.
    pub position: Position,
    /// Text content.
    #[serde(default)]
    pub content: String,
}

impl Element {
    /// Creates an element with a freshly generated ID.
    #[must_use]
    pub fn new(kind: ElementKind, position: Position, content: impl Into<String>) -> Self {
        Self::with_id(ElementId::new(), kind, position, content)
    }

    /// Creates an element with a specific ID.
    #[must_use]
    pub fn with_id(
        id: impl Into<ElementId>,
        kind: ElementKind,
        position: Position,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            content: content.into(),
        }
    }

    /// Returns true if this element is a circle.
    #[must_use]
    pub fn is_circle(&self) -> bool {
        self.kind == ElementKind::Circle
    }

    /// Returns true if this element is a text label.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }
}
