//! Connection types for workflow graphs.
//!
//! A connection is a directed edge between two elements, tagged with the
//! workflow key that was current when it was drawn.

use flowsketch_core::ElementId;
use serde::{Deserialize, Serialize};

/// A directed edge from one element to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The source element.
    pub from: ElementId,
    /// The target element.
    pub to: ElementId,
    /// The workflow key this connection belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Optional label drawn on the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    /// Creates an untagged connection.
    #[must_use]
    pub fn new(from: impl Into<ElementId>, to: impl Into<ElementId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            key: None,
            label: None,
        }
    }

    /// Sets the workflow key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the edge label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns true if either endpoint is the given element.
    #[must_use]
    pub fn touches(&self, id: &ElementId) -> bool {
        &self.from == id || &self.to == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touches_either_endpoint() {
        let conn = Connection::new("A", "B");
        assert!(conn.touches(&ElementId::from("A")));
        assert!(conn.touches(&ElementId::from("B")));
        assert!(!conn.touches(&ElementId::from("C")));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let json = serde_json::to_value(Connection::new("A", "B")).expect("serialize");
        assert_eq!(json, serde_json::json!({"from": "A", "to": "B"}));
    }

    #[test]
    fn key_and_label_are_persisted() {
        let conn = Connection::new("A", "B").with_key("review").with_label("yes");
        let json = serde_json::to_value(&conn).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"from": "A", "to": "B", "key": "review", "label": "yes"})
        );
        let back: Connection = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, conn);
    }

    #[test]
    fn key_is_optional_on_input() {
        let conn: Connection =
            serde_json::from_str(r#"{"from":"A","to":"B"}"#).expect("deserialize");
        assert_eq!(conn.key, None);

        let tagged: Connection =
            serde_json::from_str(r#"{"from":"A","to":"B","key":"review"}"#).expect("deserialize");
        assert_eq!(tagged.key.as_deref(), Some("review"));
    }
}
