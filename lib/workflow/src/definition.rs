//! Workflow definition types.
//!
//! A workflow is a named, categorized graph that consists of:
//! - Metadata (id, name, type, timestamps)
//! - The current workflow key
//! - A flat graph of elements and connections
//!
//! The flat JSON form produced here is the canonical persisted and
//! import/export format. The nested tree produced by [`crate::tree`] is a
//! one-way view and is never read back.

use crate::catalog::{DEFAULT_WORKFLOW_KEY, WorkflowType};
use crate::connection::Connection;
use crate::element::Element;
use crate::error::ImportError;
use crate::graph::WorkflowGraph;
use chrono::{DateTime, Utc};
use flowsketch_core::WorkflowId;
use rootcause::Report;
use serde::{Deserialize, Serialize};

/// A complete workflow: metadata plus its flat graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PersistedWorkflow")]
pub struct Workflow {
    /// Assigned when the workflow is first saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<WorkflowId>,
    /// Human-readable name.
    pub name: String,
    /// `category/subcategory` classification.
    #[serde(rename = "type")]
    pub workflow_type: String,
    #[serde(flatten)]
    graph: WorkflowGraph,
    /// Current key; new connections are tagged with it.
    pub workflow_key: String,
    /// When this workflow was created.
    pub created_at: DateTime<Utc>,
    /// When this workflow was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Creates an empty, unsaved workflow with the given key.
    #[must_use]
    pub fn new(workflow_key: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: String::new(),
            workflow_type: String::new(),
            graph: WorkflowGraph::new(),
            workflow_key: workflow_key.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a workflow around an existing graph.
    #[must_use]
    pub fn with_graph(workflow_key: impl Into<String>, graph: WorkflowGraph) -> Self {
        Self {
            graph,
            ..Self::new(workflow_key)
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the `category/subcategory` type.
    #[must_use]
    pub fn with_type(mut self, workflow_type: impl Into<String>) -> Self {
        self.workflow_type = workflow_type.into();
        self
    }

    /// Returns the graph.
    #[must_use]
    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut WorkflowGraph {
        &mut self.graph
    }

    /// Returns the elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.graph.elements()
    }

    /// Returns the connections in insertion order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        self.graph.connections()
    }

    /// Returns the parsed `category/subcategory` type.
    #[must_use]
    pub fn parsed_type(&self) -> WorkflowType {
        match self.workflow_type.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }

    /// Marks the workflow as updated (bumps updated_at timestamp).
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Parses a workflow from its flat JSON form.
    ///
    /// Only the shape of the payload is checked. Missing lists default to
    /// empty, missing timestamps to now, and the key falls back to a legacy
    /// `key` field and then to [`DEFAULT_WORKFLOW_KEY`]. Connections are not
    /// checked against the element list.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Malformed` if the payload is not a JSON object
    /// with the workflow shape.
    pub fn from_json(json: &str) -> Result<Self, Report<ImportError>> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ImportError::Malformed {
                reason: e.to_string(),
            })?;
        if !value.is_object() {
            return Err(ImportError::Malformed {
                reason: "expected a JSON object".to_string(),
            }
            .into());
        }
        let workflow = serde_json::from_value(value).map_err(|e| ImportError::Malformed {
            reason: e.to_string(),
        })?;
        Ok(workflow)
    }

    /// Serializes the workflow to pretty-printed flat JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(DEFAULT_WORKFLOW_KEY)
    }
}

/// The lenient on-disk shape accepted when loading a workflow.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedWorkflow {
    #[serde(default)]
    id: Option<WorkflowId>,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    workflow_type: String,
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    connections: Vec<Connection>,
    #[serde(default)]
    workflow_key: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<PersistedWorkflow> for Workflow {
    fn from(raw: PersistedWorkflow) -> Self {
        let now = Utc::now();
        let workflow_key = raw
            .workflow_key
            .or(raw.key)
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEFAULT_WORKFLOW_KEY.to_string());

        Self {
            id: raw.id,
            name: raw.name,
            workflow_type: raw.workflow_type,
            graph: WorkflowGraph::from_parts(raw.elements, raw.connections),
            workflow_key,
            created_at: raw.created_at.unwrap_or(now),
            updated_at: raw.updated_at.unwrap_or(now),
        }
    }
}

/// Summary information about a workflow (for listings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    /// Workflow ID, if saved.
    pub id: Option<WorkflowId>,
    /// Workflow name.
    pub name: String,
    /// `category/subcategory` type.
    #[serde(rename = "type")]
    pub workflow_type: String,
    /// Number of elements in the graph.
    pub element_count: usize,
    /// Last updated timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Workflow> for WorkflowSummary {
    fn from(workflow: &Workflow) -> Self {
        Self {
            id: workflow.id.clone(),
            name: workflow.name.clone(),
            workflow_type: workflow.workflow_type.clone(),
            element_count: workflow.graph.element_count(),
            updated_at: workflow.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, Position};

    const SAVED: &str = r#"{
        "id": "k3j9x0a1b",
        "name": "Expense approval",
        "type": "process/Approval",
        "elements": [
            {"id": "A", "type": "circle", "position": {"x": 40, "y": 60}, "content": "Start"},
            {"id": "B", "type": "circle", "position": {"x": 240, "y": 60}, "content": "End"},
            {"id": "L", "type": "text", "position": {"x": 140, "y": 20}, "content": "go"}
        ],
        "connections": [
            {"from": "A", "to": "B", "key": "approval"},
            {"from": "A", "to": "L"}
        ],
        "workflowKey": "approval",
        "createdAt": "2024-03-01T09:30:00.000Z",
        "updatedAt": "2024-03-02T10:00:00.000Z"
    }"#;

    #[test]
    fn workflow_creation() {
        let workflow = Workflow::new("review").with_name("Test").with_type("system/Automation");
        assert_eq!(workflow.workflow_key, "review");
        assert_eq!(workflow.name, "Test");
        assert!(workflow.id.is_none());
        assert_eq!(workflow.graph().element_count(), 0);
        assert_eq!(workflow.created_at, workflow.updated_at);
    }

    #[test]
    fn parse_saved_workflow() {
        let workflow = Workflow::from_json(SAVED).expect("parse");
        assert_eq!(workflow.id, Some(WorkflowId::from("k3j9x0a1b")));
        assert_eq!(workflow.workflow_key, "approval");
        assert_eq!(workflow.elements().len(), 3);
        assert_eq!(workflow.elements()[2].kind, ElementKind::Text);
        assert_eq!(workflow.connections()[0].key.as_deref(), Some("approval"));
        assert_eq!(workflow.connections()[1].key, None);
        assert_eq!(workflow.parsed_type().subcategory, "Approval");
    }

    #[test]
    fn flat_json_roundtrip_preserves_graph() {
        let workflow = Workflow::from_json(SAVED).expect("parse");
        let json = workflow.to_json_pretty().expect("serialize");
        let reloaded = Workflow::from_json(&json).expect("reparse");

        assert_eq!(reloaded.elements(), workflow.elements());
        assert_eq!(reloaded.connections(), workflow.connections());
        assert_eq!(reloaded, workflow);
    }

    #[test]
    fn serialized_field_names_match_persisted_form() {
        let mut workflow = Workflow::new("approval");
        workflow
            .graph_mut()
            .add_element(ElementKind::Circle, Position::new(1.0, 2.0), "Circle");
        let value = serde_json::to_value(&workflow).expect("serialize");
        let object = value.as_object().unwrap();

        for field in [
            "name",
            "type",
            "elements",
            "connections",
            "workflowKey",
            "createdAt",
            "updatedAt",
        ] {
            assert!(object.contains_key(field), "missing {field}");
        }
        assert!(!object.contains_key("id"));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let workflow = Workflow::from_json(r#"{"key": "review"}"#).expect("parse");
        assert_eq!(workflow.workflow_key, "review");
        assert!(workflow.elements().is_empty());
        assert!(workflow.connections().is_empty());

        let bare = Workflow::from_json("{}").expect("parse");
        assert_eq!(bare.workflow_key, DEFAULT_WORKFLOW_KEY);
    }

    #[test]
    fn dangling_connections_are_accepted() {
        let workflow = Workflow::from_json(
            r#"{"elements": [], "connections": [{"from": "X", "to": "Y"}]}"#,
        )
        .expect("parse");
        assert_eq!(workflow.connections().len(), 1);
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        for payload in ["not json", "[]", r#"{"elements": 5}"#, "42"] {
            let err = Workflow::from_json(payload).unwrap_err();
            assert!(
                err.to_string().contains("invalid workflow JSON"),
                "payload {payload}"
            );
        }
    }

    #[test]
    fn summary_from_workflow() {
        let workflow = Workflow::from_json(SAVED).expect("parse");
        let summary = WorkflowSummary::from(&workflow);

        assert_eq!(summary.id, workflow.id);
        assert_eq!(summary.name, "Expense approval");
        assert_eq!(summary.element_count, 3);
        assert_eq!(summary.updated_at, workflow.updated_at);
    }
}
