//! The graph store: one editing session's workflow and its listeners.
//!
//! All edits go through the store. Every mutation that changes the graph
//! bumps `updated_at` and then notifies each registered [`ChangeListener`]
//! with the full workflow, in registration order. Mutations addressed to an
//! unknown element return [`Mutation::NotFound`] and change nothing.

use crate::connection::Connection;
use crate::definition::Workflow;
use crate::element::{Element, ElementKind, Position};
use crate::error::{GraphError, ImportError};
use crate::graph::Mutation;
use crate::observer::ChangeListener;
use crate::tree::{ExportOptions, ExportTree};
use flowsketch_core::ElementId;
use rootcause::Report;
use std::fmt;
use tracing::{debug, warn};

/// Owns the workflow being edited.
pub struct GraphStore {
    workflow: Workflow,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl GraphStore {
    /// Creates a store for a workflow with a fixed set of listeners.
    #[must_use]
    pub fn new(workflow: Workflow, listeners: Vec<Box<dyn ChangeListener>>) -> Self {
        Self {
            workflow,
            listeners,
        }
    }

    /// Returns a builder for registering listeners one at a time.
    #[must_use]
    pub fn builder() -> GraphStoreBuilder {
        GraphStoreBuilder::default()
    }

    /// Returns the current workflow.
    #[must_use]
    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Consumes the store, returning the workflow.
    #[must_use]
    pub fn into_workflow(self) -> Workflow {
        self.workflow
    }

    /// Adds an element with a freshly generated ID.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        position: Position,
        content: impl Into<String>,
    ) -> Element {
        let element = self
            .workflow
            .graph_mut()
            .add_element(kind, position, content)
            .clone();
        debug!(element_id = %element.id, kind = %kind, "element added");
        self.commit();
        element
    }

    /// Moves an element.
    pub fn move_element(&mut self, id: &ElementId, position: Position) -> Mutation {
        let outcome = self.workflow.graph_mut().move_element(id, position);
        self.finish("move", id, outcome)
    }

    /// Replaces an element's content.
    pub fn update_content(&mut self, id: &ElementId, content: impl Into<String>) -> Mutation {
        let outcome = self.workflow.graph_mut().update_content(id, content);
        self.finish("update", id, outcome)
    }

    /// Deletes an element together with every connection that references it.
    pub fn delete_element(&mut self, id: &ElementId) -> Mutation {
        let before = self.workflow.connections().len();
        let outcome = self.workflow.graph_mut().delete_element(id);
        if outcome.is_applied() {
            debug!(
                element_id = %id,
                connections_removed = before - self.workflow.connections().len(),
                "cascading delete"
            );
        }
        self.finish("delete", id, outcome)
    }

    /// Connects two distinct, existing elements.
    ///
    /// The connection is tagged with `key`, or with the workflow's current
    /// key when `key` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is a self-loop or either endpoint
    /// doesn't exist. Nothing is added in that case.
    pub fn add_connection(
        &mut self,
        from: &ElementId,
        to: &ElementId,
        key: Option<&str>,
    ) -> Result<Connection, GraphError> {
        let key = key.unwrap_or(&self.workflow.workflow_key).to_string();
        let connection = self
            .workflow
            .graph_mut()
            .add_connection(from, to, Some(key))
            .inspect_err(|e| warn!(from = %from, to = %to, error = %e, "connection rejected"))?
            .clone();
        debug!(from = %from, to = %to, "connection added");
        self.commit();
        Ok(connection)
    }

    /// Replaces the workflow key. Existing connections keep their own key.
    pub fn set_workflow_key(&mut self, key: impl Into<String>) {
        self.workflow.workflow_key = key.into();
        debug!(key = %self.workflow.workflow_key, "workflow key changed");
        self.commit();
    }

    /// Replaces the whole workflow, keeping its timestamps.
    pub fn replace_workflow(&mut self, workflow: Workflow) {
        self.workflow = workflow;
        self.notify();
    }

    /// Replaces the workflow with one parsed from flat JSON.
    ///
    /// Structural problems such as dangling connections are logged, not
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is malformed; the current workflow is
    /// left unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<(), Report<ImportError>> {
        let workflow = Workflow::from_json(json)?;
        debug!(
            elements = workflow.elements().len(),
            connections = workflow.connections().len(),
            "workflow imported"
        );
        if let Err(e) = workflow.graph().validate() {
            warn!(error = %e, "imported workflow is not well-formed");
        }
        self.replace_workflow(workflow);
        Ok(())
    }

    /// Exports the current graph as a tree. Does not modify the store.
    ///
    /// # Errors
    ///
    /// See [`crate::tree::export_tree`].
    pub fn export_tree(&self, options: &ExportOptions) -> Result<ExportTree, GraphError> {
        self.workflow.export_tree(options)
    }

    fn finish(&mut self, operation: &'static str, id: &ElementId, outcome: Mutation) -> Mutation {
        match outcome {
            Mutation::Applied => {
                debug!(operation, element_id = %id, "element changed");
                self.commit();
            }
            Mutation::NotFound => {
                debug!(operation, element_id = %id, "element not found, ignoring");
            }
        }
        outcome
    }

    fn commit(&mut self) {
        self.workflow.touch();
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener.on_change(&self.workflow);
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(Workflow::default(), Vec::new())
    }
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("workflow", &self.workflow)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Builder for [`GraphStore`].
#[derive(Default)]
pub struct GraphStoreBuilder {
    workflow: Option<Workflow>,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl GraphStoreBuilder {
    /// Sets the initial workflow. Defaults to an empty one.
    #[must_use]
    pub fn workflow(mut self, workflow: Workflow) -> Self {
        self.workflow = Some(workflow);
        self
    }

    /// Registers a listener.
    #[must_use]
    pub fn listener(mut self, listener: impl ChangeListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    #[must_use]
    pub fn build(self) -> GraphStore {
        GraphStore::new(self.workflow.unwrap_or_default(), self.listeners)
    }
}
