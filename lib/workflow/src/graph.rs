//! Flat workflow graph.
//!
//! A workflow graph is two ordered sequences:
//! - Elements (circles, arrows, text labels)
//! - Connections between elements
//!
//! Insertion order is significant: it drives the order of roots, labels and
//! children in the exported tree. Mutations are crate-visible only; callers
//! go through [`GraphStore`](crate::store::GraphStore) so that timestamps and
//! change notifications stay consistent.

use crate::connection::Connection;
use crate::element::{Element, ElementKind, Position};
use crate::error::GraphError;
use flowsketch_core::ElementId;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of a mutation addressed to a single element.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The element existed and was changed.
    Applied,
    /// No element with the given ID exists; nothing changed.
    NotFound,
}

impl Mutation {
    /// Returns whether the mutation changed the graph.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The flat element and connection lists of one workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    connections: Vec<Connection>,
}

impl WorkflowGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from existing lists without validating them.
    ///
    /// Use [`validate`](Self::validate) to check the result.
    #[must_use]
    pub fn from_parts(elements: Vec<Element>, connections: Vec<Connection>) -> Self {
        Self {
            elements,
            connections,
        }
    }

    /// Returns all elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns all connections in insertion order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns the number of elements in the graph.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the number of connections in the graph.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Returns a reference to an element by its ID.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| &el.id == id)
    }

    /// Returns whether an element with the given ID exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Returns connections leaving the given element, in insertion order.
    pub fn outgoing<'a>(&'a self, id: &'a ElementId) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |conn| &conn.from == id)
    }

    /// Returns the elements targeted by the given element's connections.
    ///
    /// Connections whose target no longer exists are skipped.
    pub fn targets<'a>(&'a self, id: &'a ElementId) -> impl Iterator<Item = &'a Element> + 'a {
        self.outgoing(id).filter_map(move |conn| self.element(&conn.to))
    }

    /// Returns whether any connection points at the given element.
    #[must_use]
    pub fn has_incoming(&self, id: &ElementId) -> bool {
        self.connections.iter().any(|conn| &conn.to == id)
    }

    /// Returns circle elements with no incoming connection of any kind.
    pub fn roots(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(move |el| el.is_circle() && !self.has_incoming(&el.id))
    }

    /// Appends a new element with a freshly generated ID.
    pub(crate) fn add_element(
        &mut self,
        kind: ElementKind,
        position: Position,
        content: impl Into<String>,
    ) -> &Element {
        self.elements.push(Element::new(kind, position, content));
        &self.elements[self.elements.len() - 1]
    }

    /// Replaces an element's position.
    pub(crate) fn move_element(&mut self, id: &ElementId, position: Position) -> Mutation {
        match self.elements.iter_mut().find(|el| &el.id == id) {
            Some(element) => {
                element.position = position;
                Mutation::Applied
            }
            None => Mutation::NotFound,
        }
    }

    /// Replaces an element's content.
    pub(crate) fn update_content(&mut self, id: &ElementId, content: impl Into<String>) -> Mutation {
        match self.elements.iter_mut().find(|el| &el.id == id) {
            Some(element) => {
                element.content = content.into();
                Mutation::Applied
            }
            None => Mutation::NotFound,
        }
    }

    /// Removes an element and every connection that references it.
    pub(crate) fn delete_element(&mut self, id: &ElementId) -> Mutation {
        let before = self.elements.len();
        self.elements.retain(|el| &el.id != id);
        if self.elements.len() == before {
            return Mutation::NotFound;
        }
        self.connections.retain(|conn| !conn.touches(id));
        Mutation::Applied
    }

    /// Appends a connection between two existing, distinct elements.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Source and target are the same element
    /// - Source or target element doesn't exist
    pub(crate) fn add_connection(
        &mut self,
        from: &ElementId,
        to: &ElementId,
        key: Option<String>,
    ) -> Result<&Connection, GraphError> {
        if from == to {
            return Err(GraphError::SelfLoop {
                element_id: from.clone(),
            });
        }
        for id in [from, to] {
            if !self.contains(id) {
                return Err(GraphError::ElementNotFound {
                    element_id: id.clone(),
                });
            }
        }

        let connection = Connection::new(from.clone(), to.clone());
        self.connections.push(match key {
            Some(key) => connection.with_key(key),
            None => connection,
        });
        Ok(&self.connections[self.connections.len() - 1])
    }

    /// Returns whether the connections form a directed cycle.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.as_digraph())
    }

    /// Validates the graph.
    ///
    /// Checks:
    /// - Element IDs are unique
    /// - Every connection references existing elements
    /// - No self-loops and no cycles
    ///
    /// # Errors
    ///
    /// Returns an error describing the first validation failure.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(&element.id) {
                return Err(GraphError::DuplicateElement {
                    element_id: element.id.clone(),
                });
            }
        }

        for conn in &self.connections {
            if conn.from == conn.to {
                return Err(GraphError::SelfLoop {
                    element_id: conn.from.clone(),
                });
            }
            if !seen.contains(&conn.from) || !seen.contains(&conn.to) {
                return Err(GraphError::DanglingConnection {
                    from: conn.from.clone(),
                    to: conn.to.clone(),
                });
            }
        }

        if self.is_cyclic() {
            return Err(GraphError::Cyclic);
        }

        Ok(())
    }

    fn as_digraph(&self) -> DiGraphMap<&str, ()> {
        let mut graph = DiGraphMap::new();
        for element in &self.elements {
            graph.add_node(element.id.as_str());
        }
        for conn in &self.connections {
            graph.add_edge(conn.from.as_str(), conn.to.as_str(), ());
        }
        graph
    }
}
