//! Tree export of a flat workflow graph.
//!
//! The export is a forest rooted at every circle element that nothing points
//! at. Each node lists the text labels it points at and recurses into every
//! element it points at, in connection order:
//!
//! ```json
//! { "key": "approval",
//!   "nodes": [{ "id": "A", "type": "circle", "content": "Start",
//!               "labels": ["go"], "children": [ ... ] }] }
//! ```
//!
//! The export is read-only and deterministic: the same graph always yields
//! the same tree.

use crate::definition::Workflow;
use crate::element::{Element, ElementKind};
use crate::error::GraphError;
use crate::graph::WorkflowGraph;
use flowsketch_core::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Which connection targets become children of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildPolicy {
    /// Every resolvable target, so text targets appear both as labels and
    /// as children.
    #[default]
    AllTargets,
    /// Only circle targets; text targets appear as labels only.
    CircleTargetsOnly,
}

/// What to do when traversal reaches an element already on the current path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Fail the export with `GraphError::CycleDetected`.
    #[default]
    Reject,
    /// Leave the repeated element out of its parent's children.
    Truncate,
}

/// Default limit on the nesting depth of an exported tree.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling the tree export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    #[serde(default)]
    pub children: ChildPolicy,
    #[serde(default)]
    pub cycles: CyclePolicy,
    /// Deepest level a node may sit at; roots are level 1.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            children: ChildPolicy::default(),
            cycles: CyclePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The exported forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTree {
    /// The workflow key at export time.
    pub key: String,
    /// One node per root element.
    pub nodes: Vec<ExportNode>,
}

/// One element in the exported tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub content: String,
    /// Contents of the text elements this element points at.
    pub labels: Vec<String>,
    pub children: Vec<ExportNode>,
}

/// Exports a graph as a forest of nested nodes.
///
/// # Errors
///
/// Returns an error if:
/// - A cycle is reachable from a root and `options.cycles` is
///   [`CyclePolicy::Reject`]
/// - A path from a root is longer than `options.max_depth`
pub fn export_tree(
    graph: &WorkflowGraph,
    key: &str,
    options: &ExportOptions,
) -> Result<ExportTree, GraphError> {
    let mut builder = TreeBuilder {
        graph,
        options,
        path: HashSet::new(),
    };

    let nodes = graph
        .roots()
        .map(|root| builder.build(root, 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        key,
        roots = nodes.len(),
        elements = graph.element_count(),
        "exported workflow tree"
    );

    Ok(ExportTree {
        key: key.to_string(),
        nodes,
    })
}

impl Workflow {
    /// Exports this workflow's graph under its current key.
    ///
    /// # Errors
    ///
    /// See [`export_tree`].
    pub fn export_tree(&self, options: &ExportOptions) -> Result<ExportTree, GraphError> {
        export_tree(self.graph(), &self.workflow_key, options)
    }
}

struct TreeBuilder<'a> {
    graph: &'a WorkflowGraph,
    options: &'a ExportOptions,
    path: HashSet<&'a ElementId>,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, element: &'a Element, depth: usize) -> Result<ExportNode, GraphError> {
        if depth > self.options.max_depth {
            warn!(
                element_id = %element.id,
                max_depth = self.options.max_depth,
                "tree export too deep"
            );
            return Err(GraphError::TooDeep {
                element_id: element.id.clone(),
                max_depth: self.options.max_depth,
            });
        }
        let graph = self.graph;
        self.path.insert(&element.id);

        let labels = graph
            .targets(&element.id)
            .filter(|target| target.is_text() && !target.content.is_empty())
            .map(|target| target.content.clone())
            .collect();

        let mut children = Vec::new();
        for target in graph.targets(&element.id) {
            if self.options.children == ChildPolicy::CircleTargetsOnly && !target.is_circle() {
                continue;
            }
            if self.path.contains(&target.id) {
                match self.options.cycles {
                    CyclePolicy::Reject => {
                        warn!(element_id = %target.id, "cycle reached during tree export");
                        return Err(GraphError::CycleDetected {
                            element_id: target.id.clone(),
                        });
                    }
                    CyclePolicy::Truncate => {
                        debug!(element_id = %target.id, "skipping repeated element");
                        continue;
                    }
                }
            }
            children.push(self.build(target, depth + 1)?);
        }

        self.path.remove(&element.id);

        Ok(ExportNode {
            id: element.id.clone(),
            kind: element.kind,
            content: element.content.clone(),
            labels,
            children,
        })
    }
}
