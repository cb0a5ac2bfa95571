//! Error types for the workflow crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `GraphError`: Graph operations (connections, validation, export)
//! - `ImportError`: Parsing a persisted workflow payload
//! - `StorageError`: Reading or writing the saved workflow list
//! - `LibraryError`: Dashboard-level operations (save validation, storage)

use flowsketch_core::ElementId;
use std::fmt;

/// Errors from graph operations.
///
/// These errors contain only information available at the graph layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Element with the given ID was not found in the graph.
    ElementNotFound { element_id: ElementId },
    /// A connection from an element to itself was requested.
    SelfLoop { element_id: ElementId },
    /// Two elements share the same ID.
    DuplicateElement { element_id: ElementId },
    /// A stored connection references an element that no longer exists.
    DanglingConnection { from: ElementId, to: ElementId },
    /// Traversal reached an element that is already on the current path.
    CycleDetected { element_id: ElementId },
    /// Tree export went deeper than the configured limit.
    TooDeep {
        element_id: ElementId,
        max_depth: usize,
    },
    /// Graph contains cycles.
    Cyclic,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementNotFound { element_id } => {
                write!(f, "element not found: {element_id}")
            }
            Self::SelfLoop { element_id } => {
                write!(f, "element {element_id} cannot connect to itself")
            }
            Self::DuplicateElement { element_id } => {
                write!(f, "duplicate element id: {element_id}")
            }
            Self::DanglingConnection { from, to } => {
                write!(f, "connection {from} -> {to} references a missing element")
            }
            Self::CycleDetected { element_id } => {
                write!(f, "cycle detected at element {element_id}")
            }
            Self::TooDeep {
                element_id,
                max_depth,
            } => write!(
                f,
                "tree export exceeds {max_depth} levels at element {element_id}"
            ),
            Self::Cyclic => write!(f, "graph contains cycles"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors from importing a persisted workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The payload is not valid JSON or does not have the workflow shape.
    Malformed { reason: String },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => write!(f, "invalid workflow JSON: {reason}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Errors from the workflow repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading the backing store failed.
    ReadFailed { location: String, reason: String },
    /// Writing the backing store failed.
    WriteFailed { location: String, reason: String },
    /// The stored data could not be decoded.
    Corrupt { location: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { location, reason } => {
                write!(f, "failed to read workflows from {location}: {reason}")
            }
            Self::WriteFailed { location, reason } => {
                write!(f, "failed to write workflows to {location}: {reason}")
            }
            Self::Corrupt { location, reason } => {
                write!(f, "stored workflows in {location} are corrupt: {reason}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// High-level errors from the workflow library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// The workflow has no name.
    MissingName,
    /// Category or subcategory was not selected.
    MissingCategory,
    /// There is no graph to save.
    MissingGraph,
    /// The workflow type is not part of the catalog.
    UnknownType { workflow_type: String },
    /// The underlying repository failed.
    Storage { details: String },
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "please enter a workflow name"),
            Self::MissingCategory => {
                write!(f, "please select both category and subcategory")
            }
            Self::MissingGraph => write!(f, "please create a workflow before saving"),
            Self::UnknownType { workflow_type } => {
                write!(f, "unknown workflow type '{workflow_type}'")
            }
            Self::Storage { details } => write!(f, "workflow storage error: {details}"),
        }
    }
}

impl std::error::Error for LibraryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_error_display() {
        let err = GraphError::ElementNotFound {
            element_id: ElementId::from("X"),
        };
        assert_eq!(err.to_string(), "element not found: X");
    }

    #[test]
    fn self_loop_display() {
        let err = GraphError::SelfLoop {
            element_id: ElementId::from("A"),
        };
        assert!(err.to_string().contains("cannot connect to itself"));
    }

    #[test]
    fn import_error_display() {
        let err = ImportError::Malformed {
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().starts_with("invalid workflow JSON"));
    }

    #[test]
    fn library_error_display() {
        assert!(LibraryError::MissingName.to_string().contains("name"));
        assert!(
            LibraryError::MissingCategory
                .to_string()
                .contains("subcategory")
        );
    }
}
