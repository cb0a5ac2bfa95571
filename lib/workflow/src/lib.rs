//! Workflow graph model for flowsketch.
//!
//! This crate provides the in-memory model behind the workflow editor:
//!
//! - **Graph Model**: Ordered elements (circle, arrow, text) and connections
//! - **Graph Store**: The single owner of an editing session's workflow,
//!   with change notification to registered listeners
//! - **Tree Export**: The nested, root-first view of a flat graph
//! - **Library**: Saving, listing, searching and deleting workflows through a
//!   pluggable repository

pub mod catalog;
pub mod connection;
pub mod definition;
pub mod element;
pub mod error;
pub mod graph;
pub mod library;
pub mod observer;
pub mod repository;
pub mod store;
pub mod tree;

pub use catalog::{DEFAULT_WORKFLOW_KEY, WorkflowType};
pub use connection::Connection;
pub use definition::{Workflow, WorkflowSummary};
pub use element::{Element, ElementKind, Position};
pub use error::{GraphError, ImportError, LibraryError, StorageError};
pub use graph::{Mutation, WorkflowGraph};
pub use library::{SaveRequest, WorkflowLibrary};
pub use observer::ChangeListener;
pub use repository::{JsonFileRepository, MemoryRepository, WorkflowRepository};
pub use store::{GraphStore, GraphStoreBuilder};
pub use tree::{
    ChildPolicy, CyclePolicy, DEFAULT_MAX_DEPTH, ExportNode, ExportOptions, ExportTree,
    export_tree,
};

pub use flowsketch_core::{ElementId, WorkflowId};
