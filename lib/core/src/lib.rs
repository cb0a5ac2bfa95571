//! Core types and utilities for flowsketch.
//!
//! This crate provides the identifier types and the error handling
//! foundation shared by the workflow model and the command-line front end.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ElementId, ParseIdError, WorkflowId};
