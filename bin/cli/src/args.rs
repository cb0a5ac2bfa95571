//! Command-line argument definitions for the flowsketch CLI.
//!
//! Subcommands mirror the dashboard: list and search saved workflows, show,
//! import and delete them, and export a workflow as a tree.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the flowsketch workflow tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Saved workflow file, overriding the configured storage path
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List saved workflows
    List {
        /// Only show workflows whose name or type contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print a saved workflow as flat JSON
    Show {
        /// Workflow id
        id: String,
    },

    /// Export a saved workflow as a tree
    Export {
        /// Workflow id
        id: String,

        /// Write the tree to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a flat workflow file to a tree without saving it
    Convert {
        /// Flat workflow JSON file
        input: PathBuf,

        /// Write the tree to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a flat workflow file into the library
    ///
    /// A file that carries an `id` replaces the saved workflow with that id,
    /// so re-importing the output of `show` updates it in place.
    Import {
        /// Flat workflow JSON file
        input: PathBuf,

        /// Name to save under, defaulting to the file's name
        #[arg(long)]
        name: Option<String>,

        /// Type as `category/subcategory`, defaulting to the file's type
        #[arg(long = "type")]
        workflow_type: Option<String>,
    },

    /// Check a flat workflow file for duplicate ids, dangling connections,
    /// self-loops and cycles
    Check {
        /// Flat workflow JSON file
        input: PathBuf,
    },

    /// Save a new empty workflow
    New {
        /// Workflow name
        name: String,

        /// Type as `category/subcategory`
        #[arg(long = "type")]
        workflow_type: String,

        /// Workflow key, defaulting to the configured key
        #[arg(long)]
        key: Option<String>,
    },

    /// Delete a saved workflow
    Delete {
        /// Workflow id
        id: String,
    },

    /// List the built-in workflow keys and categories
    Keys,
}
