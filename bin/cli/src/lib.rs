//! CLI logic for the flowsketch workflow tool.
//!
//! Each subcommand opens the saved-workflow library at the configured storage
//! path and writes its result to the given output.

mod args;
pub mod config;
pub mod error;

pub use args::{Args, Command};
pub use config::CliConfig;
pub use error::CliError;

use flowsketch_core::Result;
use flowsketch_workflow::catalog::{CATEGORIES, WORKFLOW_KEYS, key_label};
use flowsketch_workflow::{
    GraphStore, JsonFileRepository, SaveRequest, Workflow, WorkflowId, WorkflowLibrary,
    WorkflowSummary, WorkflowType,
};
use rootcause::Report;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

type Library = WorkflowLibrary<JsonFileRepository>;

/// Loads configuration for `args`, applying the `--storage` override.
///
/// # Errors
///
/// Returns `CliError::Config` if the configuration cannot be loaded.
pub fn load_config(args: &Args) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::load(args.config.as_deref()).map_err(|e| CliError::Config {
        details: e.to_string(),
    })?;
    if let Some(storage) = &args.storage {
        config.storage_path.clone_from(storage);
    }
    Ok(config)
}

/// Run the flowsketch CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Malformed workflow files
/// - Rejected saves and storage failures
/// - Unknown workflow ids
/// - Graphs that cannot be exported as a tree
pub fn run(args: &Args, config: &CliConfig, out: &mut dyn Write) -> Result<(), CliError> {
    let repository = JsonFileRepository::new(&config.storage_path);
    debug!(command = ?args.command, storage = %repository.path().display(), "running command");
    let mut library = WorkflowLibrary::new(repository);

    match &args.command {
        Command::List { search } => list(&library, search.as_deref(), out),
        Command::Show { id } => {
            let workflow = find(&library, id)?;
            let json = workflow.to_json_pretty().map_err(|e| CliError::Export {
                details: e.to_string(),
            })?;
            emit(out, &json)
        }
        Command::Export { id, output } => {
            let workflow = find(&library, id)?;
            let tree = render_tree(&workflow, config)?;
            write_output(output.as_deref(), &tree, out)
        }
        Command::Convert { input, output } => {
            let workflow = Workflow::from_json(&read_input(input)?).map_err(import_failed)?;
            let tree = render_tree(&workflow, config)?;
            write_output(output.as_deref(), &tree, out)
        }
        Command::Import {
            input,
            name,
            workflow_type,
        } => {
            let contents = read_input(input)?;
            let mut store = GraphStore::builder()
                .listener(|workflow: &Workflow| {
                    debug!(
                        elements = workflow.elements().len(),
                        connections = workflow.connections().len(),
                        "loaded workflow into editor"
                    );
                })
                .build();
            store.import_json(&contents).map_err(import_failed)?;
            let workflow = store.into_workflow();

            let existing_id = workflow.id.clone();
            let name = name.clone().unwrap_or_else(|| workflow.name.clone());
            let workflow_type: WorkflowType = workflow_type
                .as_deref()
                .unwrap_or(&workflow.workflow_type)
                .parse()
                .unwrap_or_default();
            let request = SaveRequest::new(name, workflow_type, workflow);
            let request = match existing_id {
                Some(id) => request.with_id(id),
                None => request,
            };
            let saved = library.save(request).map_err(library_failed)?;
            info!(path = %input.display(), "workflow imported");
            emit(out, &saved_id(&saved))
        }
        Command::Check { input } => {
            let workflow = Workflow::from_json(&read_input(input)?).map_err(import_failed)?;
            workflow.graph().validate().map_err(|e| CliError::Invalid {
                details: e.to_string(),
            })?;
            emit(
                out,
                &format!(
                    "ok: {} elements, {} connections",
                    workflow.graph().element_count(),
                    workflow.graph().connection_count()
                ),
            )
        }
        Command::New {
            name,
            workflow_type,
            key,
        } => {
            let key = key.as_deref().unwrap_or(&config.default_workflow_key);
            let workflow_type: WorkflowType = workflow_type.parse().unwrap_or_default();
            let saved = library
                .save(SaveRequest::new(
                    name.as_str(),
                    workflow_type,
                    Workflow::new(key),
                ))
                .map_err(library_failed)?;
            emit(out, &saved_id(&saved))
        }
        Command::Delete { id } => {
            let workflow_id = WorkflowId::from(id.as_str());
            if !library.delete(&workflow_id).map_err(library_failed)? {
                return Err(not_found(id));
            }
            emit(out, &format!("deleted {id}"))
        }
        Command::Keys => keys(out),
    }
}

fn list(
    library: &Library,
    search: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let summaries = match search {
        Some(term) => library.search(term),
        None => library.list(),
    }
    .map_err(library_failed)?;

    for summary in &summaries {
        emit(out, &summary_line(summary))?;
    }
    Ok(())
}

fn summary_line(summary: &WorkflowSummary) -> String {
    let id = summary.id.as_ref().map_or("-", WorkflowId::as_str);
    format!(
        "{id}\t{}\t{}\t{} elements\t{}",
        summary.name,
        summary.workflow_type,
        summary.element_count,
        summary.updated_at.to_rfc3339()
    )
}

fn keys(out: &mut dyn Write) -> Result<(), CliError> {
    for key in WORKFLOW_KEYS {
        emit(out, &format!("{}\t{}", key.value, key_label(key.value)))?;
    }
    for category in CATEGORIES {
        for subcategory in category.subcategories {
            emit(out, &format!("{}/{subcategory}", category.id))?;
        }
    }
    Ok(())
}

fn find(library: &Library, id: &str) -> Result<Workflow, CliError> {
    library
        .get(&WorkflowId::from(id))
        .map_err(library_failed)?
        .ok_or_else(|| not_found(id))
}

fn render_tree(workflow: &Workflow, config: &CliConfig) -> Result<String, CliError> {
    let tree = workflow
        .export_tree(&config.export.options())
        .map_err(|e| CliError::Export {
            details: e.to_string(),
        })?;
    let json = if config.export.pretty {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    };
    Ok(json.map_err(|e| CliError::Export {
        details: e.to_string(),
    })?)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    Ok(fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?)
}

fn write_output(
    path: Option<&Path>,
    contents: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(path) = path else {
        return emit(out, contents);
    };
    fs::write(path, contents).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), "tree written");
    Ok(())
}

fn emit(out: &mut dyn Write, line: &str) -> Result<(), CliError> {
    Ok(writeln!(out, "{line}").map_err(|e| CliError::Io {
        path: "stdout".to_string(),
        reason: e.to_string(),
    })?)
}

fn saved_id(workflow: &Workflow) -> String {
    workflow
        .id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn not_found(id: &str) -> Report<CliError> {
    CliError::NotFound {
        workflow_id: id.to_string(),
    }
    .into()
}

fn import_failed<E: std::fmt::Display>(err: E) -> Report<CliError> {
    CliError::Import {
        details: err.to_string(),
    }
    .into()
}

fn library_failed<E: std::fmt::Display>(err: E) -> Report<CliError> {
    CliError::Library {
        details: err.to_string(),
    }
    .into()
}
