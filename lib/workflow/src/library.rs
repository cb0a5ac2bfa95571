//! The saved-workflow library behind the dashboard.
//!
//! The library validates saves, assigns ids to new workflows, and keeps the
//! repository's list in saved order.

use crate::catalog::WorkflowType;
use crate::definition::{Workflow, WorkflowSummary};
use crate::error::{LibraryError, StorageError};
use crate::repository::WorkflowRepository;
use chrono::Utc;
use flowsketch_core::WorkflowId;
use rootcause::Report;
use tracing::{debug, info};

/// A request to save the workflow currently being edited.
#[derive(Debug, Clone, Default)]
pub struct SaveRequest {
    /// Existing id when re-saving; `None` for a new workflow.
    pub id: Option<WorkflowId>,
    pub name: String,
    pub workflow_type: WorkflowType,
    /// The edited workflow; `None` when nothing has been drawn yet.
    pub workflow: Option<Workflow>,
}

impl SaveRequest {
    /// Creates a request for a new workflow.
    #[must_use]
    pub fn new(name: impl Into<String>, workflow_type: WorkflowType, workflow: Workflow) -> Self {
        Self {
            id: None,
            name: name.into(),
            workflow_type,
            workflow: Some(workflow),
        }
    }

    /// Targets an existing saved workflow.
    #[must_use]
    pub fn with_id(mut self, id: WorkflowId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Dashboard operations over a [`WorkflowRepository`].
#[derive(Debug)]
pub struct WorkflowLibrary<R> {
    repository: R,
}

impl<R: WorkflowRepository> WorkflowLibrary<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Lists every saved workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn list(&self) -> Result<Vec<WorkflowSummary>, Report<LibraryError>> {
        Ok(self.load()?.iter().map(WorkflowSummary::from).collect())
    }

    /// Lists workflows whose name or type contains `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn search(&self, term: &str) -> Result<Vec<WorkflowSummary>, Report<LibraryError>> {
        let needle = term.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|summary| {
                summary.name.to_lowercase().contains(&needle)
                    || summary.workflow_type.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Loads one workflow by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn get(&self, id: &WorkflowId) -> Result<Option<Workflow>, Report<LibraryError>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|workflow| workflow.id.as_ref() == Some(id)))
    }

    /// Validates and saves a workflow, returning the stored copy.
    ///
    /// A new workflow gets a fresh id and is appended. A workflow with an id
    /// replaces the saved entry with that id, or is appended if there is none.
    /// The creation time is kept and the update time set to now.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty
    /// - Category or subcategory is missing, or the pair is not in the catalog
    /// - There is no workflow to save
    /// - The repository fails
    pub fn save(&mut self, request: SaveRequest) -> Result<Workflow, Report<LibraryError>> {
        if request.name.trim().is_empty() {
            return Err(LibraryError::MissingName.into());
        }
        if !request.workflow_type.is_complete() {
            return Err(LibraryError::MissingCategory.into());
        }
        if !request.workflow_type.is_known() {
            return Err(LibraryError::UnknownType {
                workflow_type: request.workflow_type.to_string(),
            }
            .into());
        }
        let Some(mut workflow) = request.workflow else {
            return Err(LibraryError::MissingGraph.into());
        };

        let is_new = request.id.is_none();
        let id = request.id.unwrap_or_default();
        workflow.id = Some(id.clone());
        workflow.name = request.name;
        workflow.workflow_type = request.workflow_type.to_string();
        workflow.updated_at = Utc::now();

        let mut saved = self.load()?;
        match saved
            .iter_mut()
            .find(|existing| existing.id.as_ref() == Some(&id))
        {
            Some(existing) => *existing = workflow.clone(),
            None => saved.push(workflow.clone()),
        }
        self.store(&saved)?;

        info!(workflow_id = %id, is_new, name = %workflow.name, "workflow saved");
        Ok(workflow)
    }

    /// Deletes a saved workflow. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub fn delete(&mut self, id: &WorkflowId) -> Result<bool, Report<LibraryError>> {
        let mut saved = self.load()?;
        let before = saved.len();
        saved.retain(|workflow| workflow.id.as_ref() != Some(id));
        if saved.len() == before {
            debug!(workflow_id = %id, "nothing to delete");
            return Ok(false);
        }
        self.store(&saved)?;
        info!(workflow_id = %id, "workflow deleted");
        Ok(true)
    }

    fn load(&self) -> Result<Vec<Workflow>, Report<LibraryError>> {
        self.repository.load_all().map_err(storage_failed)
    }

    fn store(&mut self, workflows: &[Workflow]) -> Result<(), Report<LibraryError>> {
        self.repository.save_all(workflows).map_err(storage_failed)
    }
}

fn storage_failed(err: Report<StorageError>) -> Report<LibraryError> {
    LibraryError::Storage {
        details: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, Position};
    use crate::repository::MemoryRepository;
    use crate::store::GraphStore;

    fn drawn_workflow() -> Workflow {
        let mut store = GraphStore::default();
        store.add_element(ElementKind::Circle, Position::default(), "Start");
        store.into_workflow()
    }

    fn approval() -> WorkflowType {
        WorkflowType::new("process", "Approval")
    }

    #[test]
    fn save_new_assigns_id_and_appends() {
        let mut library = WorkflowLibrary::new(MemoryRepository::new());
        let saved = library
            .save(SaveRequest::new("Expenses", approval(), drawn_workflow()))
            .unwrap();

        let id = saved.id.clone().unwrap();
        assert!(id.as_str().starts_with("wf_"));
        assert_eq!(saved.workflow_type, "process/Approval");

        let listed = library.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, Some(id));
    }

    #[test]
    fn resave_replaces_and_keeps_created_at() {
        let mut library = WorkflowLibrary::new(MemoryRepository::new());
        let first = library
            .save(SaveRequest::new("Expenses", approval(), drawn_workflow()))
            .unwrap();
        let id = first.id.clone().unwrap();

        let second = library
            .save(
                SaveRequest::new("Expenses v2", approval(), first.clone()).with_id(id.clone()),
            )
            .unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        let listed = library.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Expenses v2");
    }

    #[test]
    fn save_validation() {
        let mut library = WorkflowLibrary::new(MemoryRepository::new());

        let err = library
            .save(SaveRequest::new("  ", approval(), drawn_workflow()))
            .unwrap_err();
        assert!(err.to_string().contains("workflow name"));

        let err = library
            .save(SaveRequest::new(
                "x",
                WorkflowType::new("process", ""),
                drawn_workflow(),
            ))
            .unwrap_err();
        assert!(err.to_string().contains("subcategory"));

        let err = library
            .save(SaveRequest::new(
                "x",
                WorkflowType::new("process", "Sales"),
                drawn_workflow(),
            ))
            .unwrap_err();
        assert!(err.to_string().contains("unknown workflow type"));

        let err = library
            .save(SaveRequest {
                name: "x".to_string(),
                workflow_type: approval(),
                ..SaveRequest::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("create a workflow"));

        assert!(library.list().unwrap().is_empty());
    }

    #[test]
    fn search_matches_name_or_type() {
        let mut library = WorkflowLibrary::new(MemoryRepository::new());
        library
            .save(SaveRequest::new("Expense approval", approval(), drawn_workflow()))
            .unwrap();
        library
            .save(SaveRequest::new(
                "Lead intake",
                WorkflowType::new("business", "Sales"),
                drawn_workflow(),
            ))
            .unwrap();

        assert_eq!(library.search("EXPENSE").unwrap().len(), 1);
        assert_eq!(library.search("business").unwrap()[0].name, "Lead intake");
        assert_eq!(library.search("").unwrap().len(), 2);
        assert!(library.search("nothing").unwrap().is_empty());
    }

    #[test]
    fn lists_prefilled_repository_in_saved_order() {
        let first = drawn_workflow().with_name("First");
        let second = drawn_workflow().with_name("Second");
        let library =
            WorkflowLibrary::new(MemoryRepository::with_workflows(vec![first, second]));

        let names: Vec<_> = library
            .list()
            .unwrap()
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn get_and_delete() {
        let mut library = WorkflowLibrary::new(MemoryRepository::new());
        let saved = library
            .save(SaveRequest::new("Expenses", approval(), drawn_workflow()))
            .unwrap();
        let id = saved.id.clone().unwrap();

        assert_eq!(library.get(&id).unwrap(), Some(saved));
        assert!(library.delete(&id).unwrap());
        assert!(!library.delete(&id).unwrap());
        assert_eq!(library.get(&id).unwrap(), None);
    }
}
