//! Storage for the list of saved workflows.
//!
//! The whole list is read and written as one unit, the way a browser keeps
//! it under a single local-storage key.

use crate::definition::Workflow;
use crate::error::StorageError;
use rootcause::Report;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Trait for loading and saving the workflow list.
pub trait WorkflowRepository {
    /// Loads every saved workflow, in saved order.
    fn load_all(&self) -> Result<Vec<Workflow>, Report<StorageError>>;

    /// Replaces the saved list.
    fn save_all(&mut self, workflows: &[Workflow]) -> Result<(), Report<StorageError>>;
}

/// Keeps the workflow list in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    workflows: Vec<Workflow>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with workflows.
    #[must_use]
    pub fn with_workflows(workflows: Vec<Workflow>) -> Self {
        Self { workflows }
    }
}

impl WorkflowRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<Workflow>, Report<StorageError>> {
        Ok(self.workflows.clone())
    }

    fn save_all(&mut self, workflows: &[Workflow]) -> Result<(), Report<StorageError>> {
        self.workflows = workflows.to_vec();
        Ok(())
    }
}

/// Stores the workflow list as a JSON array in a single file.
///
/// A missing or empty file reads as an empty list. Writes go to a sibling
/// temporary file that is then renamed over the target. A list holding a
/// non-finite position is refused before anything is written.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

impl WorkflowRepository for JsonFileRepository {
    fn load_all(&self) -> Result<Vec<Workflow>, Report<StorageError>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.location(), "no saved workflows yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    location: self.location(),
                    reason: e.to_string(),
                }
                .into());
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let workflows: Vec<Workflow> =
            serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
                location: self.location(),
                reason: e.to_string(),
            })?;
        debug!(path = %self.location(), count = workflows.len(), "loaded workflows");
        Ok(workflows)
    }

    fn save_all(&mut self, workflows: &[Workflow]) -> Result<(), Report<StorageError>> {
        let write_failed = |e: &dyn std::fmt::Display| StorageError::WriteFailed {
            location: self.location(),
            reason: e.to_string(),
        };

        if let Some((workflow, element)) = workflows.iter().find_map(|workflow| {
            workflow
                .elements()
                .iter()
                .find(|el| !el.position.is_finite())
                .map(|el| (workflow, el))
        }) {
            warn!(
                path = %self.location(),
                workflow = %workflow.name,
                element_id = %element.id,
                "refusing to write non-finite position"
            );
            return Err(write_failed(&format!(
                "element {} in workflow '{}' has a non-finite position",
                element.id, workflow.name
            ))
            .into());
        }

        let json = serde_json::to_string_pretty(workflows).map_err(|e| write_failed(&e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_failed(&e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(|e| write_failed(&e))?;
        fs::rename(&tmp, &self.path).map_err(|e| write_failed(&e))?;

        debug!(path = %self.location(), count = workflows.len(), "saved workflows");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, Position};
    use crate::store::GraphStore;

    fn sample_workflow(name: &str) -> Workflow {
        let mut store = GraphStore::builder()
            .workflow(Workflow::new("approval").with_name(name))
            .build();
        let a = store.add_element(ElementKind::Circle, Position::new(10.0, 10.0), "Start");
        let b = store.add_element(ElementKind::Text, Position::new(50.0, 10.0), "go");
        store.add_connection(&a.id, &b.id, None).unwrap();
        store.into_workflow()
    }

    #[test]
    fn memory_repository_roundtrip() {
        let mut repo = MemoryRepository::new();
        assert!(repo.load_all().unwrap().is_empty());

        repo.save_all(&[sample_workflow("one")]).unwrap();
        let loaded = repo.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "one");
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("workflows.json"));
        assert_eq!(repo.path(), dir.path().join("workflows.json"));
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn file_repository_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("nested/workflows.json"));
        let workflows = vec![sample_workflow("one"), sample_workflow("two")];

        repo.save_all(&workflows).unwrap();
        let loaded = repo.load_all().unwrap();

        assert_eq!(loaded, workflows);
        assert!(!dir.path().join("nested/workflows.json.tmp").exists());
    }

    #[test]
    fn non_finite_position_leaves_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("workflows.json"));
        let good = sample_workflow("good");
        repo.save_all(std::slice::from_ref(&good)).unwrap();

        let mut store = GraphStore::builder()
            .workflow(Workflow::new("approval").with_name("bad"))
            .build();
        store.add_element(ElementKind::Circle, Position::new(f64::NAN, 0.0), "Lost");
        let bad = store.into_workflow();

        let err = repo.save_all(&[good.clone(), bad]).unwrap_err();
        assert!(err.to_string().contains("non-finite position"));
        assert_eq!(repo.load_all().unwrap(), vec![good]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflows.json");
        fs::write(&path, "{ definitely not a list").unwrap();

        let err = JsonFileRepository::new(&path).load_all().unwrap_err();
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflows.json");
        fs::write(&path, "\n").unwrap();

        assert!(JsonFileRepository::new(&path).load_all().unwrap().is_empty());
    }
}
