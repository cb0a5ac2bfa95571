//! Built-in workflow keys and workflow type categories.
//!
//! Workflow keys tag a graph and its connections; categories classify a
//! saved workflow as `category/subcategory`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The key given to new and imported workflows when none is specified.
pub const DEFAULT_WORKFLOW_KEY: &str = "approval";

/// A selectable workflow key with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowKey {
    pub label: &'static str,
    pub value: &'static str,
}

/// Keys offered by the editor. Any other string is a custom key.
pub const WORKFLOW_KEYS: &[WorkflowKey] = &[
    WorkflowKey {
        label: "Approval Flow",
        value: "approval",
    },
    WorkflowKey {
        label: "Review Process",
        value: "review",
    },
    WorkflowKey {
        label: "Decision Tree",
        value: "decision",
    },
    WorkflowKey {
        label: "Custom",
        value: "custom",
    },
];

/// Returns the display label for a key, or the key itself if it is custom.
#[must_use]
pub fn key_label(value: &str) -> &str {
    WORKFLOW_KEYS
        .iter()
        .find(|key| key.value == value)
        .map_or(value, |key| key.label)
}

/// A top-level workflow category and its subcategories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub subcategories: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "process",
        label: "Process",
        subcategories: &["Approval", "Review", "Decision"],
    },
    Category {
        id: "system",
        label: "System",
        subcategories: &["Integration", "Automation", "Monitoring"],
    },
    Category {
        id: "business",
        label: "Business",
        subcategories: &["Sales", "Marketing", "Support"],
    },
];

/// Looks up a category by its id.
#[must_use]
pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}

/// A workflow's `category/subcategory` classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowType {
    pub category: String,
    pub subcategory: String,
}

impl WorkflowType {
    #[must_use]
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    /// Returns true when both parts are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.category.is_empty() && !self.subcategory.is_empty()
    }

    /// Returns true when the pair names a catalog entry.
    #[must_use]
    pub fn is_known(&self) -> bool {
        category(&self.category)
            .is_some_and(|category| category.subcategories.contains(&self.subcategory.as_str()))
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.subcategory)
    }
}

impl FromStr for WorkflowType {
    type Err = std::convert::Infallible;

    /// Splits on the first `/`; missing parts parse as empty strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, subcategory) = s.split_once('/').unwrap_or((s, ""));
        Ok(Self::new(category, subcategory))
    }
}
