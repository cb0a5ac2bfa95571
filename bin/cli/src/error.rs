//! CLI error types.

use std::fmt;

/// Errors reported by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Configuration could not be loaded.
    Config { details: String },
    /// A file could not be read or written.
    Io { path: String, reason: String },
    /// An input file is not a valid flat workflow.
    Import { details: String },
    /// The workflow library rejected the operation.
    Library { details: String },
    /// A workflow file failed structural validation.
    Invalid { details: String },
    /// The workflow could not be exported as a tree.
    Export { details: String },
    /// No saved workflow has this id.
    NotFound { workflow_id: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "configuration error: {details}"),
            Self::Io { path, reason } => write!(f, "{path}: {reason}"),
            Self::Import { details } => write!(f, "import failed: {details}"),
            Self::Library { details } => write!(f, "{details}"),
            Self::Invalid { details } => write!(f, "invalid workflow: {details}"),
            Self::Export { details } => write!(f, "export failed: {details}"),
            Self::NotFound { workflow_id } => write!(f, "no saved workflow with id {workflow_id}"),
        }
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = CliError::NotFound {
            workflow_id: "wf_1".to_string(),
        };
        assert_eq!(err.to_string(), "no saved workflow with id wf_1");

        let err = CliError::Io {
            path: "in.json".to_string(),
            reason: "denied".to_string(),
        };
        assert_eq!(err.to_string(), "in.json: denied");
    }
}
