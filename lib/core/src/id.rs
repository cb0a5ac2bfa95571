//! Strongly-typed ID types for workflow entities.
//!
//! Persisted workflows carry ids as plain strings produced by whatever
//! editor wrote them, so every id type wraps an opaque `String`. Freshly
//! generated ids are a type prefix followed by a lowercase ULID, which keeps
//! them unique and roughly sortable by creation time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a strongly-typed, string-backed ID wrapper.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID from a randomly generated ULID.
            #[must_use]
            pub fn new() -> Self {
                Self(format!(
                    "{}_{}",
                    $prefix,
                    Ulid::new().to_string().to_ascii_lowercase()
                ))
            }

            /// Returns the prefix used for generated IDs.
            #[must_use]
            pub const fn prefix() -> &'static str {
                $prefix
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns the underlying string.
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(ParseIdError {
                        id_type: stringify!($name),
                        reason: "id must not be empty".to_string(),
                    });
                }
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Unique identifier for an element (circle, arrow, or text) in a workflow graph.
    ElementId,
    "el"
);

define_id!(
    /// Unique identifier for a saved workflow.
    WorkflowId,
    "wf"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_id_generated_with_prefix() {
        let id = ElementId::new();
        assert!(id.as_str().starts_with("el_"));
    }

    #[test]
    fn workflow_id_generated_with_prefix() {
        let id = WorkflowId::new();
        assert!(id.to_string().starts_with("wf_"));
    }

    #[test]
    fn generated_ids_are_unique() {
        use std::collections::HashSet;

        let ids: HashSet<ElementId> = (0..256).map(|_| ElementId::new()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn parse_accepts_foreign_ids() {
        let id: WorkflowId = "k3j9x0a1b".parse().expect("should parse");
        assert_eq!(id, "k3j9x0a1b");
    }

    #[test]
    fn parse_rejects_blank() {
        let result: Result<ElementId, _> = "   ".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "ElementId");
    }

    #[test]
    fn id_is_transparent_in_json() {
        let id = ElementId::from("A");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"A\"");
        let parsed: ElementId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }
}
