//! Error types for path-state operations.

use thiserror::Error;

use crate::types::Issue;
use crate::types::RecordKind;

/// Result type alias using `PathError`.
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors raised by the path-state engine.
///
/// Validation findings are data, not errors: they are only surfaced through
/// [`PathError::Validation`] when a caller asks for strict validation.
#[derive(Error, Debug)]
pub enum PathError {
    /// A component was appended after the terminating file component.
    #[error("cannot add '{text}': path already ends with a file")]
    AlreadyTerminated {
        /// Text of the rejected component.
        text: String,
    },

    /// A component index does not exist.
    #[error("component index {index} out of range (path has {len} components)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of components in the path.
        len: usize,
    },

    /// An issue or action is missing a required field.
    #[error("malformed {kind}: missing or empty field '{field}'")]
    MalformedRecord {
        /// Record kind.
        kind: RecordKind,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Strict validation found issues.
    #[error("path is invalid: {} issue(s) found", issues.len())]
    Validation {
        /// Issues found during the pass.
        issues: Vec<Issue>,
    },

    /// Policy configuration could not be compiled.
    #[error("invalid policy: {reason}")]
    InvalidPolicy {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// Provider name did not match any built-in policy.
    #[error("unknown provider: {name}")]
    UnknownProvider {
        /// Name as given.
        name: String,
    },

    /// Snapshot or policy JSON could not be parsed or written.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl PathError {
    /// Returns `true` if this error comes from an invalid structural mutation
    /// or a malformed log record.
    ///
    /// # Examples
    ///
    /// ```
    /// use fpv_core::PathError;
    ///
    /// let err = PathError::IndexOutOfRange { index: 4, len: 2 };
    /// assert!(err.is_structural());
    ///
    /// let err = PathError::Validation { issues: vec![] };
    /// assert!(!err.is_structural());
    /// ```
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::AlreadyTerminated { .. }
                | Self::IndexOutOfRange { .. }
                | Self::MalformedRecord { .. }
        )
    }

    /// Returns the issues carried by a strict validation failure.
    #[must_use]
    pub fn issues(&self) -> Option<&[Issue]> {
        match self {
            Self::Validation { issues } => Some(issues),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Category;
    use crate::types::Details;

    #[test]
    fn test_already_terminated_display() {
        let err = PathError::AlreadyTerminated {
            text: "more".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot add 'more': path already ends with a file"
        );
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = PathError::IndexOutOfRange { index: 5, len: 3 };
        assert!(err.to_string().contains("index 5"));
        assert!(err.to_string().contains("3 components"));
    }

    #[test]
    fn test_malformed_record_display() {
        let err = PathError::MalformedRecord {
            kind: RecordKind::Action,
            field: "details.index",
        };
        assert_eq!(
            err.to_string(),
            "malformed action: missing or empty field 'details.index'"
        );
    }

    #[test]
    fn test_validation_carries_issues() {
        let issue = Issue::new(Category::EmptyPart, Details::at(1, ""), "Empty part");
        let err = PathError::Validation {
            issues: vec![issue.clone()],
        };
        assert_eq!(err.to_string(), "path is invalid: 1 issue(s) found");
        assert_eq!(err.issues().unwrap(), &[issue]);
        assert!(!err.is_structural());
    }

    #[test]
    fn test_snapshot_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PathError = serde_err.into();
        assert!(matches!(err, PathError::Snapshot(_)));
        assert!(err.issues().is_none());
    }

    #[test]
    fn test_structural_classification() {
        assert!(
            PathError::AlreadyTerminated {
                text: String::new()
            }
            .is_structural()
        );
        assert!(
            !PathError::UnknownProvider {
                name: "ftp".into()
            }
            .is_structural()
        );
        assert!(
            !PathError::InvalidPolicy {
                reason: "bad".into()
            }
            .is_structural()
        );
    }
}
