//! Path component type and its lifecycle statuses.

use serde::Deserialize;
use serde::Serialize;

/// Cleaning lifecycle of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanedStatus {
    /// The clean pipeline has not looked at this component yet.
    #[default]
    Unseen,
    /// At least one corrective action is queued for this component.
    Pending,
    /// Cleaning finished; nothing left to apply.
    Complete,
}

/// Validation lifecycle of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckedStatus {
    /// The validate pipeline has not looked at this component yet.
    #[default]
    Unseen,
    /// Validated without findings (or restored as already processed).
    Complete,
    /// At least one issue references this component.
    Invalid,
}

/// Role of a component within its path, used to select a rule pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    /// First component of an absolute path (`C:`, `root`, ...).
    Root,
    /// Any intermediate component.
    Folder,
    /// Last component of a file-terminated path.
    File,
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Folder => write!(f, "folder"),
            Self::File => write!(f, "file"),
        }
    }
}

/// One component of a path.
///
/// `index` is owned by the path state and renumbered on every structural
/// mutation; callers never set it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Zero-based position within the path.
    pub index: usize,

    /// Component text.
    pub text: String,

    /// Whether this component is the terminating file.
    pub is_file: bool,

    /// Cleaning status.
    pub cleaned_status: CleanedStatus,

    /// Validation status.
    pub checked_status: CheckedStatus,
}

impl Part {
    /// Creates an unseen component.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>, is_file: bool) -> Self {
        Self {
            index,
            text: text.into(),
            is_file,
            cleaned_status: CleanedStatus::Unseen,
            checked_status: CheckedStatus::Unseen,
        }
    }

    /// Length of the component in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true once both pipelines have finished with this component.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cleaned_status == CleanedStatus::Complete
            && self.checked_status != CheckedStatus::Unseen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_part_is_unseen() {
        let part = Part::new(2, "docs", false);
        assert_eq!(part.index, 2);
        assert_eq!(part.cleaned_status, CleanedStatus::Unseen);
        assert_eq!(part.checked_status, CheckedStatus::Unseen);
        assert!(!part.is_settled());
    }

    #[test]
    fn test_char_len_counts_chars_not_bytes() {
        let part = Part::new(0, "résumé", false);
        assert_eq!(part.char_len(), 6);
        assert_eq!(part.text.len(), 8);
    }

    #[test]
    fn test_settled_requires_both_pipelines() {
        let mut part = Part::new(0, "a", false);
        part.cleaned_status = CleanedStatus::Complete;
        assert!(!part.is_settled());
        part.checked_status = CheckedStatus::Invalid;
        assert!(part.is_settled());
    }

    #[test]
    fn test_component_type_display() {
        assert_eq!(ComponentType::Root.to_string(), "root");
        assert_eq!(ComponentType::File.to_string(), "file");
    }
}
