//! Operation reports.
//!
//! Every report is `Serialize` so front ends can emit it as JSON unchanged.

use serde::Serialize;

use crate::Snapshot;
use crate::types::Action;
use crate::types::Issue;

/// Result of validating a whole path.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Path as joined by the engine.
    pub path: String,

    /// Every issue found.
    pub issues: Vec<Issue>,

    /// State to pass back for incremental operations.
    pub snapshot: Snapshot,
}

impl ValidationReport {
    /// Returns `true` if no issue was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Result of cleaning a path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    /// Path before cleaning.
    pub original_path: String,

    /// Path after every action was applied.
    pub cleaned_path: String,

    /// Actions in the order they were applied.
    pub actions_applied: Vec<Action>,

    /// Whether the cleaned path was validated afterwards.
    pub validated: bool,

    /// Issues remaining after cleaning, if validated.
    pub issues: Vec<Issue>,
}

impl CleanReport {
    /// Returns `true` if cleaning changed the path.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.original_path != self.cleaned_path
    }

    /// Returns `Some(true)` if the cleaned path was validated without issues,
    /// `None` if it was not validated.
    #[must_use]
    pub fn is_valid(&self) -> Option<bool> {
        self.validated.then_some(self.issues.is_empty())
    }
}

/// Result of appending components to an existing path.
#[derive(Debug, Clone, Serialize)]
pub struct AddReport {
    /// Path after the additions.
    pub updated_path: String,

    /// Issues introduced by the new components.
    pub new_issues: Vec<Issue>,

    /// Every issue in the updated log.
    pub all_issues: Vec<Issue>,

    /// Component texts after the additions.
    pub parts: Vec<String>,

    /// State to pass back for the next operation.
    pub snapshot: Snapshot,
}

/// Result of removing one component from an existing path.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveReport {
    /// Path after the removal.
    pub updated_path: String,

    /// Text of the removed component.
    pub removed_part: String,

    /// Issues left after reindexing.
    pub remaining_issues: Vec<Issue>,

    /// Component texts after the removal.
    pub parts: Vec<String>,

    /// State to pass back for the next operation.
    pub snapshot: Snapshot,
}

/// Issues introduced by one step of an incremental build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildStep {
    /// One-based step number.
    pub step: usize,

    /// Component added at this step.
    pub part: String,

    /// Issues the component introduced.
    pub issues: Vec<Issue>,
}

/// Result of building a path one component at a time.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Path after every step.
    pub final_path: String,

    /// Issues found in the starting path.
    pub root_issues: Vec<Issue>,

    /// Per-step issues.
    pub steps: Vec<BuildStep>,

    /// Every issue in the final log.
    pub all_issues: Vec<Issue>,

    /// Component texts after every step.
    pub parts: Vec<String>,

    /// State to pass back for the next operation.
    pub snapshot: Snapshot,
}

impl BuildReport {
    /// Returns `true` if the built path has no issues.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.all_issues.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report_changed() {
        let report = CleanReport {
            original_path: "/a./b".into(),
            cleaned_path: "/a/b".into(),
            ..CleanReport::default()
        };
        assert!(report.changed());
        assert_eq!(report.is_valid(), None);
    }

    #[test]
    fn test_clean_report_validity() {
        let report = CleanReport {
            validated: true,
            ..CleanReport::default()
        };
        assert_eq!(report.is_valid(), Some(true));
        assert!(!report.changed());
    }

    #[test]
    fn test_clean_report_serializes() {
        let report = CleanReport {
            original_path: "/x ".into(),
            cleaned_path: "/x".into(),
            ..CleanReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["cleaned_path"], "/x");
        assert!(json["actions_applied"].as_array().unwrap().is_empty());
    }
}
