//! Stateless reconstruction.
//!
//! A [`Snapshot`] is the serialized form of an engine: the joined path, the
//! file flag, and the issue and action logs. Loading one gives an engine that
//! treats every component referenced by a prior record as already processed,
//! so a follow-up `add_part` or `remove_part` does not re-check the whole
//! path.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::Engine;
use crate::PathOptions;
use crate::Policy;
use crate::Result;
use crate::state::PathState;
use crate::types::Action;
use crate::types::CheckedStatus;
use crate::types::CleanedStatus;
use crate::types::Issue;

/// Persistable engine state.
///
/// # Examples
///
/// ```
/// use fpv_core::Snapshot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let snapshot = Snapshot::from_json(
///     r#"{
///         "path": "/docs/report.",
///         "file_added": false,
///         "issues": [{
///             "category": "TRAILING_PERIOD",
///             "details": {"index": 1, "part": "report."},
///             "reason": "ends with a period"
///         }],
///         "actions": []
///     }"#,
/// )?;
/// assert_eq!(snapshot.issues.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Joined path.
    pub path: String,

    /// Whether the last component is a file.
    #[serde(default)]
    pub file_added: bool,

    /// Issue log.
    #[serde(default)]
    pub issues: Vec<Issue>,

    /// Action log.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Snapshot {
    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> Engine<'a> {
    /// Rebuilds an engine from a snapshot.
    ///
    /// Records are checked and loaded into the logs as they are; nothing is
    /// queued. Every component referenced by a record is marked as already
    /// validated and cleaned. The file flag comes from the snapshot; `options`
    /// only supplies separator and relative overrides.
    ///
    /// # Errors
    ///
    /// Returns `PathError::MalformedRecord` for a record missing a required
    /// field and `PathError::IndexOutOfRange` for a record pointing past the
    /// end of the path.
    pub fn from_snapshot(
        snapshot: &Snapshot,
        policy: &'a Policy,
        options: &PathOptions,
    ) -> Result<Self> {
        let (separator, relative) = policy.layout(options);
        let mut state = PathState::new(&snapshot.path, separator, relative, snapshot.file_added);

        let mut touched = BTreeSet::new();
        for issue in &snapshot.issues {
            state.add_issue(issue.clone())?;
            touched.extend(issue.index());
        }
        for action in &snapshot.actions {
            state.log_action(action.clone())?;
            touched.extend(action.index());
        }
        for &index in &touched {
            state.mark_part(index, CleanedStatus::Complete, CheckedStatus::Complete)?;
        }

        tracing::debug!(
            parts = state.len(),
            issues = state.issues().len(),
            actions = state.actions().len(),
            restored = touched.len(),
            "restored engine from snapshot"
        );
        Ok(Self::from_state(policy, state))
    }

    /// Current state in persistable form.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            path: self.full_path(),
            file_added: self.state().file_added(),
            issues: self.issues().to_vec(),
            actions: self.actions().to_vec(),
        }
    }
}
