//! Mutable state of one path: the part store, the issue and action logs, and
//! the pending action queue.
//!
//! Every structural mutation goes through [`PathState`] so that component
//! indices, log records and the running length counter never disagree.

mod queue;

pub use queue::ActionQueue;

use crate::PathError;
use crate::Result;
use crate::types::Action;
use crate::types::Category;
use crate::types::CheckedStatus;
use crate::types::CleanedStatus;
use crate::types::ComponentType;
use crate::types::Details;
use crate::types::Issue;
use crate::types::Part;
use crate::types::RecordKind;
use crate::types::Subtype;

/// Splits a raw path string into component texts.
///
/// A single trailing separator is ignored, and so is a single leading one for
/// relative paths. Interior empty components are kept.
///
/// # Examples
///
/// ```
/// use fpv_core::state::split_path;
///
/// assert_eq!(split_path("/a//b.txt", "/", true), vec!["a", "", "b.txt"]);
/// assert_eq!(split_path("C:\\Users\\", "\\", false), vec!["C:", "Users"]);
/// assert_eq!(split_path("/home/x", "/", false), vec!["", "home", "x"]);
/// assert!(split_path("", "/", true).is_empty());
/// ```
#[must_use]
pub fn split_path(raw: &str, separator: &str, relative: bool) -> Vec<String> {
    if separator.is_empty() {
        return if raw.is_empty() {
            Vec::new()
        } else {
            vec![raw.to_string()]
        };
    }

    let mut body = raw;
    if relative {
        body = body.strip_prefix(separator).unwrap_or(body);
    }
    body = body.strip_suffix(separator).unwrap_or(body);

    if body.is_empty() {
        return Vec::new();
    }
    body.split(separator).map(str::to_string).collect()
}

/// Applies a component removal to a record's index.
///
/// Returns `false` when the record pointed at the removed component and must
/// be dropped.
pub(crate) fn shift_index(details: &mut Details, removed: usize) -> bool {
    match details.index {
        Some(index) if index == removed => false,
        Some(index) if index > removed => {
            details.index = Some(index - 1);
            true
        }
        _ => true,
    }
}

/// Components and logs of a single path.
#[derive(Debug, Clone)]
pub struct PathState {
    parts: Vec<Part>,
    separator: String,
    relative: bool,
    file_added: bool,
    text_chars: usize,
    issues: Vec<Issue>,
    actions: Vec<Action>,
    queue: ActionQueue,
}

impl PathState {
    /// Splits `raw` into a fresh state with every part unseen.
    ///
    /// When `file_added` is set the last component is marked as the file.
    #[must_use]
    pub fn new(raw: &str, separator: &str, relative: bool, file_added: bool) -> Self {
        let texts = split_path(raw, separator, relative);
        let last = texts.len().saturating_sub(1);
        let file_added = file_added && !texts.is_empty();

        let parts: Vec<Part> = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Part::new(index, text, file_added && index == last))
            .collect();
        let text_chars = parts.iter().map(Part::char_len).sum();

        Self {
            parts,
            separator: separator.to_string(),
            relative,
            file_added,
            text_chars,
            issues: Vec::new(),
            actions: Vec::new(),
            queue: ActionQueue::new(),
        }
    }

    /// Component separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns `true` for relative paths.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Returns `true` if the path ends with a file component.
    #[must_use]
    pub fn file_added(&self) -> bool {
        self.file_added
    }

    /// All components in order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Component at `index`.
    #[must_use]
    pub fn part(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }

    /// Component texts in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the path has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Index of the first component whose text equals `text`.
    #[must_use]
    pub fn find_index(&self, text: &str) -> Option<usize> {
        self.parts.iter().position(|p| p.text == text)
    }

    /// Joined path. Relative paths are prefixed with the separator.
    #[must_use]
    pub fn full_path(&self) -> String {
        let joined = self.texts().join(&self.separator);
        if self.relative && !self.parts.is_empty() {
            format!("{}{joined}", self.separator)
        } else {
            joined
        }
    }

    /// Character count of [`full_path`](Self::full_path), kept up to date
    /// without re-joining.
    #[must_use]
    pub fn path_length(&self) -> usize {
        let separators = if self.relative {
            self.parts.len()
        } else {
            self.parts.len().saturating_sub(1)
        };
        self.text_chars + separators * self.separator.chars().count()
    }

    /// Role of the component at `index`.
    #[must_use]
    pub fn classify(&self, index: usize) -> ComponentType {
        if index == 0 && !self.relative {
            ComponentType::Root
        } else if self.parts.get(index).is_some_and(|p| p.is_file) {
            ComponentType::File
        } else {
            ComponentType::Folder
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.parts.len() {
            Ok(())
        } else {
            Err(PathError::IndexOutOfRange {
                index,
                len: self.parts.len(),
            })
        }
    }

    /// Appends a component with both statuses unseen and returns its index.
    pub fn add_part(&mut self, text: impl Into<String>, is_file: bool) -> Result<usize> {
        let text = text.into();
        if self.file_added {
            return Err(PathError::AlreadyTerminated { text });
        }

        let index = self.parts.len();
        let part = Part::new(index, text, is_file);
        self.text_chars += part.char_len();
        self.parts.push(part);
        self.file_added = is_file;
        Ok(index)
    }

    /// Removes the component at `index` and reindexes everything after it.
    ///
    /// Issues and actions aimed at the removed component are dropped, later
    /// ones shift down by one. Returns the removed text.
    pub fn remove_part(&mut self, index: usize) -> Result<String> {
        self.check_index(index)?;

        let removed = self.parts.remove(index);
        self.text_chars -= removed.char_len();
        if removed.is_file {
            self.file_added = false;
        }
        for part in &mut self.parts[index..] {
            part.index -= 1;
        }

        self.issues.retain_mut(|issue| shift_index(&mut issue.details, index));
        self.actions.retain_mut(|action| shift_index(&mut action.details, index));
        let dropped = self.queue.reindex_after_remove(index);

        tracing::debug!(
            index,
            text = %removed.text,
            dropped_actions = dropped,
            "removed part and reindexed logs"
        );
        Ok(removed.text)
    }

    /// Replaces the text of the component at `index` and returns the old
    /// text.
    ///
    /// The component is reset to unseen and its issues are dropped.
    pub fn set_part(&mut self, index: usize, text: impl Into<String>) -> Result<String> {
        let old = self.replace_text(index, text.into())?;
        self.reset_part(index)?;
        Ok(old)
    }

    /// Marks the component at `index` unseen by both pipelines and drops its
    /// issues.
    pub fn reset_part(&mut self, index: usize) -> Result<()> {
        self.mark_part(index, CleanedStatus::Unseen, CheckedStatus::Unseen)?;
        self.remove_issues_for_part(index);
        Ok(())
    }

    fn replace_text(&mut self, index: usize, text: String) -> Result<String> {
        self.check_index(index)?;
        let new_chars = text.chars().count();
        let part = &mut self.parts[index];
        let old = std::mem::replace(&mut part.text, text);
        self.text_chars = self.text_chars - old.chars().count() + new_chars;
        Ok(old)
    }

    /// Sets both statuses of the component at `index`.
    pub fn mark_part(
        &mut self,
        index: usize,
        cleaned: CleanedStatus,
        checked: CheckedStatus,
    ) -> Result<()> {
        self.check_index(index)?;
        let part = &mut self.parts[index];
        part.cleaned_status = cleaned;
        part.checked_status = checked;
        Ok(())
    }

    pub(crate) fn set_checked(&mut self, index: usize, status: CheckedStatus) {
        if let Some(part) = self.parts.get_mut(index) {
            part.checked_status = status;
        }
    }

    pub(crate) fn set_cleaned(&mut self, index: usize, status: CleanedStatus) {
        if let Some(part) = self.parts.get_mut(index) {
            part.cleaned_status = status;
        }
    }

    pub(crate) fn reset_checked(&mut self) {
        for part in &mut self.parts {
            part.checked_status = CheckedStatus::Unseen;
        }
    }

    /// Records an issue and marks its component invalid.
    ///
    /// Returns `false` if an identical issue is already logged.
    pub fn add_issue(&mut self, issue: Issue) -> Result<bool> {
        issue.check()?;
        if let Some(index) = issue.index() {
            self.check_index(index)?;
        }
        if self.issues.contains(&issue) {
            return Ok(false);
        }
        if let Some(index) = issue.index() {
            self.set_checked(index, CheckedStatus::Invalid);
        }
        self.issues.push(issue);
        Ok(true)
    }

    /// Queues an action and records it in the action log.
    ///
    /// The targeted component becomes pending. Returns `false` if the same
    /// edit is already queued.
    pub fn add_action(&mut self, action: Action) -> Result<bool> {
        self.validate_action(&action)?;
        if !self.queue.push(action.clone()) {
            return Ok(false);
        }
        if let Some(index) = action.index() {
            self.set_cleaned(index, CleanedStatus::Pending);
        }
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        Ok(true)
    }

    /// Records an already applied action in the log without queueing it.
    pub fn log_action(&mut self, action: Action) -> Result<bool> {
        self.validate_action(&action)?;
        if self.actions.contains(&action) {
            return Ok(false);
        }
        self.actions.push(action);
        Ok(true)
    }

    fn validate_action(&self, action: &Action) -> Result<()> {
        action.check()?;
        match action.index() {
            Some(index) if action.subtype != Subtype::Add => self.check_index(index),
            _ => Ok(()),
        }
    }

    /// Issue log.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Action log, including actions still pending.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Pending action queue.
    #[must_use]
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    /// Issues referencing the component at `index`.
    #[must_use]
    pub fn issues_for_part(&self, index: usize) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.index() == Some(index))
            .collect()
    }

    /// Logged actions referencing the component at `index`.
    #[must_use]
    pub fn actions_for_part(&self, index: usize) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|action| action.index() == Some(index))
            .collect()
    }

    /// Indices of components with at least one issue of `category`.
    #[must_use]
    pub fn parts_with_category(&self, category: &Category) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .issues
            .iter()
            .filter(|issue| &issue.category == category)
            .filter_map(Issue::index)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Drops every issue of `category`. Returns how many were removed.
    pub fn remove_issues_by_category(&mut self, category: &Category) -> usize {
        let before = self.issues.len();
        self.issues.retain(|issue| &issue.category != category);
        before - self.issues.len()
    }

    /// Drops issues of `category` referencing component `index`.
    pub fn remove_issue(&mut self, index: usize, category: &Category) -> usize {
        let before = self.issues.len();
        self.issues
            .retain(|issue| !(issue.index() == Some(index) && &issue.category == category));
        before - self.issues.len()
    }

    /// Drops every issue referencing component `index`.
    pub fn remove_issues_for_part(&mut self, index: usize) -> usize {
        let before = self.issues.len();
        self.issues.retain(|issue| issue.index() != Some(index));
        before - self.issues.len()
    }

    /// Clears the issue log.
    pub fn remove_all_issues(&mut self) {
        self.issues.clear();
    }

    /// Applies every queued action in priority order.
    ///
    /// Afterwards each pending component becomes complete, is reset to
    /// unchecked and loses its stale issues. Returns the applied actions.
    pub fn drain(&mut self) -> Result<Vec<Action>> {
        let mut applied = Vec::with_capacity(self.queue.len());

        while let Some(action) = self.queue.pop() {
            self.apply(&action)?;
            tracing::debug!(
                category = %action.category,
                subtype = %action.subtype,
                priority = action.priority,
                index = ?action.index(),
                "applied action"
            );
            applied.push(action);
        }

        let pending: Vec<usize> = self
            .parts
            .iter()
            .filter(|p| p.cleaned_status == CleanedStatus::Pending)
            .map(|p| p.index)
            .collect();
        for index in pending {
            self.mark_part(index, CleanedStatus::Complete, CheckedStatus::Unseen)?;
            self.remove_issues_for_part(index);
        }

        Ok(applied)
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        match action.subtype {
            Subtype::Modify => {
                let (Some(index), Some(value)) = (action.index(), &action.details.new_value) else {
                    return Err(PathError::MalformedRecord {
                        kind: RecordKind::Action,
                        field: "details.new_value",
                    });
                };
                self.replace_text(index, value.clone())?;
            }
            Subtype::Remove => {
                let Some(index) = action.index() else {
                    return Err(PathError::MalformedRecord {
                        kind: RecordKind::Action,
                        field: "details.index",
                    });
                };
                self.remove_part(index)?;
            }
            Subtype::Add => {
                let Some(value) = &action.details.new_value else {
                    return Err(PathError::MalformedRecord {
                        kind: RecordKind::Action,
                        field: "details.new_value",
                    });
                };
                self.add_part(value.clone(), false)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn relative(raw: &str) -> PathState {
        PathState::new(raw, "/", true, false)
    }

    #[test]
    fn test_split_rules() {
        assert_eq!(split_path("a/b", "/", true), vec!["a", "b"]);
        assert_eq!(split_path("/a/b/", "/", true), vec!["a", "b"]);
        assert_eq!(split_path("a//b", "/", true), vec!["a", "", "b"]);
        assert_eq!(split_path("/", "/", true), Vec::<String>::new());
        assert_eq!(split_path("C:\\", "\\", false), vec!["C:"]);
        assert_eq!(split_path("abc", "", true), vec!["abc"]);
    }

    #[test]
    fn test_full_path_relative_and_absolute() {
        let state = relative("folder1/file.txt");
        assert_eq!(state.full_path(), "/folder1/file.txt");

        let state = PathState::new("C:\\Users\\me", "\\", false, false);
        assert_eq!(state.full_path(), "C:\\Users\\me");
        assert_eq!(state.classify(0), ComponentType::Root);

        assert_eq!(relative("").full_path(), "");
    }

    #[test]
    fn test_path_length_tracks_mutations() {
        let mut state = relative("ab/cd");
        assert_eq!(state.path_length(), state.full_path().chars().count());

        state.add_part("ééé", false).unwrap();
        assert_eq!(state.path_length(), state.full_path().chars().count());

        state.remove_part(0).unwrap();
        assert_eq!(state.path_length(), state.full_path().chars().count());

        state.set_part(0, "x").unwrap();
        assert_eq!(state.path_length(), state.full_path().chars().count());

        let absolute = PathState::new("C:\\a", "\\", false, false);
        assert_eq!(absolute.path_length(), 4);
    }

    #[test]
    fn test_file_flag_and_termination() {
        let mut state = PathState::new("docs/a.txt", "/", true, true);
        assert!(state.file_added());
        assert_eq!(state.classify(1), ComponentType::File);

        let err = state.add_part("more", false).unwrap_err();
        assert!(matches!(err, PathError::AlreadyTerminated { .. }));

        state.remove_part(1).unwrap();
        assert!(!state.file_added());
        assert_eq!(state.add_part("b.txt", true).unwrap(), 1);
        assert!(state.file_added());
    }

    #[test]
    fn test_remove_renumbers_parts() {
        let mut state = relative("a/b/c");
        assert_eq!(state.remove_part(0).unwrap(), "a");
        assert_eq!(state.texts(), vec!["b", "c"]);
        let indices: Vec<_> = state.parts().iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut state = relative("a");
        let err = state.remove_part(3).unwrap_err();
        assert!(matches!(err, PathError::IndexOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_remove_reindexes_issues() {
        let mut state = relative("a/b/c");
        state
            .add_issue(Issue::new(Category::EmptyPart, Details::at(1, "b"), "x"))
            .unwrap();
        state
            .add_issue(Issue::new(Category::Whitespace, Details::at(2, "c"), "y"))
            .unwrap();
        state
            .add_issue(Issue::new(Category::PathLength, Details::length(9, 5), "z"))
            .unwrap();

        state.remove_part(1).unwrap();

        assert_eq!(state.issues().len(), 2);
        assert_eq!(state.issues()[0].category, Category::Whitespace);
        assert_eq!(state.issues()[0].index(), Some(1));
        assert_eq!(state.issues()[1].index(), None);
    }

    #[test]
    fn test_add_issue_marks_invalid_and_dedups() {
        let mut state = relative("a/b");
        let issue = Issue::new(Category::EmptyPart, Details::at(1, "b"), "x");
        assert!(state.add_issue(issue.clone()).unwrap());
        assert!(!state.add_issue(issue).unwrap());
        assert_eq!(state.issues().len(), 1);
        assert_eq!(state.part(1).unwrap().checked_status, CheckedStatus::Invalid);
    }

    #[test]
    fn test_add_issue_rejects_malformed() {
        let mut state = relative("a");
        let issue = Issue::new(Category::EmptyPart, Details::default(), "x");
        assert!(matches!(
            state.add_issue(issue),
            Err(PathError::MalformedRecord { .. })
        ));
        assert!(state.issues().is_empty());
    }

    #[test]
    fn test_add_action_marks_pending() {
        let mut state = relative("a.");
        let action = Action::modify(Category::TrailingPeriod, 0, "a.", "a", "strip");
        assert!(state.add_action(action.clone()).unwrap());
        assert!(!state.add_action(action).unwrap());
        assert_eq!(state.part(0).unwrap().cleaned_status, CleanedStatus::Pending);
        assert_eq!(state.queue().len(), 1);
        assert_eq!(state.actions().len(), 1);
    }

    #[test]
    fn test_drain_remove_discards_moot_modify() {
        let mut state = relative("a/x/b");
        state
            .add_action(
                Action::modify(Category::Whitespace, 1, "x", "y", "m").with_priority(2),
            )
            .unwrap();
        state
            .add_action(Action::remove(Category::EmptyPart, 1, "x", "r").with_priority(1))
            .unwrap();

        let applied = state.drain().unwrap();

        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].subtype, Subtype::Remove);
        assert_eq!(state.texts(), vec!["a", "b"]);
        assert!(state.queue().is_empty());
    }

    #[test]
    fn test_drain_finalizes_pending_parts() {
        let mut state = relative("a./b");
        state
            .add_issue(Issue::new(Category::TrailingPeriod, Details::at(0, "a."), "p"))
            .unwrap();
        state
            .add_action(Action::modify(Category::TrailingPeriod, 0, "a.", "a", "strip"))
            .unwrap();
        state
            .mark_part(1, CleanedStatus::Complete, CheckedStatus::Complete)
            .unwrap();

        state.drain().unwrap();

        let first = state.part(0).unwrap();
        assert_eq!(first.text, "a");
        assert_eq!(first.cleaned_status, CleanedStatus::Complete);
        assert_eq!(first.checked_status, CheckedStatus::Unseen);
        assert!(state.issues().is_empty());
        assert_eq!(state.part(1).unwrap().checked_status, CheckedStatus::Complete);
    }

    #[test]
    fn test_drain_add_after_file_fails() {
        let mut state = PathState::new("a/f.txt", "/", true, true);
        state
            .add_action(Action::add(Category::Other("X".into()), "more", "append"))
            .unwrap();
        let err = state.drain().unwrap_err();
        assert!(matches!(err, PathError::AlreadyTerminated { .. }));
    }

    #[test]
    fn test_set_part_resets_statuses() {
        let mut state = relative("a/b");
        state
            .add_issue(Issue::new(Category::Whitespace, Details::at(1, "b"), "w"))
            .unwrap();
        state
            .mark_part(1, CleanedStatus::Complete, CheckedStatus::Invalid)
            .unwrap();

        assert_eq!(state.set_part(1, "c").unwrap(), "b");
        let part = state.part(1).unwrap();
        assert_eq!(part.cleaned_status, CleanedStatus::Unseen);
        assert_eq!(part.checked_status, CheckedStatus::Unseen);
        assert!(state.issues().is_empty());
    }

    #[test]
    fn test_parts_with_category_and_targeted_removal() {
        let mut state = relative("a/b/c");
        for index in [2, 0, 2] {
            let text = state.part(index).unwrap().text.clone();
            state
                .add_issue(Issue::new(
                    Category::Whitespace,
                    Details::at(index, text),
                    format!("w{index}"),
                ))
                .unwrap();
        }
        state
            .add_issue(Issue::new(Category::EmptyPart, Details::at(1, "b"), "e"))
            .unwrap();

        assert_eq!(state.parts_with_category(&Category::Whitespace), vec![0, 2]);
        assert_eq!(state.remove_issue(2, &Category::Whitespace), 1);
        assert_eq!(state.remove_issues_by_category(&Category::Whitespace), 1);
        assert_eq!(state.issues().len(), 1);
        assert_eq!(state.find_index("b"), Some(1));
        state.remove_all_issues();
        assert!(state.issues().is_empty());
    }
}
