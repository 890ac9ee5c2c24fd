//! Incremental path validation and cleaning.
//!
//! [`Engine`] couples one [`PathState`] with a borrowed [`Policy`]. Each
//! component moves through its own validate and clean lifecycle, so repeated
//! calls only process what changed since the last pass.

use crate::CleanReport;
use crate::PathError;
use crate::PathOptions;
use crate::Policy;
use crate::Result;
use crate::rules::Mode;
use crate::rules::PartView;
use crate::state::PathState;
use crate::types::Action;
use crate::types::Category;
use crate::types::CheckedStatus;
use crate::types::CleanedStatus;
use crate::types::Details;
use crate::types::Issue;
use crate::types::Part;
use crate::types::Subtype;

/// Validates and cleans one path against a policy.
///
/// # Lifecycle
///
/// 1. Create with [`Engine::new`] or [`Engine::from_snapshot`]
/// 2. Call [`validate`](Engine::validate) and/or [`clean`](Engine::clean)
/// 3. Mutate with [`add_part`](Engine::add_part),
///    [`remove_part`](Engine::remove_part) or [`set_part`](Engine::set_part);
///    only the affected components are processed again
/// 4. Persist with [`snapshot`](Engine::snapshot)
///
/// # Examples
///
/// ```
/// use fpv_core::Engine;
/// use fpv_core::PathOptions;
/// use fpv_core::Provider;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = Provider::SharePoint.policy()?;
/// let mut engine = Engine::new("Shared/ draft./~$notes.docx", &policy, &PathOptions::file());
///
/// let issues = engine.validate()?;
/// assert_eq!(issues.len(), 3);
///
/// let report = engine.clean(true)?;
/// assert_eq!(report.cleaned_path, "/Shared/draft/notes.docx");
/// assert!(report.issues.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Engine<'a> {
    policy: &'a Policy,
    state: PathState,
}

impl<'a> Engine<'a> {
    /// Splits `path` using the policy layout, overridden by `options`.
    #[must_use]
    pub fn new(path: &str, policy: &'a Policy, options: &PathOptions) -> Self {
        let (separator, relative) = policy.layout(options);
        let state = PathState::new(path, separator, relative, options.file_added);
        tracing::debug!(
            policy = policy.name(),
            parts = state.len(),
            relative,
            "created path engine"
        );
        Self { policy, state }
    }

    pub(crate) fn from_state(policy: &'a Policy, state: PathState) -> Self {
        Self { policy, state }
    }

    /// Policy this engine checks against.
    #[must_use]
    pub fn policy(&self) -> &'a Policy {
        self.policy
    }

    /// Underlying path state.
    #[must_use]
    pub fn state(&self) -> &PathState {
        &self.state
    }

    /// Joined path.
    #[must_use]
    pub fn full_path(&self) -> String {
        self.state.full_path()
    }

    /// Length of the joined path in characters.
    #[must_use]
    pub fn path_length(&self) -> usize {
        self.state.path_length()
    }

    /// Components in order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        self.state.parts()
    }

    /// Full issue log.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        self.state.issues()
    }

    /// Action log.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        self.state.actions()
    }

    /// Actions queued but not applied yet, in application order.
    #[must_use]
    pub fn pending_actions(&self) -> Vec<&Action> {
        self.state.queue().iter().collect()
    }

    /// Issues referencing the component at `index`.
    #[must_use]
    pub fn issues_for_part(&self, index: usize) -> Vec<&Issue> {
        self.state.issues_for_part(index)
    }

    /// Returns `true` if the issue log is empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state.issues().is_empty()
    }

    fn indices_where(&self, pred: impl Fn(&Part) -> bool) -> Vec<usize> {
        self.state
            .parts()
            .iter()
            .filter(|p| pred(p))
            .map(|p| p.index)
            .collect()
    }

    /// Validates every component not checked yet.
    ///
    /// Returns the issues added by this pass; the whole log stays available
    /// through [`issues`](Self::issues).
    pub fn validate(&mut self) -> Result<Vec<Issue>> {
        let before = self.state.issues().to_vec();

        for index in self.indices_where(|p| p.checked_status == CheckedStatus::Unseen) {
            self.validate_part(index)?;
        }
        self.refresh_path_length()?;

        Ok(self
            .state
            .issues()
            .iter()
            .filter(|issue| !before.contains(issue))
            .cloned()
            .collect())
    }

    /// Validates and fails if the path has any issue.
    ///
    /// # Errors
    ///
    /// Returns `PathError::Validation` carrying the whole issue log.
    pub fn validate_strict(&mut self) -> Result<()> {
        self.validate()?;
        if self.state.issues().is_empty() {
            Ok(())
        } else {
            Err(PathError::Validation {
                issues: self.state.issues().to_vec(),
            })
        }
    }

    /// Forgets every issue and validates all components from scratch.
    pub fn revalidate(&mut self) -> Result<Vec<Issue>> {
        self.state.remove_all_issues();
        self.state.reset_checked();
        self.validate()
    }

    /// Cleans every component not cleaned yet and applies the resulting
    /// actions in priority order.
    ///
    /// Path-length truncation runs once the component fixes have settled.
    /// With `validate_after` the cleaned path is validated and the report
    /// carries the remaining issues.
    pub fn clean(&mut self, validate_after: bool) -> Result<CleanReport> {
        let original_path = self.state.full_path();

        for index in self.indices_where(|p| p.cleaned_status == CleanedStatus::Unseen) {
            self.clean_part(index)?;
        }
        let actions_applied = self.settle()?;

        let issues = if validate_after {
            self.validate()?;
            self.state.issues().to_vec()
        } else {
            self.refresh_path_length()?;
            Vec::new()
        };

        tracing::debug!(
            from = %original_path,
            to = %self.state.full_path(),
            applied = actions_applied.len(),
            "cleaned path"
        );
        Ok(CleanReport {
            original_path,
            cleaned_path: self.state.full_path(),
            actions_applied,
            validated: validate_after,
            issues,
        })
    }

    /// Appends a component and processes only that component.
    ///
    /// With `Mode::Clean` the new component's fixes are applied immediately,
    /// so it may be rewritten or removed. Returns the index it was added at.
    ///
    /// # Errors
    ///
    /// Returns `PathError::AlreadyTerminated` if the path already ends with a
    /// file.
    pub fn add_part(&mut self, text: &str, is_file: bool, mode: Option<Mode>) -> Result<usize> {
        let index = self.state.add_part(text, is_file)?;
        tracing::debug!(index, text, ?mode, "added part");
        self.process(index, mode)?;
        Ok(index)
    }

    /// Removes the component at `index` and returns its text.
    ///
    /// Issues and actions are reindexed. A component moved into first
    /// position is checked again there. With a mode, components not yet
    /// processed by that mode are processed.
    pub fn remove_part(&mut self, index: usize, mode: Option<Mode>) -> Result<String> {
        let removed = self.state.remove_part(index)?;
        if index == 0 {
            self.reexamine_first()?;
        }

        match mode {
            Some(Mode::Validate) => {
                self.validate()?;
            }
            Some(Mode::Clean) => {
                self.clean(false)?;
            }
            None => self.refresh_path_length()?,
        }
        Ok(removed)
    }

    /// Replaces the text of the component at `index`, returning the old text,
    /// and processes only that component.
    pub fn set_part(&mut self, index: usize, text: &str, mode: Option<Mode>) -> Result<String> {
        let old = self.state.set_part(index, text)?;
        tracing::debug!(index, from = %old, to = text, "replaced part");
        self.process(index, mode)?;
        Ok(old)
    }

    fn process(&mut self, index: usize, mode: Option<Mode>) -> Result<()> {
        match mode {
            Some(Mode::Validate) => self.validate_part(index)?,
            Some(Mode::Clean) => {
                self.clean_part(index)?;
                self.settle()?;
            }
            None => {}
        }
        self.refresh_path_length()
    }

    fn validate_part(&mut self, index: usize) -> Result<()> {
        let policy = self.policy;
        let kind = self.state.classify(index);
        let part = self.state.part(index).ok_or(PathError::IndexOutOfRange {
            index,
            len: self.state.len(),
        })?;
        let view = PartView {
            index,
            text: &part.text,
            kind,
            is_file: part.is_file,
        };

        let mut found = Vec::new();
        for step in policy.pipelines().steps(kind) {
            let findings = step.rule.check(&view, Mode::Validate);
            tracing::trace!(
                rule = step.rule.name(),
                index,
                issues = findings.issues.len(),
                "validated part"
            );
            found.extend(findings.issues);
        }

        let status = if found.is_empty() {
            CheckedStatus::Complete
        } else {
            CheckedStatus::Invalid
        };
        for issue in found {
            self.state.add_issue(issue)?;
        }
        self.state.set_checked(index, status);
        Ok(())
    }

    fn clean_part(&mut self, index: usize) -> Result<()> {
        let policy = self.policy;
        let kind = self.state.classify(index);
        let part = self.state.part(index).ok_or(PathError::IndexOutOfRange {
            index,
            len: self.state.len(),
        })?;
        let is_file = part.is_file;
        let mut text = part.text.clone();

        let mut actions = Vec::new();
        for step in policy.pipelines().clean_order(kind) {
            let view = PartView {
                index,
                text: &text,
                kind,
                is_file,
            };
            let findings = step.rule.check(&view, Mode::Clean);
            tracing::trace!(
                rule = step.rule.name(),
                index,
                actions = findings.actions.len(),
                "cleaned part"
            );

            let removes = findings.removes_part();
            actions.extend(
                findings
                    .actions
                    .into_iter()
                    .map(|action| action.with_priority(step.priority)),
            );
            if removes {
                break;
            }
            if let Some(cleaned) = findings.cleaned {
                text = cleaned;
            }
        }

        let status = if actions.is_empty() {
            CleanedStatus::Complete
        } else {
            CleanedStatus::Pending
        };
        for action in actions {
            self.state.add_action(action)?;
        }
        self.state.set_cleaned(index, status);
        Ok(())
    }

    /// Drains the queue, queues path-length truncation against the settled
    /// components, and drains again.
    fn settle(&mut self) -> Result<Vec<Action>> {
        let mut applied = self.drain()?;
        if self.queue_truncation()? > 0 {
            applied.extend(self.drain()?);
        }
        Ok(applied)
    }

    /// Drains the queue until no removal at index 0 is left unexamined.
    ///
    /// Each removal at index 0 moves a new component into first position,
    /// which is cleaned again under the first-position rules.
    fn drain(&mut self) -> Result<Vec<Action>> {
        let mut applied = self.state.drain()?;
        let mut seen = 0;
        while applied[seen..]
            .iter()
            .any(|a| a.subtype == Subtype::Remove && a.index() == Some(0))
        {
            seen = applied.len();
            if !self.reexamine_first()? {
                break;
            }
            self.clean_part(0)?;
            applied.extend(self.state.drain()?);
        }
        Ok(applied)
    }

    /// Re-derives the findings of the component now at index 0.
    ///
    /// Its earlier findings were made at another position, where root and
    /// restricted-root rules did not apply. A checked component is validated
    /// again right away; a cleaned one becomes unseen for the next clean.
    /// Returns `false` if the path is empty.
    fn reexamine_first(&mut self) -> Result<bool> {
        let Some(part) = self.state.part(0) else {
            return Ok(false);
        };
        let was_checked = part.checked_status != CheckedStatus::Unseen;
        if part.cleaned_status == CleanedStatus::Complete {
            self.state.set_cleaned(0, CleanedStatus::Unseen);
        }
        if was_checked {
            self.state.remove_issues_for_part(0);
            self.validate_part(0)?;
        }
        Ok(true)
    }

    /// Queues removal of folder components until the path fits the policy's
    /// length limit. The root and the file are kept.
    fn queue_truncation(&mut self) -> Result<usize> {
        let Some(max) = self.policy.max_length() else {
            return Ok(0);
        };
        if self.state.path_length() <= max {
            return Ok(0);
        }

        let separator = self.state.separator().chars().count();
        let relative = self.state.is_relative();
        let cost = |part: &Part| {
            let joint = if relative || part.index > 0 { separator } else { 0 };
            part.char_len() + joint
        };
        let reserved = |part: &Part| part.is_file || (part.index == 0 && !relative);

        let mut used: usize = self
            .state
            .parts()
            .iter()
            .filter(|p| reserved(p))
            .map(cost)
            .sum();

        let mut removals = Vec::new();
        for part in self.state.parts().iter().filter(|p| !reserved(p)) {
            let next = used + cost(part);
            if next > max {
                removals.push(
                    Action::remove(
                        Category::PathLength,
                        part.index,
                        part.text.as_str(),
                        format!(
                            "Marked part '{}' for removal due to exceeding path length limit.",
                            part.text
                        ),
                    )
                    .with_priority(self.policy.path_length_priority()),
                );
            } else {
                used = next;
            }
        }

        let queued = removals.len();
        for action in removals {
            self.state.add_action(action)?;
        }
        tracing::debug!(max, queued, "queued path-length truncation");
        Ok(queued)
    }

    /// Replaces any `PATH_LENGTH` issue with one describing the current
    /// length, if it exceeds the limit.
    fn refresh_path_length(&mut self) -> Result<()> {
        self.state.remove_issues_by_category(&Category::PathLength);
        let Some(max) = self.policy.max_length() else {
            return Ok(());
        };
        let current = self.state.path_length();
        if current > max {
            self.state.add_issue(Issue::new(
                Category::PathLength,
                Details::length(current, max),
                format!("Path exceeds maximum length of {max} characters."),
            ))?;
        }
        Ok(())
    }
}
