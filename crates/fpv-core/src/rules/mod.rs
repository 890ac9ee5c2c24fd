//! Per-component rule pipeline.
//!
//! A [`Rule`] inspects one component and reports what is wrong with it
//! ([`Mode::Validate`]) or how to fix it ([`Mode::Clean`]). A policy arranges
//! rules into [`Pipelines`], one ordered list of [`Step`]s per
//! [`ComponentType`].
//!
//! Rules never touch the path state. The engine records what they return,
//! stamps each step's priority onto its actions, and threads the provisional
//! text from one cleaning step to the next.

mod characters;
mod format;
mod names;

pub use characters::ControlCharacters;
pub use characters::InvalidCharacters;
pub use characters::WideCharacters;
pub use format::ComponentLength;
pub use format::EmptyPart;
pub use format::LeadingPeriods;
pub use format::TrailingPeriods;
pub use format::Whitespace;
pub use names::RestrictedNames;
pub use names::RestrictedPatterns;
pub use names::RestrictedPrefixes;
pub use names::RestrictedRoot;
pub use names::RestrictedSuffixes;
pub use names::RootFormat;

use serde::Deserialize;
use serde::Serialize;

use crate::types::Action;
use crate::types::Category;
use crate::types::ComponentType;
use crate::types::Details;
use crate::types::Issue;

/// What a pipeline pass should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Record issues only.
    Validate,
    /// Queue corrective actions.
    Clean,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validate => write!(f, "validate"),
            Self::Clean => write!(f, "clean"),
        }
    }
}

/// Read-only view of the component a rule is checking.
#[derive(Debug, Clone, Copy)]
pub struct PartView<'a> {
    /// Component index.
    pub index: usize,
    /// Current (possibly provisional) text.
    pub text: &'a str,
    /// Role of the component.
    pub kind: ComponentType,
    /// Whether the component is the terminating file.
    pub is_file: bool,
}

/// Output of one rule for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    /// Issues found (validate mode).
    pub issues: Vec<Issue>,
    /// Actions to queue (clean mode).
    pub actions: Vec<Action>,
    /// Provisional text after this rule's fix, for the next cleaning step.
    pub cleaned: Option<String>,
}

impl Findings {
    /// Nothing to report.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A single issue.
    #[must_use]
    pub fn issue(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
            ..Self::default()
        }
    }

    /// Queues a removal of the component.
    #[must_use]
    pub fn remove(category: Category, part: &PartView<'_>, reason: impl Into<String>) -> Self {
        Self {
            actions: vec![Action::remove(category, part.index, part.text, reason)],
            ..Self::default()
        }
    }

    /// Returns `true` if nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.actions.is_empty()
    }

    /// Returns `true` if any queued action removes the component.
    #[must_use]
    pub fn removes_part(&self) -> bool {
        self.actions
            .iter()
            .any(|a| a.subtype == crate::types::Subtype::Remove)
    }
}

/// Reports `issue` in validate mode, or rewrites the component to `cleaned`
/// in clean mode.
///
/// A rewrite that would leave the component empty becomes a removal.
pub(crate) fn correct(
    part: &PartView<'_>,
    mode: Mode,
    issue: Issue,
    cleaned: String,
    action_reason: String,
) -> Findings {
    match mode {
        Mode::Validate => Findings::issue(issue),
        Mode::Clean if cleaned.is_empty() => Findings::remove(issue.category, part, action_reason),
        Mode::Clean => {
            let mut action = Action::modify(
                issue.category,
                part.index,
                part.text,
                cleaned.clone(),
                action_reason,
            );
            action.details.invalid_chars = issue.details.invalid_chars;
            Findings {
                issues: Vec::new(),
                actions: vec![action],
                cleaned: Some(cleaned),
            }
        }
    }
}

/// Reports `issue` in validate mode, or removes the component in clean mode.
pub(crate) fn reject(part: &PartView<'_>, mode: Mode, issue: Issue, action_reason: String) -> Findings {
    match mode {
        Mode::Validate => Findings::issue(issue),
        Mode::Clean => Findings::remove(issue.category, part, action_reason),
    }
}

/// Details pointing at the component being checked.
pub(crate) fn details(part: &PartView<'_>) -> Details {
    Details::at(part.index, part.text)
}

/// A check applied to a single path component.
pub trait Rule: Send + Sync + std::fmt::Debug {
    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Checks `part` and reports issues or corrective actions.
    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings;
}

/// A rule together with the priority of the actions it produces.
#[derive(Debug)]
pub struct Step {
    /// Rule to run.
    pub rule: Box<dyn Rule>,
    /// Priority stamped onto the rule's actions.
    pub priority: u32,
}

impl Step {
    /// Creates a step.
    pub fn new(rule: impl Rule + 'static, priority: u32) -> Self {
        Self {
            rule: Box::new(rule),
            priority,
        }
    }
}

/// Ordered steps for each component type.
#[derive(Debug, Default)]
pub struct Pipelines {
    /// Steps for the root component of an absolute path.
    pub root: Vec<Step>,
    /// Steps for intermediate components.
    pub folder: Vec<Step>,
    /// Steps for the terminating file component.
    pub file: Vec<Step>,
}

impl Pipelines {
    /// Steps in declared order for components of type `kind`.
    #[must_use]
    pub fn steps(&self, kind: ComponentType) -> &[Step] {
        match kind {
            ComponentType::Root => &self.root,
            ComponentType::Folder => &self.folder,
            ComponentType::File => &self.file,
        }
    }

    /// Steps for `kind` ordered for cleaning: by priority, then declared
    /// order.
    #[must_use]
    pub fn clean_order(&self, kind: ComponentType) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps(kind).iter().collect();
        steps.sort_by_key(|step| step.priority);
        steps
    }

    /// Total number of steps across all component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len() + self.folder.len() + self.file.len()
    }

    /// Returns `true` if no component type has any step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Subtype;

    fn view(text: &str) -> PartView<'_> {
        PartView {
            index: 3,
            text,
            kind: ComponentType::Folder,
            is_file: false,
        }
    }

    fn issue(text: &str) -> Issue {
        Issue::new(Category::TrailingPeriod, details(&view(text)), "trailing")
    }

    #[test]
    fn test_correct_validate_reports_issue() {
        let part = view("a.");
        let findings = correct(&part, Mode::Validate, issue("a."), "a".into(), "fix".into());
        assert_eq!(findings.issues.len(), 1);
        assert!(findings.actions.is_empty());
        assert!(findings.cleaned.is_none());
    }

    #[test]
    fn test_correct_clean_modifies() {
        let part = view("a.");
        let findings = correct(&part, Mode::Clean, issue("a."), "a".into(), "fix".into());
        let action = &findings.actions[0];
        assert_eq!(action.subtype, Subtype::Modify);
        assert_eq!(action.details.index, Some(3));
        assert_eq!(action.details.new_value.as_deref(), Some("a"));
        assert_eq!(findings.cleaned.as_deref(), Some("a"));
    }

    #[test]
    fn test_correct_clean_to_empty_removes() {
        let part = view("..");
        let findings = correct(&part, Mode::Clean, issue(".."), String::new(), "fix".into());
        assert!(findings.removes_part());
        assert!(findings.cleaned.is_none());
    }

    #[derive(Debug)]
    struct Noop;

    impl Rule for Noop {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn check(&self, _part: &PartView<'_>, _mode: Mode) -> Findings {
            Findings::none()
        }
    }

    #[test]
    fn test_clean_order_is_stable_by_priority() {
        let pipelines = Pipelines {
            folder: vec![Step::new(Noop, 3), Step::new(Noop, 1), Step::new(Noop, 3)],
            ..Pipelines::default()
        };
        let order: Vec<u32> = pipelines
            .clean_order(ComponentType::Folder)
            .iter()
            .map(|s| s.priority)
            .collect();
        assert_eq!(order, vec![1, 3, 3]);
        assert_eq!(pipelines.len(), 3);
        assert!(pipelines.steps(ComponentType::Root).is_empty());
    }
}
