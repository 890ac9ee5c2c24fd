//! High-level request API.
//!
//! Each function takes a request in its wire form (a raw path or a
//! [`Snapshot`]), drives an [`Engine`], and returns a serializable report that
//! carries the snapshot for the next call.

use crate::AddReport;
use crate::BuildReport;
use crate::CleanReport;
use crate::Engine;
use crate::PathOptions;
use crate::Policy;
use crate::RemoveReport;
use crate::Result;
use crate::Snapshot;
use crate::ValidationReport;
use crate::report::BuildStep;
use crate::rules::Mode;
use crate::types::Issue;

fn texts(engine: &Engine<'_>) -> Vec<String> {
    engine.parts().iter().map(|p| p.text.clone()).collect()
}

fn owned(issues: Vec<&Issue>) -> Vec<Issue> {
    issues.into_iter().cloned().collect()
}

/// Validates a whole path.
///
/// # Examples
///
/// ```
/// use fpv_core::PathOptions;
/// use fpv_core::Provider;
/// use fpv_core::validate_path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = Provider::Windows.policy()?;
/// let report = validate_path("C:\\Users\\CON\\notes.txt", &policy, &PathOptions::file())?;
/// assert!(!report.is_valid());
/// # Ok(())
/// # }
/// ```
pub fn validate_path(path: &str, policy: &Policy, options: &PathOptions) -> Result<ValidationReport> {
    let mut engine = Engine::new(path, policy, options);
    let issues = engine.validate()?;
    Ok(ValidationReport {
        path: engine.full_path(),
        issues,
        snapshot: engine.snapshot(),
    })
}

/// Cleans a whole path, optionally validating the result.
///
/// # Examples
///
/// ```
/// use fpv_core::PathOptions;
/// use fpv_core::Provider;
/// use fpv_core::clean_path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = Provider::OneDrive.policy()?;
/// let report = clean_path("Team//~$plan?.docx", &policy, &PathOptions::file(), true)?;
/// assert_eq!(report.cleaned_path, "/Team/plan.docx");
/// # Ok(())
/// # }
/// ```
pub fn clean_path(
    path: &str,
    policy: &Policy,
    options: &PathOptions,
    validate_after: bool,
) -> Result<CleanReport> {
    let mut engine = Engine::new(path, policy, options);
    engine.clean(validate_after)
}

/// Appends `parts` to the path described by `base`.
///
/// Only the new components are validated (when `validate` is set), plus the
/// path-wide length check. With `file_last` the last new component is the
/// file.
pub fn add_parts(
    base: &Snapshot,
    parts: &[String],
    file_last: bool,
    validate: bool,
    policy: &Policy,
    options: &PathOptions,
) -> Result<AddReport> {
    let mut engine = Engine::from_snapshot(base, policy, options)?;
    let before = engine.issues().to_vec();
    let mode = validate.then_some(Mode::Validate);

    for (i, part) in parts.iter().enumerate() {
        let is_file = file_last && i + 1 == parts.len();
        engine.add_part(part, is_file, mode)?;
    }

    let new_issues = engine
        .issues()
        .iter()
        .filter(|issue| !before.contains(issue))
        .cloned()
        .collect();
    Ok(AddReport {
        updated_path: engine.full_path(),
        new_issues,
        all_issues: engine.issues().to_vec(),
        parts: texts(&engine),
        snapshot: engine.snapshot(),
    })
}

/// Removes the component at `index` from the path described by `base`.
///
/// Issues pointing at the removed component are dropped and later ones are
/// reindexed. Only a component moved into first position is re-checked.
pub fn remove_part(
    base: &Snapshot,
    index: usize,
    policy: &Policy,
    options: &PathOptions,
) -> Result<RemoveReport> {
    let mut engine = Engine::from_snapshot(base, policy, options)?;
    let removed_part = engine.remove_part(index, None)?;
    Ok(RemoveReport {
        updated_path: engine.full_path(),
        removed_part,
        remaining_issues: engine.issues().to_vec(),
        parts: texts(&engine),
        snapshot: engine.snapshot(),
    })
}

/// Builds a path from `root` one component at a time, recording the issues
/// each step introduces.
pub fn build_path(
    root: &str,
    parts: &[String],
    file_last: bool,
    policy: &Policy,
    options: &PathOptions,
) -> Result<BuildReport> {
    let mut engine = Engine::new(root, policy, &options.clone().with_file(false));
    let root_issues = engine.validate()?;

    let mut steps = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let is_file = file_last && i + 1 == parts.len();
        let index = engine.add_part(part, is_file, Some(Mode::Validate))?;
        steps.push(BuildStep {
            step: i + 1,
            part: part.clone(),
            issues: owned(engine.issues_for_part(index)),
        });
    }

    Ok(BuildReport {
        final_path: engine.full_path(),
        root_issues,
        steps,
        all_issues: engine.issues().to_vec(),
        parts: texts(&engine),
        snapshot: engine.snapshot(),
    })
}
