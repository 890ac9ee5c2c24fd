//! Compiled policies: a [`PolicyConfig`] turned into rule pipelines.

use regex::Regex;

use crate::PathError;
use crate::PathOptions;
use crate::PolicyConfig;
use crate::Result;
use crate::rules::ComponentLength;
use crate::rules::ControlCharacters;
use crate::rules::EmptyPart;
use crate::rules::InvalidCharacters;
use crate::rules::LeadingPeriods;
use crate::rules::Pipelines;
use crate::rules::RestrictedNames;
use crate::rules::RestrictedPatterns;
use crate::rules::RestrictedPrefixes;
use crate::rules::RestrictedRoot;
use crate::rules::RestrictedSuffixes;
use crate::rules::RootFormat;
use crate::rules::Step;
use crate::rules::TrailingPeriods;
use crate::rules::WideCharacters;
use crate::rules::Whitespace;

/// An immutable, ready-to-run policy.
///
/// Policies are shared by reference between engines and are `Send + Sync`.
///
/// # Examples
///
/// ```
/// use fpv_core::Policy;
/// use fpv_core::PolicyConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = Policy::from_config(PolicyConfig {
///     trailing_periods: true,
///     ..Default::default()
/// })?;
/// assert_eq!(policy.separator(), "/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Policy {
    config: PolicyConfig,
    pipelines: Pipelines,
}

impl Policy {
    /// Compiles `config` into pipelines.
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidPolicy` for an empty separator, a zero
    /// length limit, or a pattern that is not a valid regular expression.
    pub fn from_config(config: PolicyConfig) -> Result<Self> {
        if config.separator.is_empty() {
            return Err(invalid("separator must not be empty"));
        }
        if config.max_length == Some(0) {
            return Err(invalid("max_length must be positive"));
        }
        if config.max_component_length == Some(0) {
            return Err(invalid("max_component_length must be positive"));
        }

        let pipelines = build_pipelines(&config)?;
        tracing::debug!(
            policy = %config.name,
            steps = pipelines.len(),
            "compiled policy"
        );
        Ok(Self { config, pipelines })
    }

    /// Uses hand-built `pipelines` instead of deriving them from `config`.
    ///
    /// `config` still supplies the layout and the path-length limit.
    #[must_use]
    pub fn with_pipelines(config: PolicyConfig, pipelines: Pipelines) -> Self {
        Self { config, pipelines }
    }

    /// Source configuration.
    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Default separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.config.separator
    }

    /// Whether paths are relative by default.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.config.relative
    }

    /// Maximum joined path length, if limited.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.config.max_length
    }

    /// Priority of path-length truncation actions.
    #[must_use]
    pub fn path_length_priority(&self) -> u32 {
        self.config.priorities.path_length
    }

    /// Rule pipelines.
    #[must_use]
    pub fn pipelines(&self) -> &Pipelines {
        &self.pipelines
    }

    /// Separator and relative flag after applying `options`.
    #[must_use]
    pub fn layout<'o>(&'o self, options: &'o PathOptions) -> (&'o str, bool) {
        (
            options.separator.as_deref().unwrap_or(&self.config.separator),
            options.relative.unwrap_or(self.config.relative),
        )
    }
}

fn invalid(reason: impl Into<String>) -> PathError {
    PathError::InvalidPolicy {
        reason: reason.into(),
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(|e| invalid(format!("pattern '{p}': {e}"))))
        .collect()
}

/// Builds the root, folder and file pipelines for `config`.
///
/// Folder and file components share the same checks in the same order;
/// restricted roots and leading periods only apply to folders. The root of an
/// absolute path is only checked against the root patterns.
fn build_pipelines(config: &PolicyConfig) -> Result<Pipelines> {
    let p = &config.priorities;
    let restricted = compile(&config.restricted_patterns)?;
    let roots = compile(&config.root_patterns)?;

    let mut pipelines = Pipelines::default();
    if !roots.is_empty() {
        pipelines.root.push(Step::new(RootFormat::new(roots), 0));
    }

    for folder in [true, false] {
        let mut steps = Vec::new();
        if config.empty_parts {
            steps.push(Step::new(EmptyPart, p.empty_part));
        }
        if folder && !config.restricted_root.is_empty() {
            steps.push(Step::new(
                RestrictedRoot::new(&config.restricted_root),
                p.restricted_root,
            ));
        }
        if config.control_characters {
            steps.push(Step::new(ControlCharacters, p.control_characters));
        }
        if !config.invalid_characters.is_empty() {
            steps.push(Step::new(
                InvalidCharacters::new(&config.invalid_characters),
                p.invalid_characters,
            ));
        }
        if config.wide_characters {
            steps.push(Step::new(WideCharacters, p.wide_characters));
        }
        if !config.restricted_names.is_empty() {
            steps.push(Step::new(
                RestrictedNames::new(&config.restricted_names),
                p.restricted_names,
            ));
        }
        if !restricted.is_empty() {
            steps.push(Step::new(
                RestrictedPatterns::new(restricted.clone()),
                p.restricted_patterns,
            ));
        }
        if !config.restricted_prefixes.is_empty() {
            steps.push(Step::new(
                RestrictedPrefixes::new(&config.restricted_prefixes),
                p.restricted_prefixes,
            ));
        }
        if !config.restricted_suffixes.is_empty() {
            steps.push(Step::new(
                RestrictedSuffixes::new(&config.restricted_suffixes),
                p.restricted_suffixes,
            ));
        }
        if config.whitespace {
            steps.push(Step::new(Whitespace, p.whitespace));
        }
        if folder && config.leading_periods {
            steps.push(Step::new(LeadingPeriods, p.leading_periods));
        }
        if config.trailing_periods {
            steps.push(Step::new(TrailingPeriods, p.trailing_periods));
        }
        if let Some(max) = config.max_component_length {
            steps.push(Step::new(ComponentLength::new(max), p.component_length));
        }

        if folder {
            pipelines.folder = steps;
        } else {
            pipelines.file = steps;
        }
    }

    Ok(pipelines)
}
