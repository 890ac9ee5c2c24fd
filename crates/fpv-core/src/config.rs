//! Policy configuration for path validation.

use serde::Deserialize;
use serde::Serialize;

use crate::Result;

/// Per-category priority of corrective actions. Lower values are applied
/// first.
///
/// Removals that change component boundaries (empty parts, restricted root,
/// path length) run before character fixes, which run before trailing-period
/// stripping so a trailing invalid character cannot hide a trailing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Priorities {
    /// Empty component removal.
    pub empty_part: u32,
    /// Restricted root folder removal.
    pub restricted_root: u32,
    /// Path-length truncation.
    pub path_length: u32,
    /// Invalid character stripping.
    pub invalid_characters: u32,
    /// Control character stripping.
    pub control_characters: u32,
    /// Wide character stripping.
    pub wide_characters: u32,
    /// Restricted name removal.
    pub restricted_names: u32,
    /// Restricted pattern removal.
    pub restricted_patterns: u32,
    /// Restricted prefix stripping.
    pub restricted_prefixes: u32,
    /// Restricted suffix stripping.
    pub restricted_suffixes: u32,
    /// Whitespace trimming.
    pub whitespace: u32,
    /// Leading period stripping.
    pub leading_periods: u32,
    /// Trailing period stripping.
    pub trailing_periods: u32,
    /// Component truncation.
    pub component_length: u32,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            empty_part: 1,
            restricted_root: 1,
            path_length: 1,
            invalid_characters: 2,
            control_characters: 2,
            wide_characters: 2,
            restricted_names: 2,
            restricted_patterns: 2,
            restricted_prefixes: 2,
            restricted_suffixes: 2,
            whitespace: 2,
            leading_periods: 2,
            trailing_periods: 3,
            component_length: 4,
        }
    }
}

/// Naming rules of one target environment.
///
/// Every field has a default, so a JSON policy file only needs the rules it
/// cares about.
///
/// # Examples
///
/// ```
/// use fpv_core::PolicyConfig;
///
/// let config = PolicyConfig {
///     name: "intranet".to_string(),
///     max_length: Some(120),
///     invalid_characters: "#%".to_string(),
///     trailing_periods: true,
///     ..Default::default()
/// };
/// assert!(!config.is_name_restricted("anything"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Display name.
    pub name: String,

    /// Component separator.
    pub separator: String,

    /// Whether paths are relative unless a caller says otherwise.
    pub relative: bool,

    /// Maximum length of the joined path, in characters.
    pub max_length: Option<usize>,

    /// Maximum length of a single component, in characters.
    pub max_component_length: Option<usize>,

    /// Characters forbidden anywhere in a component.
    pub invalid_characters: String,

    /// Reserved component names (case-insensitive).
    pub restricted_names: Vec<String>,

    /// Reserved component prefixes (case-insensitive).
    pub restricted_prefixes: Vec<String>,

    /// Reserved component suffixes (case-insensitive).
    pub restricted_suffixes: Vec<String>,

    /// Regular expressions matching reserved component names.
    pub restricted_patterns: Vec<String>,

    /// Names not allowed as the first component.
    pub restricted_root: Vec<String>,

    /// Regular expressions the root of an absolute path must match.
    pub root_patterns: Vec<String>,

    /// Forbid components ending with a period.
    pub trailing_periods: bool,

    /// Forbid folder names starting with a period.
    pub leading_periods: bool,

    /// Forbid leading and trailing whitespace.
    pub whitespace: bool,

    /// Forbid empty components.
    pub empty_parts: bool,

    /// Forbid control characters.
    pub control_characters: bool,

    /// Forbid characters needing four bytes in UTF-8.
    pub wide_characters: bool,

    /// Action priorities.
    pub priorities: Priorities,
}

impl Default for PolicyConfig {
    /// Creates a minimal relative `/`-separated policy that only rejects
    /// empty components.
    fn default() -> Self {
        Self {
            name: "custom".to_string(),
            separator: "/".to_string(),
            relative: true,
            max_length: None,
            max_component_length: None,
            invalid_characters: String::new(),
            restricted_names: Vec::new(),
            restricted_prefixes: Vec::new(),
            restricted_suffixes: Vec::new(),
            restricted_patterns: Vec::new(),
            restricted_root: Vec::new(),
            root_patterns: Vec::new(),
            trailing_periods: false,
            leading_periods: false,
            whitespace: false,
            empty_parts: true,
            control_characters: false,
            wide_characters: false,
            priorities: Priorities::default(),
        }
    }
}

impl PolicyConfig {
    /// Parses a policy from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the policy as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns `true` if `component` is a reserved name.
    ///
    /// Comparison is case-insensitive.
    #[must_use]
    pub fn is_name_restricted(&self, component: &str) -> bool {
        self.restricted_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(component))
    }
}

/// Per-call overrides of a policy's path layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Separator to split on instead of the policy's.
    pub separator: Option<String>,

    /// Relative/absolute override.
    pub relative: Option<bool>,

    /// Whether the last component is a file.
    pub file_added: bool,
}

impl PathOptions {
    /// Options for a path ending with a file.
    #[must_use]
    pub fn file() -> Self {
        Self {
            file_added: true,
            ..Self::default()
        }
    }

    /// Sets the separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Sets whether the path is relative.
    #[must_use]
    pub fn with_relative(mut self, relative: bool) -> Self {
        self.relative = Some(relative);
        self
    }

    /// Sets whether the path ends with a file.
    #[must_use]
    pub fn with_file(mut self, file_added: bool) -> Self {
        self.file_added = file_added;
        self
    }
}
