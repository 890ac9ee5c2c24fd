//! Issue and action records.
//!
//! Both records share the same shape (`category`, `details`, `reason`) so they
//! can be persisted side by side in a snapshot and re-loaded verbatim.

use serde::Deserialize;
use serde::Serialize;

use crate::PathError;
use crate::Result;

/// Kind of log record, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A validation finding.
    Issue,
    /// A corrective edit.
    Action,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Issue => write!(f, "issue"),
            Self::Action => write!(f, "action"),
        }
    }
}

/// Problem category shared by issues and actions.
///
/// Serialized as `SCREAMING_SNAKE_CASE` strings. Unknown strings are kept in
/// [`Category::Other`] so provider-specific categories survive a snapshot
/// round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Forbidden character in a component.
    InvalidChar,
    /// Whole path longer than the policy allows.
    PathLength,
    /// Reserved component name (`CON`, `desktop.ini`, ...).
    RestrictedName,
    /// Component ends with a period.
    TrailingPeriod,
    /// Leading or trailing whitespace.
    Whitespace,
    /// Empty component (doubled separator).
    EmptyPart,
    /// Root component does not match the expected format.
    RootFormat,
    /// Folder name starts with a period.
    LeadingPeriod,
    /// Component starts with a reserved prefix.
    RestrictedPrefix,
    /// Component ends with a reserved suffix.
    RestrictedSuffix,
    /// First component is a reserved root folder.
    RestrictedRoot,
    /// Component matches a reserved name pattern.
    RestrictedPattern,
    /// Single component longer than the policy allows.
    ComponentLength,
    /// ASCII control character in a component.
    ControlChar,
    /// Character needing four or more bytes in UTF-8.
    WideChar,
    /// Provider-specific category.
    Other(String),
}

impl Category {
    /// Wire name of the category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidChar => "INVALID_CHAR",
            Self::PathLength => "PATH_LENGTH",
            Self::RestrictedName => "RESTRICTED_NAME",
            Self::TrailingPeriod => "TRAILING_PERIOD",
            Self::Whitespace => "WHITESPACE",
            Self::EmptyPart => "EMPTY_PART",
            Self::RootFormat => "ROOT_FORMAT",
            Self::LeadingPeriod => "LEADING_PERIOD",
            Self::RestrictedPrefix => "RESTRICTED_PREFIX",
            Self::RestrictedSuffix => "RESTRICTED_SUFFIX",
            Self::RestrictedRoot => "RESTRICTED_ROOT",
            Self::RestrictedPattern => "RESTRICTED_PATTERN",
            Self::ComponentLength => "COMPONENT_LENGTH",
            Self::ControlChar => "CONTROL_CHAR",
            Self::WideChar => "WIDE_CHAR",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "INVALID_CHAR" => Self::InvalidChar,
            "PATH_LENGTH" => Self::PathLength,
            "RESTRICTED_NAME" => Self::RestrictedName,
            "TRAILING_PERIOD" => Self::TrailingPeriod,
            "WHITESPACE" => Self::Whitespace,
            "EMPTY_PART" => Self::EmptyPart,
            "ROOT_FORMAT" => Self::RootFormat,
            "LEADING_PERIOD" => Self::LeadingPeriod,
            "RESTRICTED_PREFIX" => Self::RestrictedPrefix,
            "RESTRICTED_SUFFIX" => Self::RestrictedSuffix,
            "RESTRICTED_ROOT" => Self::RestrictedRoot,
            "RESTRICTED_PATTERN" => Self::RestrictedPattern,
            "COMPONENT_LENGTH" => Self::ComponentLength,
            "CONTROL_CHAR" => Self::ControlChar,
            "WIDE_CHAR" => Self::WideChar,
            _ => Self::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload of an issue or action.
///
/// Every field is optional on the wire; a record whose details carry none of
/// them is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Details {
    /// Index of the component the record refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Offending (or original) component text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,

    /// Replacement text for modify and add actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,

    /// Characters that triggered the record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_chars: Vec<char>,

    /// Measured length, for length records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_length: Option<usize>,

    /// Allowed length, for length records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl Details {
    /// Details pointing at one component.
    #[must_use]
    pub fn at(index: usize, part: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            part: Some(part.into()),
            ..Self::default()
        }
    }

    /// Details describing a length overrun.
    #[must_use]
    pub fn length(current_length: usize, max_length: usize) -> Self {
        Self {
            current_length: Some(current_length),
            max_length: Some(max_length),
            ..Self::default()
        }
    }

    /// Adds the offending characters.
    #[must_use]
    pub fn with_chars(mut self, chars: Vec<char>) -> Self {
        self.invalid_chars = chars;
        self
    }

    /// Adds a replacement value.
    #[must_use]
    pub fn with_new_value(mut self, value: impl Into<String>) -> Self {
        self.new_value = Some(value.into());
        self
    }

    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_none()
            && self.part.is_none()
            && self.new_value.is_none()
            && self.invalid_chars.is_empty()
            && self.current_length.is_none()
            && self.max_length.is_none()
    }
}

/// A detected validation problem. Never mutates the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// Problem category.
    pub category: Category,

    /// Structured payload.
    pub details: Details,

    /// Human-readable explanation.
    pub reason: String,
}

impl Issue {
    /// Creates an issue.
    #[must_use]
    pub fn new(category: Category, details: Details, reason: impl Into<String>) -> Self {
        Self {
            category,
            details,
            reason: reason.into(),
        }
    }

    /// Component index this issue refers to, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.details.index
    }

    /// Checks that the required fields are present.
    pub fn check(&self) -> Result<()> {
        check_common(RecordKind::Issue, &self.category, &self.details, &self.reason)
    }
}

/// Edit performed by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subtype {
    /// Replace the component text with `details.new_value`.
    Modify,
    /// Delete the component at `details.index`.
    Remove,
    /// Append a component with text `details.new_value`.
    Add,
}

impl std::fmt::Display for Subtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modify => write!(f, "MODIFY"),
            Self::Remove => write!(f, "REMOVE"),
            Self::Add => write!(f, "ADD"),
        }
    }
}

/// A corrective mutation waiting to be applied.
///
/// Lower `priority` values are applied first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Problem category the action fixes.
    pub category: Category,

    /// Kind of edit.
    pub subtype: Subtype,

    /// Application order; lower first.
    #[serde(default)]
    pub priority: u32,

    /// Structured payload.
    pub details: Details,

    /// Human-readable explanation.
    pub reason: String,
}

impl Action {
    /// Replaces the text of component `index` (currently `original`).
    #[must_use]
    pub fn modify(
        category: Category,
        index: usize,
        original: impl Into<String>,
        new_value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            category,
            subtype: Subtype::Modify,
            priority: 0,
            details: Details::at(index, original).with_new_value(new_value),
            reason: reason.into(),
        }
    }

    /// Removes component `index` (currently `part`).
    #[must_use]
    pub fn remove(
        category: Category,
        index: usize,
        part: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            category,
            subtype: Subtype::Remove,
            priority: 0,
            details: Details::at(index, part),
            reason: reason.into(),
        }
    }

    /// Appends a new component.
    #[must_use]
    pub fn add(category: Category, new_value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            category,
            subtype: Subtype::Add,
            priority: 0,
            details: Details::default().with_new_value(new_value),
            reason: reason.into(),
        }
    }

    /// Sets the application priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Component index this action refers to, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.details.index
    }

    /// Returns true if `other` describes the same edit.
    ///
    /// Priority is not part of the identity.
    #[must_use]
    pub fn same_edit(&self, other: &Self) -> bool {
        self.category == other.category
            && self.subtype == other.subtype
            && self.details == other.details
    }

    /// Checks that the required fields for this subtype are present.
    pub fn check(&self) -> Result<()> {
        check_common(RecordKind::Action, &self.category, &self.details, &self.reason)?;
        let missing = match self.subtype {
            Subtype::Modify if self.details.index.is_none() => Some("details.index"),
            Subtype::Modify | Subtype::Add if self.details.new_value.is_none() => {
                Some("details.new_value")
            }
            Subtype::Remove if self.details.index.is_none() => Some("details.index"),
            _ => None,
        };
        missing.map_or(Ok(()), |field| {
            Err(PathError::MalformedRecord {
                kind: RecordKind::Action,
                field,
            })
        })
    }
}

fn check_common(kind: RecordKind, category: &Category, details: &Details, reason: &str) -> Result<()> {
    let field = if category.as_str().is_empty() {
        "category"
    } else if details.is_empty() {
        "details"
    } else if reason.trim().is_empty() {
        "reason"
    } else {
        return Ok(());
    };
    Err(PathError::MalformedRecord { kind, field })
}
