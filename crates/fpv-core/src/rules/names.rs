//! Name-level rules: reserved names, prefixes, suffixes, patterns and roots.

use regex::Regex;

use super::Findings;
use super::Mode;
use super::PartView;
use super::Rule;
use super::correct;
use super::details;
use super::reject;
use crate::types::Category;
use crate::types::Issue;

fn strip_prefix_ignore_case<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

fn strip_suffix_ignore_case<'t>(text: &'t str, suffix: &str) -> Option<&'t str> {
    let cut = text.len().checked_sub(suffix.len())?;
    let tail = text.get(cut..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &text[..cut])
}

/// Forbids reserved component names, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct RestrictedNames {
    names: Vec<String>,
}

impl RestrictedNames {
    /// Forbids every name in `names`.
    #[must_use]
    pub fn new(names: &[String]) -> Self {
        Self {
            names: names.to_vec(),
        }
    }

    /// Returns `true` if `text` is a reserved name.
    #[must_use]
    pub fn is_restricted(&self, text: &str) -> bool {
        self.names.iter().any(|name| name.eq_ignore_ascii_case(text))
    }
}

impl Rule for RestrictedNames {
    fn name(&self) -> &'static str {
        "restricted_names"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        if !self.is_restricted(part.text) {
            return Findings::none();
        }
        let issue = Issue::new(
            Category::RestrictedName,
            details(part),
            format!("Restricted name '{}' found in path.", part.text),
        );
        reject(
            part,
            mode,
            issue,
            format!("Removed restricted name '{}' to avoid conflicts.", part.text),
        )
    }
}

/// Forbids reserved prefixes. Cleaning strips them.
#[derive(Debug, Clone)]
pub struct RestrictedPrefixes {
    prefixes: Vec<String>,
}

impl RestrictedPrefixes {
    /// Forbids every prefix in `prefixes`.
    #[must_use]
    pub fn new(prefixes: &[String]) -> Self {
        Self {
            prefixes: prefixes.iter().filter(|p| !p.is_empty()).cloned().collect(),
        }
    }
}

impl Rule for RestrictedPrefixes {
    fn name(&self) -> &'static str {
        "restricted_prefixes"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        let Some(prefix) = self
            .prefixes
            .iter()
            .find(|p| strip_prefix_ignore_case(part.text, p).is_some())
        else {
            return Findings::none();
        };

        let mut cleaned = part.text;
        while let Some(rest) = self
            .prefixes
            .iter()
            .find_map(|p| strip_prefix_ignore_case(cleaned, p))
        {
            cleaned = rest;
        }

        let issue = Issue::new(
            Category::RestrictedPrefix,
            details(part),
            format!("Restricted prefix '{prefix}' found in path part '{}'.", part.text),
        );
        correct(
            part,
            mode,
            issue,
            cleaned.to_string(),
            format!("Removed restricted prefix '{prefix}' from path part."),
        )
    }
}

/// Forbids reserved suffixes. Cleaning strips them.
#[derive(Debug, Clone)]
pub struct RestrictedSuffixes {
    suffixes: Vec<String>,
}

impl RestrictedSuffixes {
    /// Forbids every suffix in `suffixes`.
    #[must_use]
    pub fn new(suffixes: &[String]) -> Self {
        Self {
            suffixes: suffixes.iter().filter(|s| !s.is_empty()).cloned().collect(),
        }
    }
}

impl Rule for RestrictedSuffixes {
    fn name(&self) -> &'static str {
        "restricted_suffixes"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        let Some(suffix) = self
            .suffixes
            .iter()
            .find(|s| strip_suffix_ignore_case(part.text, s).is_some())
        else {
            return Findings::none();
        };

        let mut cleaned = part.text;
        while let Some(rest) = self
            .suffixes
            .iter()
            .find_map(|s| strip_suffix_ignore_case(cleaned, s))
        {
            cleaned = rest;
        }

        let issue = Issue::new(
            Category::RestrictedSuffix,
            details(part),
            format!("Restricted suffix '{suffix}' found in path part '{}'.", part.text),
        );
        correct(
            part,
            mode,
            issue,
            cleaned.to_string(),
            format!("Removed restricted suffix '{suffix}' from path part."),
        )
    }
}

/// Forbids names matching any of a set of regular expressions.
#[derive(Debug, Clone)]
pub struct RestrictedPatterns {
    patterns: Vec<Regex>,
}

impl RestrictedPatterns {
    /// Forbids names matching any of `patterns`.
    #[must_use]
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }
}

impl Rule for RestrictedPatterns {
    fn name(&self) -> &'static str {
        "restricted_patterns"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        let Some(pattern) = self.patterns.iter().find(|re| re.is_match(part.text)) else {
            return Findings::none();
        };
        let issue = Issue::new(
            Category::RestrictedPattern,
            details(part),
            format!(
                "Part '{}' matches restricted pattern '{}'.",
                part.text,
                pattern.as_str()
            ),
        );
        reject(
            part,
            mode,
            issue,
            format!("Removed part '{}' matching a restricted pattern.", part.text),
        )
    }
}

/// Forbids reserved names as the first component of the path.
#[derive(Debug, Clone)]
pub struct RestrictedRoot {
    names: Vec<String>,
}

impl RestrictedRoot {
    /// Forbids every name in `names` at index 0.
    #[must_use]
    pub fn new(names: &[String]) -> Self {
        Self {
            names: names.to_vec(),
        }
    }
}

impl Rule for RestrictedRoot {
    fn name(&self) -> &'static str {
        "restricted_root"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        if part.index != 0 || !self.names.iter().any(|n| n.eq_ignore_ascii_case(part.text)) {
            return Findings::none();
        }
        let issue = Issue::new(
            Category::RestrictedRoot,
            details(part),
            format!("Restricted root folder '{}' found in path.", part.text),
        );
        reject(
            part,
            mode,
            issue,
            format!("Removed restricted root folder '{}'.", part.text),
        )
    }
}

/// Requires the root component to match one of a set of patterns.
///
/// There is no automatic fix, so cleaning reports nothing.
#[derive(Debug, Clone)]
pub struct RootFormat {
    patterns: Vec<Regex>,
}

impl RootFormat {
    /// Accepts roots matching any of `patterns`.
    #[must_use]
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }
}

impl Rule for RootFormat {
    fn name(&self) -> &'static str {
        "root_format"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        if mode == Mode::Clean
            || self.patterns.is_empty()
            || self.patterns.iter().any(|re| re.is_match(part.text))
        {
            return Findings::none();
        }
        Findings::issue(Issue::new(
            Category::RootFormat,
            details(part),
            format!("Root folder '{}' is not in an accepted format.", part.text),
        ))
    }
}
