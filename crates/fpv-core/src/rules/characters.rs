//! Character-level rules.

use super::Findings;
use super::Mode;
use super::PartView;
use super::Rule;
use super::correct;
use super::details;
use crate::types::Category;
use crate::types::Issue;

/// Distinct characters of `text` matching `pred`, in order of appearance.
fn offending(text: &str, pred: impl Fn(char) -> bool) -> Vec<char> {
    let mut found: Vec<char> = Vec::new();
    for c in text.chars().filter(|&c| pred(c)) {
        if !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

fn strip_chars(
    part: &PartView<'_>,
    mode: Mode,
    category: Category,
    pred: impl Fn(char) -> bool,
    label: &str,
) -> Findings {
    let found = offending(part.text, &pred);
    if found.is_empty() {
        return Findings::none();
    }

    let cleaned: String = part.text.chars().filter(|&c| !pred(c)).collect();
    let issue = Issue::new(
        category,
        details(part).with_chars(found.clone()),
        format!("{label} {found:?} found in part: '{}'.", part.text),
    );
    correct(part, mode, issue, cleaned, format!("Removed {}.", label.to_lowercase()))
}

/// Forbids a fixed set of characters.
#[derive(Debug, Clone)]
pub struct InvalidCharacters {
    chars: Vec<char>,
}

impl InvalidCharacters {
    /// Forbids every character of `chars`.
    #[must_use]
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }
}

impl Rule for InvalidCharacters {
    fn name(&self) -> &'static str {
        "invalid_characters"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        strip_chars(
            part,
            mode,
            Category::InvalidChar,
            |c| self.chars.contains(&c),
            "Invalid characters",
        )
    }
}

/// Forbids control characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlCharacters;

impl Rule for ControlCharacters {
    fn name(&self) -> &'static str {
        "control_characters"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        strip_chars(
            part,
            mode,
            Category::ControlChar,
            char::is_control,
            "Control characters",
        )
    }
}

/// Forbids characters that need four bytes in UTF-8 (emoji and other
/// supplementary-plane characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct WideCharacters;

impl Rule for WideCharacters {
    fn name(&self) -> &'static str {
        "wide_characters"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        strip_chars(
            part,
            mode,
            Category::WideChar,
            |c| c.len_utf8() >= 4,
            "Wide characters",
        )
    }
}
