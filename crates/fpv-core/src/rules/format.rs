//! Shape rules: empty components, whitespace, periods and component length.

use super::Findings;
use super::Mode;
use super::PartView;
use super::Rule;
use super::correct;
use super::details;
use super::reject;
use crate::types::Category;
use crate::types::ComponentType;
use crate::types::Issue;

/// Forbids empty components (doubled separators).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPart;

impl Rule for EmptyPart {
    fn name(&self) -> &'static str {
        "empty_part"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        if !part.text.is_empty() {
            return Findings::none();
        }
        let issue = Issue::new(
            Category::EmptyPart,
            details(part),
            format!("Empty part found at index {} in the path.", part.index),
        );
        reject(
            part,
            mode,
            issue,
            format!("Removed empty part at index {} from the path.", part.index),
        )
    }
}

/// Forbids leading and trailing whitespace, and for files also whitespace
/// around the extension dot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Whitespace;

impl Whitespace {
    fn trimmed(text: &str, is_file: bool) -> String {
        let trimmed = text.trim();
        if is_file && let Some((name, ext)) = trimmed.rsplit_once('.') {
            return format!("{}.{}", name.trim(), ext.trim());
        }
        trimmed.to_string()
    }
}

impl Rule for Whitespace {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        let cleaned = Self::trimmed(part.text, part.is_file);
        if cleaned == part.text {
            return Findings::none();
        }
        let issue = Issue::new(
            Category::Whitespace,
            details(part),
            format!(
                "Whitespace detected in part: '{}'. Leading/trailing whitespace or whitespace \
                 around file extension is not allowed.",
                part.text
            ),
        );
        correct(
            part,
            mode,
            issue,
            cleaned,
            "Removed whitespace from part of path.".to_string(),
        )
    }
}

/// Forbids components ending with a period.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingPeriods;

impl Rule for TrailingPeriods {
    fn name(&self) -> &'static str {
        "trailing_periods"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        if !part.text.ends_with('.') {
            return Findings::none();
        }
        let issue = Issue::new(
            Category::TrailingPeriod,
            details(part),
            format!(
                "The part '{}' ends with a trailing period, which is not allowed.",
                part.text
            ),
        );
        correct(
            part,
            mode,
            issue,
            part.text.trim_end_matches('.').to_string(),
            format!("Removed trailing period from '{}'.", part.text),
        )
    }
}

/// Forbids folder names starting with a period.
///
/// Hidden files are allowed; only folder components are checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingPeriods;

impl Rule for LeadingPeriods {
    fn name(&self) -> &'static str {
        "leading_periods"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        if part.kind != ComponentType::Folder || !part.text.starts_with('.') {
            return Findings::none();
        }
        let issue = Issue::new(
            Category::LeadingPeriod,
            details(part),
            format!("Folder name '{}' starts with a period.", part.text),
        );
        correct(
            part,
            mode,
            issue,
            part.text.trim_start_matches('.').to_string(),
            format!("Removed leading period from '{}'.", part.text),
        )
    }
}

/// Limits the length of a single component, in characters.
#[derive(Debug, Clone, Copy)]
pub struct ComponentLength {
    max: usize,
}

impl ComponentLength {
    /// Allows at most `max` characters per component.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    /// Truncates `text` to the limit. File extensions are kept when they fit.
    fn truncate(&self, text: &str, is_file: bool) -> String {
        if is_file && let Some((stem, ext)) = text.rsplit_once('.') {
            let ext_len = ext.chars().count() + 1;
            if ext_len < self.max {
                let stem: String = stem.chars().take(self.max - ext_len).collect();
                return format!("{stem}.{ext}");
            }
        }
        text.chars().take(self.max).collect()
    }
}

impl Rule for ComponentLength {
    fn name(&self) -> &'static str {
        "component_length"
    }

    fn check(&self, part: &PartView<'_>, mode: Mode) -> Findings {
        let length = part.text.chars().count();
        if length <= self.max {
            return Findings::none();
        }
        let mut info = details(part);
        info.current_length = Some(length);
        info.max_length = Some(self.max);
        let issue = Issue::new(
            Category::ComponentLength,
            info,
            format!(
                "Part '{}' is {length} characters long; the maximum is {}.",
                part.text, self.max
            ),
        );
        correct(
            part,
            mode,
            issue,
            self.truncate(part.text, part.is_file),
            format!("Truncated part to {} characters.", self.max),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Subtype;

    fn folder(text: &str) -> PartView<'_> {
        PartView {
            index: 1,
            text,
            kind: ComponentType::Folder,
            is_file: false,
        }
    }

    fn file(text: &str) -> PartView<'_> {
        PartView {
            index: 2,
            text,
            kind: ComponentType::File,
            is_file: true,
        }
    }

    #[test]
    fn test_empty_part() {
        let findings = EmptyPart.check(&folder(""), Mode::Validate);
        assert_eq!(findings.issues[0].category, Category::EmptyPart);
        assert_eq!(findings.issues[0].index(), Some(1));

        let findings = EmptyPart.check(&folder(""), Mode::Clean);
        assert_eq!(findings.actions[0].subtype, Subtype::Remove);

        assert!(EmptyPart.check(&folder("x"), Mode::Clean).is_empty());
    }

    #[test]
    fn test_whitespace_folder() {
        let findings = Whitespace.check(&folder("  docs "), Mode::Clean);
        assert_eq!(findings.cleaned.as_deref(), Some("docs"));
    }

    #[test]
    fn test_whitespace_around_extension() {
        let findings = Whitespace.check(&file("file . txt"), Mode::Clean);
        assert_eq!(findings.cleaned.as_deref(), Some("file.txt"));

        // Folders keep inner spaces around dots.
        assert!(Whitespace.check(&folder("v1 . 2"), Mode::Validate).is_empty());
    }

    #[test]
    fn test_whitespace_only_part_is_removed() {
        let findings = Whitespace.check(&folder("   "), Mode::Clean);
        assert!(findings.removes_part());
    }

    #[test]
    fn test_trailing_periods() {
        let findings = TrailingPeriods.check(&folder("name."), Mode::Validate);
        assert_eq!(findings.issues[0].category, Category::TrailingPeriod);

        let findings = TrailingPeriods.check(&folder("name..."), Mode::Clean);
        assert_eq!(findings.cleaned.as_deref(), Some("name"));

        let findings = TrailingPeriods.check(&folder(".."), Mode::Clean);
        assert!(findings.removes_part());
    }

    #[test]
    fn test_leading_periods_only_for_folders() {
        let findings = LeadingPeriods.check(&folder(".config"), Mode::Clean);
        assert_eq!(findings.cleaned.as_deref(), Some("config"));
        assert!(LeadingPeriods.check(&file(".bashrc"), Mode::Validate).is_empty());
    }

    #[test]
    fn test_component_length_keeps_extension() {
        let rule = ComponentLength::new(8);
        let findings = rule.check(&file("verylongname.txt"), Mode::Clean);
        assert_eq!(findings.cleaned.as_deref(), Some("very.txt"));

        let findings = rule.check(&folder("abcdefghijk"), Mode::Validate);
        let details = &findings.issues[0].details;
        assert_eq!(details.current_length, Some(11));
        assert_eq!(details.max_length, Some(8));

        let findings = rule.check(&folder("abcdefghijk"), Mode::Clean);
        assert_eq!(findings.cleaned.as_deref(), Some("abcdefgh"));
    }
}
