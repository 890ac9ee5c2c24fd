//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::ProviderSummary;
use anyhow::Result;
use console::Term;
use console::style;
use fpv_core::Action;
use fpv_core::AddReport;
use fpv_core::BuildReport;
use fpv_core::CleanReport;
use fpv_core::Issue;
use fpv_core::PolicyConfig;
use fpv_core::Provider;
use fpv_core::RemoveReport;
use fpv_core::ValidationReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    /// `#3` for a component, `path` for a path-wide record.
    fn location(index: Option<usize>) -> String {
        index.map_or_else(|| "path".to_string(), |i| format!("#{i}"))
    }

    fn status(&self, ok: bool, message: &str) {
        if self.use_colors {
            let mark = if ok {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            self.line(&format!("{mark} {message}"));
        } else {
            self.line(message);
        }
    }

    fn heading(&self, text: &str) {
        self.line("");
        if self.use_colors {
            self.line(&format!("{}", style(text).bold()));
        } else {
            self.line(text);
        }
    }

    fn issue_line(&self, issue: &Issue) -> String {
        let category = if self.use_colors {
            style(issue.category.as_str()).yellow().to_string()
        } else {
            issue.category.as_str().to_string()
        };
        format!(
            "  {:>5}  {category}: {}",
            Self::location(issue.index()),
            issue.reason
        )
    }

    fn write_issues(&self, issues: &[Issue]) {
        for issue in issues {
            self.line(&self.issue_line(issue));
            if self.verbose {
                self.write_details(issue);
            }
        }
    }

    fn write_details(&self, issue: &Issue) {
        let details = &issue.details;
        if !details.invalid_chars.is_empty() {
            self.line(&format!("         characters: {:?}", details.invalid_chars));
        }
        if let (Some(current), Some(max)) = (details.current_length, details.max_length) {
            self.line(&format!("         length: {current} (max {max})"));
        }
    }

    fn action_line(action: &Action) -> String {
        let change = action.details.new_value.as_ref().map_or_else(
            String::new,
            |value| format!(" -> '{value}'"),
        );
        format!(
            "  {:>5}  {} {} [p{}]{change}",
            Self::location(action.index()),
            action.subtype,
            action.category,
            action.priority
        )
    }

    fn plural(n: usize, word: &str) -> String {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_validation(&self, report: &ValidationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if report.is_valid() {
            self.status(true, &format!("Path is valid: {}", report.path));
        } else {
            self.status(
                false,
                &format!(
                    "Path is invalid: {} ({})",
                    report.path,
                    Self::plural(report.issues.len(), "issue")
                ),
            );
            self.write_issues(&report.issues);
        }

        Ok(())
    }

    fn format_clean(&self, report: &CleanReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if report.changed() {
            self.status(true, &format!("Cleaned path: {}", report.cleaned_path));
            self.line(&format!("  Original: {}", report.original_path));
        } else {
            self.status(
                true,
                &format!("Path already clean: {}", report.cleaned_path),
            );
        }

        if !report.actions_applied.is_empty() && self.verbose {
            self.heading("Actions applied:");
            for action in &report.actions_applied {
                self.line(&Self::action_line(action));
            }
        } else if !report.actions_applied.is_empty() {
            self.line(&format!(
                "  Actions applied: {}",
                report.actions_applied.len()
            ));
        }

        if report.is_valid() == Some(false) {
            self.heading("Remaining issues:");
            self.write_issues(&report.issues);
        }

        Ok(())
    }

    fn format_add(&self, report: &AddReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.status(
            report.new_issues.is_empty(),
            &format!("Updated path: {}", report.updated_path),
        );
        if !report.new_issues.is_empty() {
            self.heading("New issues:");
            self.write_issues(&report.new_issues);
        }
        let earlier = report.all_issues.len().saturating_sub(report.new_issues.len());
        if earlier > 0 {
            self.line(&format!(
                "  {} already recorded",
                Self::plural(earlier, "issue")
            ));
        }

        Ok(())
    }

    fn format_remove(&self, report: &RemoveReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.status(
            report.remaining_issues.is_empty(),
            &format!("Removed '{}': {}", report.removed_part, report.updated_path),
        );
        if !report.remaining_issues.is_empty() {
            self.heading("Remaining issues:");
            self.write_issues(&report.remaining_issues);
        }

        Ok(())
    }

    fn format_build(&self, report: &BuildReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.status(
            report.is_valid(),
            &format!("Built path: {}", report.final_path),
        );

        if !report.root_issues.is_empty() {
            self.heading("Root:");
            self.write_issues(&report.root_issues);
        }
        for step in &report.steps {
            if step.issues.is_empty() && !self.verbose {
                continue;
            }
            self.heading(&format!(
                "Step {} '{}': {}",
                step.step,
                step.part,
                Self::plural(step.issues.len(), "issue")
            ));
            self.write_issues(&step.issues);
        }

        Ok(())
    }

    fn format_providers(&self, providers: &[Provider]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for provider in providers {
            let summary = ProviderSummary::from(*provider);
            let layout = if summary.relative { "relative" } else { "absolute" };
            let limit = summary
                .max_length
                .map_or_else(|| "-".to_string(), |max| max.to_string());
            let separator = format!("'{}'", summary.separator);
            self.line(&format!(
                "{:<12} sep {separator:<4} {layout:<9} max {limit}",
                summary.name
            ));
        }

        Ok(())
    }

    fn format_policy(&self, config: &PolicyConfig) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.line(&config.to_json()?);
        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:#}"));
        }
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.status(true, message);
    }
}
