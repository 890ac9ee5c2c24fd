//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::ProviderSummary;
use anyhow::Result;
use fpv_core::AddReport;
use fpv_core::BuildReport;
use fpv_core::CleanReport;
use fpv_core::PolicyConfig;
use fpv_core::Provider;
use fpv_core::RemoveReport;
use fpv_core::ValidationReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn success<T: Serialize>(operation: &str, data: T) -> Result<()> {
        Self::output(&JsonOutput::success(operation, data))
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_validation(&self, report: &ValidationReport) -> Result<()> {
        #[derive(Serialize)]
        struct ValidationOutput<'a> {
            valid: bool,
            #[serde(flatten)]
            report: &'a ValidationReport,
        }

        Self::success(
            "validate",
            ValidationOutput {
                valid: report.is_valid(),
                report,
            },
        )
    }

    fn format_clean(&self, report: &CleanReport) -> Result<()> {
        #[derive(Serialize)]
        struct CleanOutput<'a> {
            changed: bool,
            #[serde(flatten)]
            report: &'a CleanReport,
        }

        Self::success(
            "clean",
            CleanOutput {
                changed: report.changed(),
                report,
            },
        )
    }

    fn format_add(&self, report: &AddReport) -> Result<()> {
        Self::success("add", report)
    }

    fn format_remove(&self, report: &RemoveReport) -> Result<()> {
        Self::success("remove", report)
    }

    fn format_build(&self, report: &BuildReport) -> Result<()> {
        #[derive(Serialize)]
        struct BuildOutput<'a> {
            valid: bool,
            #[serde(flatten)]
            report: &'a BuildReport,
        }

        Self::success(
            "build",
            BuildOutput {
                valid: report.is_valid(),
                report,
            },
        )
    }

    fn format_providers(&self, providers: &[Provider]) -> Result<()> {
        let data: Vec<ProviderSummary> = providers.iter().copied().map(Into::into).collect();
        Self::success("providers", data)
    }

    fn format_policy(&self, config: &PolicyConfig) -> Result<()> {
        Self::success("providers", config)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, _message: &str) {
        // Stdout carries exactly one envelope.
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let output = JsonOutput::<()>::error("remove", "index out of range");
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["operation"], "remove");
        assert_eq!(value["status"], "error");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_success_envelope_flattens_report() {
        #[derive(Serialize)]
        struct CleanOutput<'a> {
            changed: bool,
            #[serde(flatten)]
            report: &'a CleanReport,
        }

        let report = CleanReport {
            original_path: "/a.".to_string(),
            cleaned_path: "/a".to_string(),
            ..CleanReport::default()
        };
        let output = JsonOutput::success(
            "clean",
            CleanOutput {
                changed: report.changed(),
                report: &report,
            },
        );
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["changed"], true);
        assert_eq!(value["data"]["cleaned_path"], "/a");
    }

    #[test]
    fn test_provider_summary() {
        let summary = ProviderSummary::from(Provider::Windows);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["name"], "windows");
        assert_eq!(value["separator"], "\\");
        assert_eq!(value["relative"], false);
        assert_eq!(value["max_length"], 255);
    }
}
