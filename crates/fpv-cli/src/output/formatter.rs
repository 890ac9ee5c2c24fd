//! Output formatter trait for CLI results.

use anyhow::Result;
use fpv_core::AddReport;
use fpv_core::BuildReport;
use fpv_core::CleanReport;
use fpv_core::PolicyConfig;
use fpv_core::Provider;
use fpv_core::RemoveReport;
use fpv_core::ValidationReport;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format validation result
    fn format_validation(&self, report: &ValidationReport) -> Result<()>;

    /// Format clean result
    fn format_clean(&self, report: &CleanReport) -> Result<()>;

    /// Format add result
    fn format_add(&self, report: &AddReport) -> Result<()>;

    /// Format remove result
    fn format_remove(&self, report: &RemoveReport) -> Result<()>;

    /// Format build result
    fn format_build(&self, report: &BuildReport) -> Result<()>;

    /// Format the list of built-in providers
    fn format_providers(&self, providers: &[Provider]) -> Result<()>;

    /// Format one policy in full
    fn format_policy(&self, config: &PolicyConfig) -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);

    /// Format success message
    fn format_success(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// One row of `fpv providers`.
#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    pub name: &'static str,
    pub separator: String,
    pub relative: bool,
    pub max_length: Option<usize>,
}

impl From<Provider> for ProviderSummary {
    fn from(provider: Provider) -> Self {
        let config = provider.config();
        Self {
            name: provider.as_str(),
            separator: config.separator,
            relative: config.relative,
            max_length: config.max_length,
        }
    }
}
