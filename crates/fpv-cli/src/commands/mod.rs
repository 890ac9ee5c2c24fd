//! Subcommand implementations and the helpers they share.

pub mod add;
pub mod build;
pub mod clean;
pub mod completion;
pub mod providers;
pub mod remove;
pub mod validate;

use crate::cli::BaseArgs;
use crate::cli::PolicyArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use fpv_core::PathOptions;
use fpv_core::Policy;
use fpv_core::PolicyConfig;
use fpv_core::Snapshot;
use std::fs;
use std::path::Path;

impl PolicyArgs {
    /// Policy from `--policy`, `--provider`, or the permissive default.
    pub fn load(&self) -> Result<Policy> {
        let config = if let Some(file) = &self.policy {
            let json = fs::read_to_string(file)
                .with_context(|| format!("failed to read policy file '{}'", file.display()))?;
            add_path_context(PolicyConfig::from_json(&json))
                .with_context(|| format!("invalid policy file '{}'", file.display()))?
        } else if let Some(provider) = self.provider {
            provider.config()
        } else {
            PolicyConfig::default()
        };

        let policy = add_path_context(Policy::from_config(config))?;
        tracing::debug!(policy = policy.name(), "loaded policy");
        Ok(policy)
    }

    /// Layout overrides from `--sep`, `--absolute`, `--relative` and `--file`.
    pub fn options(&self) -> PathOptions {
        let relative = if self.absolute {
            Some(false)
        } else if self.relative {
            Some(true)
        } else {
            None
        };
        PathOptions {
            separator: self.sep.clone(),
            relative,
            file_added: self.file,
        }
    }
}

impl BaseArgs {
    /// Starting state from `--state` or `--base`.
    pub fn snapshot(&self) -> Result<Snapshot> {
        if let Some(file) = &self.state {
            let json = fs::read_to_string(file)
                .with_context(|| format!("failed to read state file '{}'", file.display()))?;
            return add_path_context(Snapshot::from_json(&json))
                .with_context(|| format!("invalid state file '{}'", file.display()));
        }
        Ok(Snapshot {
            path: self.base.clone().unwrap_or_default(),
            ..Snapshot::default()
        })
    }
}

/// Writes `snapshot` as pretty JSON when `target` is set.
pub fn save_state(
    target: Option<&Path>,
    snapshot: &Snapshot,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let Some(target) = target else {
        return Ok(());
    };
    let json = add_path_context(snapshot.to_json_pretty())?;
    fs::write(target, json)
        .with_context(|| format!("failed to write state file '{}'", target.display()))?;
    tracing::debug!(file = %target.display(), "saved state");
    formatter.format_success(&format!("State saved to {}", target.display()));
    Ok(())
}
