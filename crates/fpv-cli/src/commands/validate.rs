//! Validate command implementation.

use super::save_state;
use crate::cli::ValidateArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use fpv_core::validate_path;
use std::process::ExitCode;

pub fn execute(args: &ValidateArgs, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let policy = args.policy.load()?;
    let report = add_path_context(validate_path(&args.path, &policy, &args.policy.options()))?;

    formatter.format_validation(&report)?;
    save_state(args.save_state.as_deref(), &report.snapshot, formatter)?;

    // --strict turns issues into a failing exit status, not an error message.
    if args.strict && !report.is_valid() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
