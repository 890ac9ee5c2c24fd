//! Clean command implementation.

use crate::cli::CleanArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use fpv_core::clean_path;

pub fn execute(args: &CleanArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let policy = args.policy.load()?;
    let report = add_path_context(clean_path(
        &args.path,
        &policy,
        &args.policy.options(),
        !args.no_validate,
    ))?;

    formatter.format_clean(&report)?;

    Ok(())
}
