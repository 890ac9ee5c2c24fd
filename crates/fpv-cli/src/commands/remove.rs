//! Remove command implementation.

use super::save_state;
use crate::cli::RemoveArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use fpv_core::remove_part;

pub fn execute(args: &RemoveArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let policy = args.policy.load()?;
    let base = args.from.snapshot()?;

    let report = add_path_context(remove_part(
        &base,
        args.index,
        &policy,
        &args.policy.options(),
    ))?;

    formatter.format_remove(&report)?;
    save_state(args.save_state.as_deref(), &report.snapshot, formatter)?;

    Ok(())
}
