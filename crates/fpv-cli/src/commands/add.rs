//! Add command implementation.

use super::save_state;
use crate::cli::AddArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use fpv_core::add_parts;

/// With `--file` the last new component is the file.
pub fn execute(args: &AddArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let policy = args.policy.load()?;
    let base = args.from.snapshot()?;

    let report = add_path_context(add_parts(
        &base,
        &args.parts,
        args.policy.file,
        !args.no_validate,
        &policy,
        &args.policy.options(),
    ))?;

    formatter.format_add(&report)?;
    save_state(args.save_state.as_deref(), &report.snapshot, formatter)?;

    Ok(())
}
