//! Build command implementation.

use super::save_state;
use crate::cli::BuildArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use fpv_core::build_path;

pub fn execute(args: &BuildArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let policy = args.policy.load()?;
    let report = add_path_context(build_path(
        &args.root,
        &args.parts,
        args.policy.file,
        &policy,
        &args.policy.options(),
    ))?;

    formatter.format_build(&report)?;
    save_state(args.save_state.as_deref(), &report.snapshot, formatter)?;

    Ok(())
}
