//! Providers command implementation.

use crate::cli::ProvidersArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use fpv_core::Provider;

pub fn execute(args: &ProvidersArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    match args.name {
        Some(provider) => formatter.format_policy(&provider.config()),
        None => formatter.format_providers(Provider::all()),
    }
}
