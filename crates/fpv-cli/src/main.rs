//! fpv CLI - Command-line utility for validating and cleaning paths against
//! OS and cloud-storage naming rules.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli::Commands;
use output::OutputFormatter;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    match &cli.command {
        Commands::Validate(args) => commands::validate::execute(args, formatter),
        Commands::Clean(args) => commands::clean::execute(args, formatter).map(|()| ExitCode::SUCCESS),
        Commands::Add(args) => commands::add::execute(args, formatter).map(|()| ExitCode::SUCCESS),
        Commands::Remove(args) => {
            commands::remove::execute(args, formatter).map(|()| ExitCode::SUCCESS)
        }
        Commands::Build(args) => commands::build::execute(args, formatter).map(|()| ExitCode::SUCCESS),
        Commands::Providers(args) => {
            commands::providers::execute(args, formatter).map(|()| ExitCode::SUCCESS)
        }
        Commands::Completion(args) => {
            commands::completion::execute(args);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(code) => code,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}
