//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use fpv_core::Provider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fpv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a path and report every issue
    Validate(ValidateArgs),
    /// Clean a path by applying the policy's fixes
    Clean(CleanArgs),
    /// Append components to a saved path state
    Add(AddArgs),
    /// Remove one component from a saved path state
    Remove(RemoveArgs),
    /// Build a path one component at a time
    Build(BuildArgs),
    /// List built-in providers or show one provider's policy
    Providers(ProvidersArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Validate(_) => "validate",
            Self::Clean(_) => "clean",
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Build(_) => "build",
            Self::Providers(_) => "providers",
            Self::Completion(_) => "completion",
        }
    }
}

/// Policy selection and path layout, shared by every path command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Built-in provider policy (see `fpv providers`)
    #[arg(short, long, value_parser = parse_provider, conflicts_with = "policy")]
    pub provider: Option<Provider>,

    /// JSON policy file
    #[arg(long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Separator to split on instead of the policy's
    #[arg(long, value_name = "SEP")]
    pub sep: Option<String>,

    /// Treat the path as absolute (first component is the root)
    #[arg(long, conflicts_with = "relative")]
    pub absolute: bool,

    /// Treat the path as relative
    #[arg(long)]
    pub relative: bool,

    /// The last component is a file
    #[arg(short, long)]
    pub file: bool,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to validate
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Exit with a non-zero status if the path has issues
    #[arg(long)]
    pub strict: bool,

    /// Write the resulting state to FILE
    #[arg(long, value_name = "FILE")]
    pub save_state: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CleanArgs {
    /// Path to clean
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Skip validating the cleaned path
    #[arg(long)]
    pub no_validate: bool,
}

/// Where an incremental command gets its starting state.
#[derive(clap::Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct BaseArgs {
    /// Read the starting state from FILE (written by --save-state)
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Start from a path with no recorded issues
    #[arg(long, value_name = "PATH")]
    pub base: Option<String>,
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Components to append
    #[arg(value_name = "PART", required = true)]
    pub parts: Vec<String>,

    #[command(flatten)]
    pub from: BaseArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Append without validating the new components
    #[arg(long)]
    pub no_validate: bool,

    /// Write the resulting state to FILE
    #[arg(long, value_name = "FILE")]
    pub save_state: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct RemoveArgs {
    /// Zero-based index of the component to remove
    #[arg(value_name = "INDEX")]
    pub index: usize,

    #[command(flatten)]
    pub from: BaseArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Write the resulting state to FILE
    #[arg(long, value_name = "FILE")]
    pub save_state: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct BuildArgs {
    /// Starting path
    #[arg(value_name = "ROOT")]
    pub root: String,

    /// Components to add, in order
    #[arg(value_name = "PART")]
    pub parts: Vec<String>,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Write the resulting state to FILE
    #[arg(long, value_name = "FILE")]
    pub save_state: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ProvidersArgs {
    /// Show the full policy of one provider
    #[arg(value_name = "NAME", value_parser = parse_provider)]
    pub name: Option<Provider>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_provider(s: &str) -> Result<Provider, String> {
    s.parse::<Provider>().map_err(|e| {
        let names: Vec<&str> = Provider::all().iter().map(|p| p.as_str()).collect();
        format!("{e} (expected one of: {})", names.join(", "))
    })
}
