//! Shell completion generation command.

use crate::cli::Cli;
use crate::cli::CompletionArgs;
use clap::CommandFactory;
use std::io;

/// Writes completions for `args.shell` to stdout.
pub fn execute(args: &CompletionArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "fpv", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn test_completion_generation() {
        for shell in [
            Shell::Bash,
            Shell::Zsh,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Elvish,
        ] {
            let mut cmd = Cli::command();
            let mut output = Vec::new();
            clap_complete::generate(shell, &mut cmd, "fpv", &mut output);
            let script = String::from_utf8_lossy(&output);
            assert!(script.contains("fpv"), "no completions for {shell:?}");
        }
    }
}
