//! `hp completions`: shell completion scripts for the `hp` binary.
//!
//! The script is generated from the live clap definition, so it always
//! matches the current subcommands and flags.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Binary name the completion script registers for.
const BIN_NAME: &str = "hp";

/// Arguments for `hp completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    write_completions(shell, command, &mut std::io::stdout().lock())
}

fn write_completions(
    shell: Shell,
    command: &mut clap::Command,
    out: &mut dyn Write,
) -> Result<()> {
    generate(shell, command, BIN_NAME, out);
    out.flush()?;
    Ok(())
}
