//! `fz completions`: shell completion scripts.

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

const BIN_NAME: &str = "fz";

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    generate(shell, command, BIN_NAME, out);
}

/// Execute `fz completions <shell>`.
///
/// # Errors
///
/// Returns an error if flushing stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(shell, command, &mut out);
    out.flush()?;
    Ok(())
}
