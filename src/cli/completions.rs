//! Shell completions generation.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

/// Write completions for `shell` to `out`.
pub fn generate(shell: Shell, out: &mut dyn Write) {
    let mut cmd = super::Cli::command();
    clap_complete::generate(shell, &mut cmd, "stitch", out);
}

pub fn run(shell: Shell) -> crate::error::Result<()> {
    generate(shell, &mut std::io::stdout());
    Ok(())
}
