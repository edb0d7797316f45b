//! `pm completions` — print a shell completion script.
//!
//! Usage:
//!   pm completions bash > ~/.bash_completion.d/pm
//!   pm completions zsh > "${fpath[1]}/_pm"

use std::io;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
