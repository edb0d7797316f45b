//! CLI module — Clap argument parser, prompts, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PmError, Result};
use crate::vault::Storage;

/// Minimum password length to prevent trivially weak passwords.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Directory name under `$HOME` used when `--data-dir` is not given.
const DEFAULT_DIR_NAME: &str = ".passwordmanager";

/// pm: a secure command-line password manager.
#[derive(Parser)]
#[command(
    name = "pm",
    about = "Password Manager - a secure command-line password manager",
    long_about = "Password Manager (pm) keeps your passwords in a local vault \
                  encrypted with AES-256-GCM and protected by a master password.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage directory (default: ~/.passwordmanager)
    #[arg(long, env = "PM_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize the password manager with a master password
    Init,

    /// Add a new password entry
    Add {
        /// Entry title (used to look it up later)
        title: String,
        /// Generate the password instead of prompting for it
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// Retrieve a password entry
    Get {
        /// Entry title
        title: String,
        /// Print the password instead of copying it to the clipboard
        #[arg(short, long)]
        show: bool,
    },

    /// List all password entries
    List,

    /// Update an existing password entry
    Update {
        /// Entry title
        title: String,
    },

    /// Delete a password entry
    Delete {
        /// Entry title
        title: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a secure random password
    Generate {
        /// Password length (default: 16)
        length: Option<usize>,
    },

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the storage directory from `--data-dir` / `PM_DATA_DIR` or `$HOME`.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    let base = directories::BaseDirs::new()
        .ok_or_else(|| PmError::CommandFailed("cannot determine home directory".into()))?;
    Ok(base.home_dir().join(DEFAULT_DIR_NAME))
}

/// An unlocked installation: storage bound to the right key derivation
/// plus the verified master password.
pub struct Session {
    pub storage: Storage,
    pub settings: Settings,
    pub password: Zeroizing<String>,
}

/// Load the user record, prompt for the master password and verify it.
///
/// The verifier is compared in constant time.  Fails with
/// `NotInitialized` when `pm init` has not been run.
pub fn unlock(cli: &Cli) -> Result<Session> {
    let dir = data_dir(cli)?;
    let (storage, user) = Storage::open_for_user(&dir)?.ok_or(PmError::NotInitialized)?;
    let settings = Settings::load(&dir)?;

    let password = prompt::master_password()?;
    user.verify(&password)?;

    Ok(Session {
        storage,
        settings,
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_dir_flag_wins() {
        let cli = Cli::parse_from(["pm", "--data-dir", "/tmp/pm-test", "list"]);
        assert_eq!(data_dir(&cli).unwrap(), PathBuf::from("/tmp/pm-test"));
    }

    #[test]
    fn completions_shell_is_parsed_by_clap() {
        let cli = Cli::parse_from(["pm", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Commands::Completions {
                shell: clap_complete::Shell::Zsh
            }
        ));
        assert!(Cli::try_parse_from(["pm", "completions", "csh"]).is_err());
    }

    #[test]
    fn length_requires_generate() {
        assert!(Cli::try_parse_from(["pm", "add", "x", "--length", "20"]).is_err());
        assert!(Cli::try_parse_from(["pm", "add", "x", "-g", "--length", "20"]).is_ok());
    }
}
