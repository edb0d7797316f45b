//! `pm generate` — print a random password.
//!
//! Needs no master password; only the configured default length is read.

use crate::cli::{data_dir, Cli};
use crate::config::Settings;
use crate::crypto::generate_password;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => Settings::load(&data_dir(cli)?)?.generate_length,
    };

    let password = generate_password(length)?;
    println!("{password}");

    Ok(())
}
