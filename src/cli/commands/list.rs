//! `pm list` — display all entries in a table.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = unlock(cli)?;
    let vault = session.storage.load_vault(&session.password)?;

    if !vault.is_empty() {
        output::info(&format!("Found {} password entries", vault.len()));
    }
    output::print_entries_table(vault.entries());

    Ok(())
}
