//! `pm delete` — remove an entry from the vault.

use crate::cli::output;
use crate::cli::{prompt, unlock, Cli};
use crate::errors::{PmError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, title: &str, force: bool) -> Result<()> {
    let session = unlock(cli)?;
    let _lock = session.storage.lock()?;
    let mut vault = session.storage.load_vault(&session.password)?;

    if vault.find(title).is_none() {
        return Err(PmError::EntryNotFound(title.to_string()));
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !prompt::confirm(&format!("Delete '{title}'?"))? {
        output::info("Deletion cancelled.");
        return Ok(());
    }

    vault.remove(title)?;
    session.storage.save_vault(&vault, &session.password)?;

    output::success(&format!("Password entry '{title}' deleted"));
    Ok(())
}
