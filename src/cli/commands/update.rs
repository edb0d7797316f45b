//! `pm update` — change the mutable fields of an entry.
//!
//! Each prompt shows the current value; an empty answer keeps it.

use crate::cli::output;
use crate::cli::{prompt, unlock, Cli};
use crate::errors::{PmError, Result};
use crate::vault::EntryUpdate;

/// Execute the `update` command.
pub fn execute(cli: &Cli, title: &str) -> Result<()> {
    let session = unlock(cli)?;
    let _lock = session.storage.lock()?;
    let mut vault = session.storage.load_vault(&session.password)?;

    let current = vault
        .find(title)
        .ok_or_else(|| PmError::EntryNotFound(title.to_string()))?;

    output::info("Current entry:");
    output::print_entry(current, "********");
    output::tip("Press Enter to keep the current value.");

    let update = EntryUpdate {
        username: keep_if_empty(prompt::line("New username")?),
        secret: keep_if_empty(prompt::take_secret(prompt::secret("New password")?)),
        url: keep_if_empty(prompt::line("New URL")?),
        notes: keep_if_empty(prompt::line("New notes")?),
    };

    if update.is_empty() {
        output::info("No changes.");
        return Ok(());
    }

    vault.update(title, update)?;
    session.storage.save_vault(&vault, &session.password)?;

    output::success(&format!("Password entry '{title}' updated"));
    Ok(())
}

/// An empty answer means "keep the current value".
fn keep_if_empty(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}
