//! `pm get` — show an entry and copy its password to the clipboard.

use std::time::Duration;

use crate::cli::{clipboard, output};
use crate::cli::{unlock, Cli};
use crate::errors::{PmError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, title: &str, show: bool) -> Result<()> {
    let session = unlock(cli)?;
    let vault = session.storage.load_vault(&session.password)?;

    let entry = vault
        .find(title)
        .ok_or_else(|| PmError::EntryNotFound(title.to_string()))?;

    if show {
        output::print_entry(entry, &entry.secret);
        return Ok(());
    }

    let secs = session.settings.clipboard_clear_secs;
    match clipboard::copy(&entry.secret) {
        Ok(copied) => {
            output::print_entry(entry, &format!("[Copied to clipboard for {secs} seconds]"));
            output::info("Waiting to clear clipboard...");
            copied.clear_after(Duration::from_secs(secs))?;
            output::success("Clipboard cleared.");
        }
        Err(e) => {
            output::warning(&format!("{e} — showing the password instead"));
            output::print_entry(entry, &entry.secret);
        }
    }

    Ok(())
}
