//! `pm add` — append a new password entry to the vault.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt, unlock, Cli};
use crate::crypto::generate_password;
use crate::errors::{PmError, Result};
use crate::vault::NewEntry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, title: &str, generate: bool, length: Option<usize>) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PmError::EmptyTitle);
    }

    let session = unlock(cli)?;
    let _lock = session.storage.lock()?;
    let mut vault = session.storage.load_vault(&session.password)?;

    if vault.find(title).is_some() {
        output::warning(&format!(
            "An entry titled '{title}' already exists; lookups will keep using the first one."
        ));
    }

    let username = prompt::line("Username")?;
    let secret = if generate {
        let length = length.unwrap_or(session.settings.generate_length);
        Zeroizing::new(generate_password(length)?)
    } else {
        prompt::secret("Password")?
    };
    let url = prompt::line("URL (optional)")?;
    let notes = prompt::line("Notes (optional)")?;

    let entry = NewEntry::new(title, username, prompt::take_secret(secret))
        .with_url(url)
        .with_notes(notes);
    vault.add(entry)?;

    session.storage.save_vault(&vault, &session.password)?;

    output::success(&format!(
        "Password entry '{title}' added ({} total)",
        vault.len()
    ));
    if generate {
        output::tip(&format!("Run `pm get {title}` to copy the generated password."));
    }

    Ok(())
}
