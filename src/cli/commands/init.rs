//! `pm init` — create the storage directory and the master password record.

use crate::cli::output;
use crate::cli::{data_dir, prompt, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::vault::{Storage, User};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = data_dir(cli)?;
    let storage = Storage::new(&dir);

    // 1. Create the storage directory (owner-only) if needed.
    storage.initialize()?;
    let _lock = storage.lock()?;

    // 2. Nothing to do if a master password is already set.
    if storage.user_exists()? {
        output::info("Password manager is already initialized.");
        return Ok(());
    }

    if storage.vault_exists()? {
        output::warning(
            "Found an existing vault.dat — it only opens with the password that created it.",
        );
    }

    // 3. Settings must describe a key derivation that can open the vault later.
    let settings = Settings::load(&dir)?;
    let kdf = settings.new_key_derivation();
    kdf.validate()?;

    // 4. Prompt for the master password (with confirmation).
    let password = prompt::new_master_password()?;

    // 5. Record the verifier and the key derivation.
    let user = User::new(&password, kdf);
    storage.save_user(&user)?;

    output::success("Password manager initialized successfully!");
    output::info(&format!(
        "Storage: {} (key derivation: {})",
        dir.display(),
        user.key_derivation().name()
    ));
    output::tip("Run `pm add <TITLE>` to add an entry.");
    output::tip("Run `pm generate` to create a strong password.");

    Ok(())
}
