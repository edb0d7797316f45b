//! High-level storage operations used by CLI commands.
//!
//! `Storage` owns one storage directory and wraps the format layer and
//! the crypto layer so that commands can work with simple calls like
//! `storage.load_vault(&password)`.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::keys::KeyDerivation;
use crate::errors::Result;

use super::collection::Vault;
use super::format::{self, LOCK_FILE_NAME, USER_FILE_NAME, VAULT_FILE_NAME};
use super::lock::StorageLock;
use super::user::User;

/// Handle to a storage directory holding `user.dat` and `vault.dat`.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
    kdf: KeyDerivation,
}

impl Storage {
    /// Bind to `dir`.  Nothing is touched on disk until an operation runs.
    ///
    /// The vault key is derived with the legacy SHA-256 mode until
    /// `with_key_derivation` says otherwise.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            kdf: KeyDerivation::default(),
        }
    }

    /// Use `kdf` to turn passphrases into vault keys.
    pub fn with_key_derivation(mut self, kdf: KeyDerivation) -> Self {
        self.kdf = kdf;
        self
    }

    /// Bind to `dir` with the key derivation recorded in its user file.
    ///
    /// Returns `None` if the directory has not been initialized.
    pub fn open_for_user(dir: impl Into<PathBuf>) -> Result<Option<(Self, User)>> {
        let storage = Self::new(dir);
        let Some(user) = storage.load_user()? else {
            return Ok(None);
        };
        let storage = storage.with_key_derivation(user.key_derivation());
        Ok(Some((storage, user)))
    }

    // ------------------------------------------------------------------
    // Directory
    // ------------------------------------------------------------------

    /// Create the storage directory with owner-only permissions.
    ///
    /// Idempotent: an existing directory is not an error.
    pub fn initialize(&self) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
            fs::DirBuilder::new()
                .recursive(true)
                .mode(format::DIR_MODE)
                .create(&self.dir)?;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(format::DIR_MODE))?;
        }

        #[cfg(not(unix))]
        fs::create_dir_all(&self.dir)?;

        tracing::debug!(dir = %self.dir.display(), "storage initialized");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Existence checks
    // ------------------------------------------------------------------

    pub fn user_exists(&self) -> Result<bool> {
        Ok(self.user_path().try_exists()?)
    }

    pub fn vault_exists(&self) -> Result<bool> {
        Ok(self.vault_path().try_exists()?)
    }

    // ------------------------------------------------------------------
    // User record
    // ------------------------------------------------------------------

    /// Write the user record (plaintext JSON), replacing any previous one.
    pub fn save_user(&self, user: &User) -> Result<()> {
        let bytes = format::encode_user(user)?;
        format::write_atomic(&self.user_path(), &bytes)?;
        tracing::debug!(path = %self.user_path().display(), "user record saved");
        Ok(())
    }

    /// Read the user record.  `None` if it has never been written.
    pub fn load_user(&self) -> Result<Option<User>> {
        match format::read_optional(&self.user_path())? {
            Some(bytes) => Ok(Some(format::decode_user(&bytes)?)),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Vault
    // ------------------------------------------------------------------

    /// Serialize, seal and write the whole vault.
    pub fn save_vault(&self, vault: &Vault, passphrase: &str) -> Result<()> {
        let plaintext = Zeroizing::new(format::encode_vault(vault)?);
        let key = self.kdf.derive(passphrase)?;
        let sealed = encrypt(key.as_bytes(), &plaintext)?;
        format::write_atomic(&self.vault_path(), &sealed)?;

        tracing::debug!(
            path = %self.vault_path().display(),
            entries = vault.len(),
            kdf = self.kdf.name(),
            "vault saved"
        );
        Ok(())
    }

    /// Read, open and parse the vault.
    ///
    /// A missing vault file yields an empty vault.  A wrong passphrase or
    /// tampered file is `AuthenticationFailed`; bytes that decrypt but do
    /// not parse are `InvalidVaultFormat`.
    pub fn load_vault(&self, passphrase: &str) -> Result<Vault> {
        let Some(sealed) = format::read_optional(&self.vault_path())? else {
            tracing::debug!(path = %self.vault_path().display(), "no vault file, starting empty");
            return Ok(Vault::new());
        };

        if self.kdf == KeyDerivation::Sha256 {
            tracing::warn!("vault key uses unsalted SHA-256 derivation");
        }

        let key = self.kdf.derive(passphrase)?;
        let plaintext = Zeroizing::new(decrypt(key.as_bytes(), &sealed)?);
        let vault = format::decode_vault(&plaintext)?;

        tracing::debug!(
            path = %self.vault_path().display(),
            entries = vault.len(),
            "vault loaded"
        );
        Ok(vault)
    }

    // ------------------------------------------------------------------
    // Locking
    // ------------------------------------------------------------------

    /// Take the exclusive lock for a read-modify-write cycle.
    pub fn lock(&self) -> Result<StorageLock> {
        StorageLock::acquire(&self.lock_path())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key_derivation(&self) -> &KeyDerivation {
        &self.kdf
    }

    pub fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE_NAME)
    }

    pub fn vault_path(&self) -> PathBuf {
        self.dir.join(VAULT_FILE_NAME)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE_NAME)
    }
}
