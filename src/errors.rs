use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in pmvault.
#[derive(Debug, Error)]
pub enum PmError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Tag verification failed. Wrong passphrase and tampered bytes are
    /// deliberately reported the same way.
    #[error("Cannot open vault — wrong password or corrupted data")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Invalid master password")]
    InvalidMasterPassword,

    // --- Storage errors ---
    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("Invalid user record: {0}")]
    InvalidUserRecord(String),

    #[error("Storage at {0} is in use by another pm process")]
    StorageLocked(PathBuf),

    #[error("Password manager not initialized — run `pm init` first")]
    NotInitialized,

    // --- Entry errors ---
    #[error("Password entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Entry title cannot be empty")]
    EmptyTitle,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}

/// Convenience type alias for pmvault results.
pub type Result<T> = std::result::Result<T, PmError>;
