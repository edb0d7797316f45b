//! The authentication record stored in `user.dat`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{derive_verifier, generate_salt, verify_verifier};
use crate::crypto::keys::KeyDerivation;
use crate::errors::{PmError, Result};

/// Master-passphrase verifier, its salt, and how the vault key is derived.
///
/// Written once by `pm init` and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// `base64(SHA-256(passphrase || salt))`.
    #[serde(rename = "master_password_hash")]
    pub verifier: String,

    /// Base64 of 32 random bytes.
    pub salt: String,

    pub created_at: DateTime<Utc>,

    /// Vault key derivation.  Absent in records written before it existed,
    /// which means the SHA-256 passphrase key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf: Option<KeyDerivation>,
}

impl User {
    /// Build a fresh record for `passphrase` with a new random salt.
    pub fn new(passphrase: &str, kdf: KeyDerivation) -> Self {
        let salt = generate_salt();
        let verifier = derive_verifier(passphrase, &salt);
        // SHA-256 is recorded by omission, like records that predate `kdf`.
        let kdf = match kdf {
            KeyDerivation::Sha256 => None,
            other => Some(other),
        };
        Self {
            verifier,
            salt,
            created_at: Utc::now(),
            kdf,
        }
    }

    /// Constant-time check of `passphrase` against the stored verifier.
    pub fn verify(&self, passphrase: &str) -> Result<()> {
        if self.salt.is_empty() {
            return Err(PmError::InvalidUserRecord("missing salt".into()));
        }
        if verify_verifier(passphrase, &self.salt, &self.verifier) {
            Ok(())
        } else {
            Err(PmError::InvalidMasterPassword)
        }
    }

    /// The key derivation to use for this installation's vault.
    pub fn key_derivation(&self) -> KeyDerivation {
        self.kdf.clone().unwrap_or_default()
    }
}
