//! Vault encryption keys.
//!
//! `KeyDerivation` records how a passphrase becomes the AES-256 key for
//! `vault.dat`.  It is stored in the user record so that opening the
//! vault always uses the same algorithm, salt and cost parameters that
//! sealed it.
//!
//! - `Sha256`: key = SHA-256(passphrase).  This is what vaults written
//!   without a `kdf` block use.  It is fast, unsalted, and therefore
//!   weak against offline brute force of a stolen `vault.dat`.
//! - `Argon2id`: memory-hard and salted with its own random salt.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::kdf::{derive_argon2_key, Argon2Params, KEY_LEN, SALT_LEN};
use crate::errors::{PmError, Result};

/// How the vault key is derived from the master passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum KeyDerivation {
    #[default]
    Sha256,
    Argon2id {
        /// Base64 of the 32-byte KDF salt (independent of the verifier salt).
        salt: String,
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl KeyDerivation {
    /// A fresh Argon2id configuration with a newly generated salt.
    pub fn new_argon2id(params: &Argon2Params) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        Self::Argon2id {
            salt: BASE64.encode(salt),
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
        }
    }

    /// Short name used in logs and output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Argon2id { .. } => "argon2id",
        }
    }

    /// Check that this derivation can ever produce a key.
    ///
    /// `pm init` runs this before recording a new derivation.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Sha256 => Ok(()),
            Self::Argon2id {
                memory_kib,
                iterations,
                parallelism,
                ..
            } => Argon2Params {
                memory_kib: *memory_kib,
                iterations: *iterations,
                parallelism: *parallelism,
            }
            .validate(),
        }
    }

    /// Derive the vault key for `passphrase`.
    pub fn derive(&self, passphrase: &str) -> Result<MasterKey> {
        match self {
            Self::Sha256 => Ok(MasterKey::from_passphrase(passphrase)),
            Self::Argon2id {
                salt,
                memory_kib,
                iterations,
                parallelism,
            } => {
                let salt = BASE64
                    .decode(salt)
                    .map_err(|e| PmError::KeyDerivationFailed(format!("bad KDF salt: {e}")))?;
                let params = Argon2Params {
                    memory_kib: *memory_kib,
                    iterations: *iterations,
                    parallelism: *parallelism,
                };
                let mut bytes = derive_argon2_key(passphrase.as_bytes(), &salt, &params)?;
                let key = MasterKey::new(bytes);
                bytes.zeroize();
                Ok(key)
            }
        }
    }
}

/// A wrapper around a 32-byte key that automatically zeroes
/// its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Legacy derivation: the key is the SHA-256 digest of the passphrase.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&digest);
        let key = Self::new(bytes);
        bytes.zeroize();
        key
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
