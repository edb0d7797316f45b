//! Cryptographic primitives for pmvault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption, plus passphrase `seal`/`open` (`encryption`)
//! - Passphrase verifiers, salts and Argon2id key stretching (`kdf`)
//! - Vault key derivation modes and the zeroizing `MasterKey` (`keys`)
//! - Random password generation (`generator`)

pub mod encryption;
pub mod generator;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_verifier, ...};
pub use encryption::{decrypt, encrypt, open, seal};
pub use generator::generate_password;
pub use kdf::{derive_argon2_key, derive_verifier, generate_salt, verify_verifier, Argon2Params};
pub use keys::{KeyDerivation, MasterKey};
