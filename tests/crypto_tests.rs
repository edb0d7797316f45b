//! Integration tests for the pmvault crypto module.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use pmvault::crypto::encryption::NONCE_LEN;
use pmvault::crypto::generator::{CHARSET, MAX_LENGTH, MIN_LENGTH};
use pmvault::crypto::{
    decrypt, derive_verifier, encrypt, generate_password, generate_salt, open, seal,
    verify_verifier, Argon2Params, KeyDerivation, MasterKey,
};
use pmvault::errors::PmError;

/// AES-GCM authentication tag length.
const TAG_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Sealing with a passphrase
// ---------------------------------------------------------------------------

#[test]
fn seal_open_roundtrip() {
    let plaintext = br#"{"entries":[],"version":"1.0"}"#;
    let sealed = seal(plaintext, "correct horse").expect("seal");
    let opened = open(&sealed, "correct horse").expect("open");
    assert_eq!(opened, plaintext);
}

#[test]
fn sealed_layout_is_nonce_ciphertext_tag() {
    let plaintext = b"twenty bytes of data";
    let sealed = seal(plaintext, "pw").unwrap();
    assert_eq!(sealed.len(), NONCE_LEN + plaintext.len() + TAG_LEN);
}

#[test]
fn seal_uses_fresh_nonce_each_time() {
    let a = seal(b"same", "pw").unwrap();
    let b = seal(b"same", "pw").unwrap();
    assert_ne!(a[..NONCE_LEN], b[..NONCE_LEN]);
    assert_ne!(a, b);
}

#[test]
fn open_with_wrong_passphrase_fails() {
    let sealed = seal(b"secret", "right").unwrap();
    assert!(matches!(
        open(&sealed, "wrong"),
        Err(PmError::AuthenticationFailed)
    ));
}

#[test]
fn open_rejects_tampered_ciphertext() {
    let mut sealed = seal(b"secret payload", "pw").unwrap();
    let last = sealed.len() - 1;
    sealed[last] ^= 0x01;
    assert!(open(&sealed, "pw").is_err());
}

#[test]
fn open_rejects_input_shorter_than_nonce() {
    assert!(open(&[0u8; NONCE_LEN - 1], "pw").is_err());
    assert!(open(&[], "pw").is_err());
}

#[test]
fn seal_key_is_sha256_of_passphrase() {
    // Data sealed with the passphrase opens with the raw SHA-256 key.
    let sealed = seal(b"interop", "hunter22").unwrap();
    let key: [u8; 32] = Sha256::digest(b"hunter22").into();
    assert_eq!(decrypt(&key, &sealed).unwrap(), b"interop");
}

// ---------------------------------------------------------------------------
// Raw-key encryption
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_with_raw_key() {
    let key = MasterKey::from_passphrase("pw");
    let ct = encrypt(key.as_bytes(), b"hello").unwrap();
    assert_eq!(decrypt(key.as_bytes(), &ct).unwrap(), b"hello");
}

#[test]
fn encrypt_rejects_short_key() {
    assert!(matches!(
        encrypt(&[0u8; 16], b"data"),
        Err(PmError::EncryptionFailed(_))
    ));
}

// ---------------------------------------------------------------------------
// Verifier and salt
// ---------------------------------------------------------------------------

#[test]
fn verifier_is_base64_sha256_of_passphrase_then_salt() {
    let expected = BASE64.encode(Sha256::digest(b"masterpassSALT123"));
    assert_eq!(derive_verifier("masterpass", "SALT123"), expected);
}

#[test]
fn verifier_check_accepts_only_the_right_passphrase() {
    let salt = generate_salt();
    let verifier = derive_verifier("masterpass", &salt);
    assert!(verify_verifier("masterpass", &salt, &verifier));
    assert!(!verify_verifier("masterpasS", &salt, &verifier));
    assert!(!verify_verifier("masterpass", "other-salt", &verifier));
}

#[test]
fn salt_decodes_to_32_bytes() {
    let salt = generate_salt();
    assert_eq!(BASE64.decode(&salt).unwrap().len(), 32);
    assert_ne!(salt, generate_salt());
}

// ---------------------------------------------------------------------------
// Key derivation modes
// ---------------------------------------------------------------------------

fn fast_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8192,
        iterations: 1,
        parallelism: 1,
    }
}

#[test]
fn argon2id_key_differs_from_legacy_key() {
    let kdf = KeyDerivation::new_argon2id(&fast_params());
    let stretched = kdf.derive("pw").unwrap();
    let legacy = KeyDerivation::Sha256.derive("pw").unwrap();
    assert_ne!(stretched.as_bytes(), legacy.as_bytes());
}

#[test]
fn argon2id_derivation_is_deterministic_for_a_record() {
    let kdf = KeyDerivation::new_argon2id(&fast_params());
    let a = kdf.derive("pw").unwrap();
    let b = kdf.derive("pw").unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn each_argon2id_record_gets_its_own_salt() {
    let a = KeyDerivation::new_argon2id(&fast_params());
    let b = KeyDerivation::new_argon2id(&fast_params());
    assert_ne!(a, b);
    assert_ne!(
        a.derive("pw").unwrap().as_bytes(),
        b.derive("pw").unwrap().as_bytes()
    );
}

// ---------------------------------------------------------------------------
// Password generation
// ---------------------------------------------------------------------------

#[test]
fn generated_password_uses_charset_and_length() {
    for len in [MIN_LENGTH, 16, 64, MAX_LENGTH] {
        let pw = generate_password(len).unwrap();
        assert_eq!(pw.chars().count(), len);
        assert!(pw.bytes().all(|b| CHARSET.contains(&b)));
    }
}

#[test]
fn generated_password_length_bounds() {
    assert!(matches!(
        generate_password(MIN_LENGTH - 1),
        Err(PmError::InvalidLength(_))
    ));
    assert!(matches!(
        generate_password(MAX_LENGTH + 1),
        Err(PmError::InvalidLength(_))
    ));
}
