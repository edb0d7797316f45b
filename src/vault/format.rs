//! On-disk layout and serialization for the storage directory.
//!
//! ```text
//! <dir>/user.dat     JSON User record (plaintext)
//! <dir>/vault.dat    [12-byte nonce][AES-256-GCM(JSON Vault) + 16-byte tag]
//! <dir>/config.toml  optional settings
//! <dir>/.lock        advisory lock for read-modify-write cycles
//! ```
//!
//! Every file is written **atomically** with owner-only permissions.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serializer};

use super::collection::Vault;
use super::user::User;
use crate::errors::{PmError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const VAULT_FILE_NAME: &str = "vault.dat";
pub const USER_FILE_NAME: &str = "user.dat";
pub const LOCK_FILE_NAME: &str = ".lock";

/// Major version of the vault payload this build understands.
const SUPPORTED_MAJOR: &str = "1";

/// Permission bits for the storage directory.
#[cfg(unix)]
pub(crate) const DIR_MODE: u32 = 0o700;

/// Permission bits for every file written into it.
#[cfg(unix)]
pub(crate) const FILE_MODE: u32 = 0o600;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub fn encode_vault(vault: &Vault) -> Result<Vec<u8>> {
    serde_json::to_vec(vault).map_err(|e| PmError::SerializationError(format!("vault: {e}")))
}

/// Parse decrypted vault bytes.
///
/// Fails with `InvalidVaultFormat` for malformed JSON or a version this
/// build cannot read.
pub fn decode_vault(plaintext: &[u8]) -> Result<Vault> {
    let vault: Vault = serde_json::from_slice(plaintext)
        .map_err(|e| PmError::InvalidVaultFormat(format!("vault JSON: {e}")))?;

    let major = vault.version().split('.').next().unwrap_or_default();
    if major != SUPPORTED_MAJOR {
        return Err(PmError::InvalidVaultFormat(format!(
            "unsupported vault version '{}'",
            vault.version()
        )));
    }

    Ok(vault)
}

pub fn encode_user(user: &User) -> Result<Vec<u8>> {
    serde_json::to_vec(user).map_err(|e| PmError::SerializationError(format!("user: {e}")))
}

pub fn decode_user(bytes: &[u8]) -> Result<User> {
    serde_json::from_slice(bytes)
        .map_err(|e| PmError::InvalidUserRecord(format!("user JSON: {e}")))
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read a file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write `data` to `path` atomically.
///
/// 1. Write to a temp file in the same directory (mode 0600 on Unix).
/// 2. Flush and fsync it.
/// 3. Rename the temp file over the target path.
/// 4. Fsync the directory so the rename itself survives a crash.
///
/// The rename ensures readers never see a half-written file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = write_synced(&tmp_path, data).and_then(|()| {
        fs::rename(&tmp_path, path)?;
        Ok(())
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result?;

    sync_dir(parent)
}

/// Flush a directory's entries to disk.  No-op where directories cannot
/// be opened as files.
fn sync_dir(dir: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        fs::File::open(dir)?.sync_all()?;
    }
    #[cfg(not(unix))]
    let _ = dir;
    Ok(())
}

fn write_synced(path: &Path, data: &[u8]) -> Result<()> {
    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(FILE_MODE)
            .open(path)?
    };

    #[cfg(not(unix))]
    let mut file = fs::File::create(path)?;

    // A stale temp file keeps its old mode; tighten it explicitly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(FILE_MODE))?;
    }

    file.write_all(data)?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// `Option<String>` that is written as `""` when absent and reads `""` back
/// as `None`.
pub(crate) mod empty_as_none {
    use super::*;

    pub fn serialize<S>(
        value: &Option<String>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|v| !v.is_empty()))
    }
}

/// A list that may be stored as `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn decode_vault_rejects_garbage() {
        assert!(matches!(
            decode_vault(b"not json"),
            Err(PmError::InvalidVaultFormat(_))
        ));
        assert!(matches!(
            decode_vault(br#"{"title":"x"}"#),
            Err(PmError::InvalidVaultFormat(_))
        ));
    }

    #[test]
    fn decode_vault_rejects_future_major_version() {
        let result = decode_vault(br#"{"entries":[],"version":"2.0"}"#);
        assert!(matches!(result, Err(PmError::InvalidVaultFormat(_))));
        assert!(decode_vault(br#"{"entries":[],"version":"1.3"}"#).is_ok());
    }

    #[test]
    fn decode_user_rejects_garbage() {
        assert!(matches!(
            decode_user(b"{"),
            Err(PmError::InvalidUserRecord(_))
        ));
    }

    #[test]
    fn read_optional_maps_missing_to_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_optional(&dir.path().join("absent")).unwrap().is_none());
    }

    #[test]
    fn write_atomic_replaces_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.dat");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!dir.path().join(".file.dat.tmp").exists());
    }

    #[test]
    fn sync_dir_accepts_real_and_empty_parents() {
        let dir = TempDir::new().unwrap();
        sync_dir(dir.path()).unwrap();
        // `Path::new("file.dat").parent()` is the empty path.
        sync_dir(Path::new("")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn sync_dir_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            sync_dir(&dir.path().join("gone")),
            Err(PmError::Io(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_sets_owner_only_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.dat");
        write_atomic(&path, b"x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, FILE_MODE);
    }
}
