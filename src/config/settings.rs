use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::generator::DEFAULT_LENGTH;
use crate::crypto::kdf::Argon2Params;
use crate::crypto::keys::KeyDerivation;
use crate::errors::{PmError, Result};

/// Which key derivation `pm init` records for a new installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfChoice {
    Argon2id,
    Sha256,
}

/// Installation settings, loaded from `<data_dir>/config.toml`.
///
/// Every field has a sensible default so pm works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key derivation for new installations (default: argon2id).
    #[serde(default = "default_key_derivation")]
    pub key_derivation: KdfChoice,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Seconds before `pm get` clears the clipboard (default: 10).
    #[serde(default = "default_clipboard_clear_secs")]
    pub clipboard_clear_secs: u64,

    /// Length used by `pm generate` when none is given (default: 16).
    #[serde(default = "default_generate_length")]
    pub generate_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_derivation() -> KdfChoice {
    KdfChoice::Argon2id
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_clipboard_clear_secs() -> u64 {
    10
}

fn default_generate_length() -> usize {
    DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_derivation: default_key_derivation(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            clipboard_clear_secs: default_clipboard_clear_secs(),
            generate_length: default_generate_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the data directory.
    pub const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<data_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = Self::path(data_dir);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PmError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the config file for a data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(Self::FILE_NAME)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// A fresh key derivation for a new installation.
    pub fn new_key_derivation(&self) -> KeyDerivation {
        match self.key_derivation {
            KdfChoice::Argon2id => KeyDerivation::new_argon2id(&self.argon2_params()),
            KdfChoice::Sha256 => KeyDerivation::Sha256,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.key_derivation, KdfChoice::Argon2id);
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
        assert_eq!(s.clipboard_clear_secs, 10);
        assert_eq!(s.generate_length, 16);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.key_derivation, KdfChoice::Argon2id);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
key_derivation = "sha256"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
clipboard_clear_secs = 30
generate_length = 24
"#;
        fs::write(tmp.path().join("config.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.key_derivation, KdfChoice::Sha256);
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
        assert_eq!(settings.clipboard_clear_secs, 30);
        assert_eq!(settings.generate_length, 24);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "clipboard_clear_secs = 3\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.clipboard_clear_secs, 3);
        // Rest should be defaults
        assert_eq!(settings.key_derivation, KdfChoice::Argon2id);
        assert_eq!(settings.argon2_iterations, 3);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PmError::ConfigError(_))));
    }

    #[test]
    fn load_errors_on_unknown_kdf() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "key_derivation = \"md5\"\n").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn new_key_derivation_follows_choice() {
        let argon = Settings::default().new_key_derivation();
        assert_eq!(argon.name(), "argon2id");

        let legacy = Settings {
            key_derivation: KdfChoice::Sha256,
            ..Settings::default()
        };
        assert_eq!(legacy.new_key_derivation(), KeyDerivation::Sha256);
    }

    #[test]
    fn config_path_is_inside_data_dir() {
        let dir = Path::new("/home/user/.passwordmanager");
        assert_eq!(
            Settings::path(dir),
            PathBuf::from("/home/user/.passwordmanager/config.toml")
        );
    }
}
