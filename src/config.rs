//! Runtime settings read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CARDIORISK_MODEL_DIR` | `models` | directory with scaler/classifier artifacts |
//! | `CARDIORISK_LOG_MODE` | `auto` | `stderr`, `file` or `auto` |
//! | `CARDIORISK_LOG_FILE` | `cardiorisk.log` | log path in `file` mode |
//! | `CARDIORISK_MODEL_PUBKEY_B64` | | base64 Ed25519 key that signed the manifest |
//! | `CARDIORISK_MODEL_PUBKEY_B64_FILE` | | file holding that key |
//! | `CARDIORISK_ALLOW_UNSIGNED_MODELS` | `false` | load without a manifest (debug builds only) |

use std::path::PathBuf;

use base64::Engine;
use ed25519_dalek::VerifyingKey;

use crate::CardioRiskError;

pub const MODEL_DIR_ENV: &str = "CARDIORISK_MODEL_DIR";
pub const LOG_MODE_ENV: &str = "CARDIORISK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "CARDIORISK_LOG_FILE";
pub const PUBKEY_ENV: &str = "CARDIORISK_MODEL_PUBKEY_B64";
pub const PUBKEY_FILE_ENV: &str = "CARDIORISK_MODEL_PUBKEY_B64_FILE";
pub const ALLOW_UNSIGNED_ENV: &str = "CARDIORISK_ALLOW_UNSIGNED_MODELS";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Stderr,
    File,
    /// Currently the same as `Stderr`; stdout is reserved for results.
    Auto,
}

impl LogMode {
    /// True if logs should be written to the log file.
    #[must_use]
    pub fn uses_file(self) -> bool {
        matches!(self, Self::File)
    }
}

impl std::str::FromStr for LogMode {
    type Err = CardioRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stderr" => Ok(Self::Stderr),
            "file" => Ok(Self::File),
            "auto" | "" => Ok(Self::Auto),
            other => Err(CardioRiskError::Config(format!(
                "{LOG_MODE_ENV} must be stderr, file or auto (got {other:?})"
            ))),
        }
    }
}

/// How model artifacts are authenticated before loading.
#[derive(Debug, Clone)]
pub enum ArtifactTrust {
    /// Require a manifest signed by this key.
    Signed(VerifyingKey),
    /// Skip the manifest. Refused in release builds.
    Unsigned,
}

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub trust: ArtifactTrust,
}

impl Settings {
    /// Read settings from process environment variables.
    ///
    /// # Errors
    /// Returns `Config` for malformed values or when no artifact trust is configured.
    pub fn from_env() -> Result<Self, CardioRiskError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `Config` for malformed values or when no artifact trust is configured.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CardioRiskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_dir = lookup(MODEL_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models"));

        let log_mode = match lookup(LOG_MODE_ENV) {
            Some(v) => v.parse()?,
            None => LogMode::Auto,
        };

        let log_file = lookup(LOG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cardiorisk.log"));

        let trust = if let Some(b64) = lookup(PUBKEY_ENV) {
            ArtifactTrust::Signed(verifying_key_from_b64(&b64)?)
        } else if let Some(path) = lookup(PUBKEY_FILE_ENV) {
            let b64 = std::fs::read_to_string(path.trim()).map_err(|e| {
                CardioRiskError::Config(format!("Failed reading {PUBKEY_FILE_ENV}: {e}"))
            })?;
            ArtifactTrust::Signed(verifying_key_from_b64(&b64)?)
        } else if lookup(ALLOW_UNSIGNED_ENV).is_some_and(|v| parse_bool(&v)) {
            ArtifactTrust::Unsigned
        } else {
            return Err(CardioRiskError::Config(format!(
                "No model verifying key configured. Set {PUBKEY_ENV} or {PUBKEY_FILE_ENV} \
                 ({ALLOW_UNSIGNED_ENV}=true bypasses this in debug builds)."
            )));
        };

        Ok(Self {
            model_dir,
            log_mode,
            log_file,
            trust,
        })
    }
}

pub(crate) fn parse_bool(v: &str) -> bool {
    matches!(v, "1" | "true" | "TRUE" | "yes" | "YES")
}

/// Decode a base64 Ed25519 public key.
///
/// # Errors
/// Returns `Config` if the text is not base64 of a valid 32-byte key.
pub fn verifying_key_from_b64(b64: &str) -> Result<VerifyingKey, CardioRiskError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|_| CardioRiskError::Config("Invalid public key base64".into()))?;
    let key: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        CardioRiskError::Config(format!(
            "Invalid public key length (expected 32 bytes, got {})",
            bytes.len()
        ))
    })?;
    VerifyingKey::from_bytes(&key)
        .map_err(|_| CardioRiskError::Config("Invalid verifying key".into()))
}
