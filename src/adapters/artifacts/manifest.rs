//! Signed manifest binding a model directory's artifact files.
//!
//! `manifest.json` lists the SHA-256 of every artifact; `model.sig` is an
//! Ed25519 signature over the exact manifest bytes. Verifying the signature
//! and then every digest authenticates the whole directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::ModelError;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const SIGNATURE_FILE: &str = "model.sig";
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub version: u32,
    /// File name → lowercase hex SHA-256.
    pub files: BTreeMap<String, String>,
}

impl ArtifactManifest {
    /// Hash `names` inside `dir` into a new manifest.
    ///
    /// # Errors
    /// Returns `Io` if any file cannot be read.
    pub fn for_files(dir: &Path, names: &[&str]) -> Result<Self, ModelError> {
        let mut files = BTreeMap::new();
        for name in names {
            let bytes = read_artifact(&dir.join(name))?;
            files.insert((*name).to_string(), sha256_hex(&bytes));
        }
        Ok(Self {
            version: MANIFEST_VERSION,
            files,
        })
    }
}

/// Artifact contents exactly as hashed during verification.
///
/// Parsing these bytes, rather than re-reading the files, keeps a file
/// swapped after verification from being loaded.
#[derive(Debug)]
pub struct VerifiedArtifacts {
    pub manifest: ArtifactManifest,
    contents: BTreeMap<String, Vec<u8>>,
}

impl VerifiedArtifacts {
    /// Take the verified bytes of `name`.
    ///
    /// # Errors
    /// Returns `Integrity` if the manifest did not bind `name` (or it was
    /// already taken).
    pub fn take(&mut self, name: &str) -> Result<Vec<u8>, ModelError> {
        self.contents
            .remove(name)
            .ok_or_else(|| ModelError::Integrity(format!("{MANIFEST_FILE} does not bind {name}")))
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

pub(crate) fn read_artifact(path: &Path) -> Result<Vec<u8>, ModelError> {
    fs::read(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Verify `model.sig` over `manifest.json` and every digest the manifest lists.
///
/// `required` names files that the manifest must bind. Returns the contents
/// of every bound file as they were when hashed.
///
/// # Errors
/// Returns `Integrity` on a bad signature, missing binding or digest mismatch,
/// `Io` if a file is unreadable.
pub fn verify_manifest(
    dir: &Path,
    key: &VerifyingKey,
    required: &[&str],
) -> Result<VerifiedArtifacts, ModelError> {
    let sig_bytes = read_artifact(&dir.join(SIGNATURE_FILE))?;
    let sig_bytes: [u8; 64] = sig_bytes.as_slice().try_into().map_err(|_| {
        ModelError::Integrity(format!(
            "Invalid signature length (expected 64 bytes, got {})",
            sig_bytes.len()
        ))
    })?;
    let signature = Signature::from_bytes(&sig_bytes);

    let manifest_bytes = read_artifact(&dir.join(MANIFEST_FILE))?;
    key.verify(&manifest_bytes, &signature)
        .map_err(|_| ModelError::Integrity("Invalid manifest signature".into()))?;

    let manifest: ArtifactManifest = serde_json::from_slice(&manifest_bytes)
        .map_err(|e| ModelError::Integrity(format!("Invalid {MANIFEST_FILE} format: {e}")))?;
    if manifest.version != MANIFEST_VERSION {
        return Err(ModelError::Integrity(format!(
            "Unsupported manifest version: {}",
            manifest.version
        )));
    }

    if let Some(unbound) = required.iter().find(|r| !manifest.files.contains_key(**r)) {
        return Err(ModelError::Integrity(format!(
            "{MANIFEST_FILE} does not bind {unbound}"
        )));
    }

    let mut contents = BTreeMap::new();
    for (name, expected_hex) in &manifest.files {
        let bytes = read_artifact(&dir.join(name))?;
        if !constant_time_eq_str(&sha256_hex(&bytes), expected_hex) {
            return Err(ModelError::Integrity(format!("File hash mismatch for {name}")));
        }
        contents.insert(name.clone(), bytes);
    }

    tracing::info!(
        "Manifest signature and {} file hashes verified",
        manifest.files.len()
    );
    Ok(VerifiedArtifacts { manifest, contents })
}
