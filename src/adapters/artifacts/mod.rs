//! Model artifact adapter: JSON scaler and classifier exports.
//!
//! A model directory holds:
//! - `scaler.json`: per-feature mean and scale of the fitted standardizer
//! - `classifier.json`: logistic regression coefficients, intercept and classes
//! - `manifest.json` + `model.sig`: Ed25519-signed SHA-256 digests of both
//!
//! # Security
//!
//! - Artifacts are loaded only after the signed manifest verifies
//! - Unsigned loading is compiled only into debug builds
//! - In release builds, ALL artifacts MUST be bound by a valid signature

mod logistic;
mod manifest;
mod scaler;

use std::path::Path;

pub use logistic::LogisticRegression;
pub use manifest::{
    sha256_hex, verify_manifest, ArtifactManifest, VerifiedArtifacts, MANIFEST_FILE,
    MANIFEST_VERSION, SIGNATURE_FILE,
};
pub use scaler::StandardScaler;

use crate::config::ArtifactTrust;
use crate::ports::ModelError;

pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Files every signed manifest must bind.
pub const ARTIFACT_FILES: [&str; 2] = [SCALER_FILE, CLASSIFIER_FILE];

/// Load the scaler and classifier from `dir`.
///
/// # Errors
/// Returns `Integrity` if the manifest does not verify (or unsigned loading
/// is requested in a release build), `Io`/`InvalidArtifact` for unreadable or
/// malformed artifacts.
pub fn load_model_dir(
    dir: &Path,
    trust: &ArtifactTrust,
) -> Result<(StandardScaler, LogisticRegression), ModelError> {
    let (scaler_bytes, classifier_bytes) = match trust {
        ArtifactTrust::Signed(key) => {
            let mut verified = verify_manifest(dir, key, &ARTIFACT_FILES)?;
            (verified.take(SCALER_FILE)?, verified.take(CLASSIFIER_FILE)?)
        }
        ArtifactTrust::Unsigned => read_unsigned(dir)?,
    };

    let scaler = StandardScaler::from_json(&scaler_bytes)?;
    let classifier = LogisticRegression::from_json(&classifier_bytes)?;

    tracing::info!(
        "Loaded model artifacts from {:?} (scaler features={}, classifier features={})",
        dir,
        scaler.feature_names.len(),
        classifier.coefficients.len()
    );

    Ok((scaler, classifier))
}

#[cfg(debug_assertions)]
fn read_unsigned(dir: &Path) -> Result<(Vec<u8>, Vec<u8>), ModelError> {
    tracing::warn!(
        "Loading UNSIGNED model artifacts from {:?}. \
         This is only allowed in debug builds for testing.",
        dir
    );
    Ok((
        manifest::read_artifact(&dir.join(SCALER_FILE))?,
        manifest::read_artifact(&dir.join(CLASSIFIER_FILE))?,
    ))
}

#[cfg(not(debug_assertions))]
fn read_unsigned(dir: &Path) -> Result<(Vec<u8>, Vec<u8>), ModelError> {
    tracing::error!(
        "Refusing unsigned model artifacts in {:?}; release builds require a signed manifest",
        dir
    );
    Err(ModelError::Integrity(
        "Signed manifest required in release builds".into(),
    ))
}
