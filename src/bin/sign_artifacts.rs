//! Signing utility for cardiorisk model artifacts.
//!
//! Writes `manifest.json` (SHA-256 of `scaler.json` and `classifier.json`)
//! and its Ed25519 signature `model.sig` into a model directory.
//!
//! # Usage
//!
//! ```bash
//! sign_artifacts --generate-seed <path>   # new seed file, prints public key
//! sign_artifacts <model_dir>              # sign with an existing seed
//! ```
//!
//! The seed is read from the file named by `CARDIORISK_MODEL_SIGNING_KEY_B64_FILE`.
//! Debug builds also accept the seed itself in `CARDIORISK_MODEL_SIGNING_KEY_B64`.
//! Seed material is zeroized after use.

use std::env;
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use cardiorisk::adapters::artifacts::{
    ArtifactManifest, ARTIFACT_FILES, MANIFEST_FILE, SIGNATURE_FILE,
};

const KEY_FILE_ENV: &str = "CARDIORISK_MODEL_SIGNING_KEY_B64_FILE";
const KEY_ENV: &str = "CARDIORISK_MODEL_SIGNING_KEY_B64";

const USAGE: &str = "Usage: sign_artifacts <model_dir>\n       sign_artifacts --generate-seed <path> [--force]";

#[derive(Zeroize, ZeroizeOnDrop)]
struct Seed([u8; 32]);

enum Command {
    Sign(PathBuf),
    GenerateSeed { path: PathBuf, force: bool },
}

fn parse_args() -> Result<Command, String> {
    let mut args = env::args().skip(1);
    let mut model_dir: Option<PathBuf> = None;
    let mut seed_path: Option<PathBuf> = None;
    let mut force = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--generate-seed" => {
                let p = args.next().ok_or_else(|| USAGE.to_string())?;
                seed_path = Some(PathBuf::from(p));
            }
            "--force" => force = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => {
                return Err(format!("Unknown arg: {other}\n{USAGE}"));
            }
            _ => {
                if model_dir.replace(PathBuf::from(arg)).is_some() {
                    return Err(USAGE.to_string());
                }
            }
        }
    }

    match (model_dir, seed_path) {
        (Some(dir), None) => Ok(Command::Sign(dir)),
        (None, Some(path)) => Ok(Command::GenerateSeed { path, force }),
        _ => Err(USAGE.to_string()),
    }
}

fn trimmed_secret(raw: &str) -> Result<Zeroizing<String>, String> {
    let secret = raw.trim_end_matches(['\n', '\r']).to_string();
    if secret.is_empty() {
        return Err("Empty signing key".to_string());
    }
    Ok(Zeroizing::new(secret))
}

fn read_signing_seed_b64() -> Result<Zeroizing<String>, String> {
    if let Ok(path) = env::var(KEY_FILE_ENV) {
        let content = Zeroizing::new(
            fs::read_to_string(path.trim())
                .map_err(|e| format!("Failed reading signing key file: {e}"))?,
        );
        return trimmed_secret(&content);
    }

    // Dev-only fallback for convenience.
    if cfg!(debug_assertions) {
        if let Ok(v) = env::var(KEY_ENV) {
            return trimmed_secret(&Zeroizing::new(v));
        }
    }

    Err(format!(
        "Missing signing key. Provide {KEY_FILE_ENV} (or {KEY_ENV} in debug builds)."
    ))
}

fn read_signing_seed() -> Result<Seed, String> {
    let v = read_signing_seed_b64()?;

    let raw = Zeroizing::new(
        general_purpose::STANDARD
            .decode(v.trim())
            .map_err(|e| format!("Invalid base64 in signing key: {e}"))?,
    );

    if raw.len() != 32 {
        return Err(format!(
            "Signing key seed must be 32 bytes after base64 decode (got {})",
            raw.len()
        ));
    }

    let mut seed = [0u8; 32];
    seed.copy_from_slice(&raw);
    Ok(Seed(seed))
}

fn public_key_b64(signing_key: &SigningKey) -> String {
    general_purpose::STANDARD.encode(signing_key.verifying_key().to_bytes())
}

fn generate_seed(path: &Path, force: bool) -> Result<(), String> {
    let mut seed = Seed([0u8; 32]);
    OsRng.fill_bytes(&mut seed.0);
    let seed_b64 = Zeroizing::new(general_purpose::STANDARD.encode(&seed.0));

    let mut options = fs::OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(path)
        .map_err(|e| format!("Failed to create seed file {path:?}: {e}"))?;
    file.write_all(seed_b64.as_bytes())
        .and_then(|()| file.write_all(b"\n"))
        .map_err(|e| format!("Failed to write seed file {path:?}: {e}"))?;

    let signing_key = SigningKey::from_bytes(&seed.0);
    println!("Wrote seed: {path:?}");
    println!("CARDIORISK_MODEL_PUBKEY_B64={}", public_key_b64(&signing_key));
    Ok(())
}

fn sign(model_dir: &Path) -> Result<(), String> {
    let seed = read_signing_seed()?;
    let signing_key = SigningKey::from_bytes(&seed.0);

    let manifest = ArtifactManifest::for_files(model_dir, &ARTIFACT_FILES)
        .map_err(|e| format!("Failed to hash artifacts in {model_dir:?}: {e}"))?;
    let manifest_bytes = serde_json::to_vec_pretty(&manifest)
        .map_err(|e| format!("Failed to serialize {MANIFEST_FILE}: {e}"))?;

    let manifest_path = model_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &manifest_bytes)
        .map_err(|e| format!("Failed to write {manifest_path:?}: {e}"))?;

    let sig: Signature = signing_key.sign(&manifest_bytes);
    let sig_path = model_dir.join(SIGNATURE_FILE);
    fs::write(&sig_path, sig.to_bytes())
        .map_err(|e| format!("Failed to write {sig_path:?}: {e}"))?;

    println!("Signed manifest: {manifest_path:?}");
    println!("Wrote signature: {sig_path:?}");
    println!("CARDIORISK_MODEL_PUBKEY_B64={}", public_key_b64(&signing_key));
    Ok(())
}

fn main() -> Result<(), String> {
    match parse_args()? {
        Command::GenerateSeed { path, force } => generate_seed(&path, force),
        Command::Sign(dir) => sign(&dir),
    }
}
