mod blob;
mod bundle;
mod config;
mod crypto;
mod error;
mod output;
mod wrapper;

pub use crate::blob::Blob;
pub use crate::bundle::{Bundle, SHELL_FILE, STYLESHEET_FILE};
pub use crate::config::{MANIFEST_FILE, Manifest};
pub use crate::crypto::{DEFAULT_ITERATIONS, KdfParams};
pub use crate::error::BundleError;
pub use crate::output::{ASSET_EXTENSIONS, OutputDir, WRAPPER_FILE};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Everything one build run needs, passed in explicitly. The password
/// never lives anywhere else; it is consumed by the build.
pub struct BuildConfig {
    pub password: Zeroizing<String>,
    pub kdf: KdfParams,
    pub title: String,
    pub strict: bool,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// What a build produced, for the progress report.
pub struct BuildReport {
    pub plaintext_len: usize,
    pub blob_len: usize,
    pub base64_len: usize,
    pub copied: Vec<String>,
    pub wrapper_path: PathBuf,
}

/// Runs the whole pipeline: bundle, encrypt, pack, render, write, copy.
///
/// Salt and nonce are regenerated on every call, so rebuilding the same
/// site twice never reuses a nonce and never produces the same blob.
pub fn build(config: BuildConfig) -> Result<BuildReport> {
    let BuildConfig {
        password,
        kdf,
        title,
        strict,
        source_dir,
        output_dir,
    } = config;

    let bundle = Bundle::from_dir(&source_dir)?;
    let document = bundle.inline(strict)?;
    let plaintext = document.into_bytes();

    let salt = crypto::generate_salt()?;
    let nonce = crypto::generate_nonce()?;
    let key = Zeroizing::new(
        crypto::derive_key(&password, &salt, kdf).context("failed to derive encryption key")?,
    );
    drop(password);

    let ciphertext = crypto::encrypt(&*key, &nonce, &plaintext)?;
    drop(key);

    let blob = Blob::new(salt, nonce, ciphertext);
    let blob_b64 = blob.to_base64();

    let page = wrapper::render(&title, &blob_b64, kdf.iterations());

    let out = OutputDir::new(output_dir);
    let wrapper_path = out.write_wrapper(page.as_bytes())?;
    let copied = out.copy_assets(&source_dir)?;

    Ok(BuildReport {
        plaintext_len: plaintext.len(),
        blob_len: blob.len(),
        base64_len: blob_b64.len(),
        copied,
        wrapper_path,
    })
}

/// Replays the browser's unlock sequence against a generated wrapper:
/// extract blob and iteration count, slice at the fixed offsets,
/// derive the key, decrypt. Returns the recovered plaintext size.
pub fn verify(wrapper_path: &Path, password: Zeroizing<String>) -> Result<usize> {
    let page = fs::read_to_string(wrapper_path)
        .with_context(|| format!("failed to read {}", wrapper_path.display()))?;

    let (blob_b64, iterations) = wrapper::extract(&page)?;
    let blob = Blob::from_base64(&blob_b64)?;
    let kdf = KdfParams::new(iterations)?;

    let key = Zeroizing::new(
        crypto::derive_key(&password, blob.salt(), kdf)
            .context("failed to derive encryption key")?,
    );
    drop(password);

    let plaintext = crypto::decrypt(&*key, blob.nonce(), blob.ciphertext())?;
    Ok(plaintext.len())
}
