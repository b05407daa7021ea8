//! Output directory handling.
//!
//! The wrapper page is written with a temp-file-and-rename scheme so a
//! crash mid-build never leaves a truncated `index.html` behind.
//! Auxiliary assets are copied verbatim when their extension is on the
//! allow-list; everything else in the source directory is ignored.

use anyhow::{Context, Result};
use getrandom::fill;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the generated wrapper file.
pub const WRAPPER_FILE: &str = "index.html";

/// Extensions of auxiliary files copied into the output directory.
pub const ASSET_EXTENSIONS: &[&str] = &["ico", "png", "svg", "webmanifest"];

/// The directory the build artifacts land in.
#[derive(Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn wrapper_path(&self) -> PathBuf {
        self.path.join(WRAPPER_FILE)
    }

    /// Writes the wrapper page atomically:
    /// 1. Write to a temporary file with a random name
    /// 2. Sync the temporary file to disk
    /// 3. Atomically replace any previous wrapper
    /// 4. Sync the directory so the rename is persisted
    ///
    /// Creates the output directory if it does not exist.
    pub fn write_wrapper(&self, data: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.path)
            .with_context(|| format!("failed to create output directory {}", self.path.display()))?;

        let target = self.wrapper_path();
        let tmp_path = random_tmp_path(&target)?;

        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        tmp_file.write_all(data)?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = atomic_replace(&tmp_path, &target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        let dir = File::open(&self.path)?;
        dir.sync_all()?;

        Ok(target)
    }

    /// Copies every allow-listed file from `source` into the output
    /// directory, preserving filenames. Returns the copied names,
    /// sorted. Non-matching files are skipped without error.
    pub fn copy_assets(&self, source: &Path) -> Result<Vec<String>> {
        fs::create_dir_all(&self.path)?;

        let mut copied = Vec::new();
        for entry in fs::read_dir(source)
            .with_context(|| format!("failed to read source directory {}", source.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let allowed = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ASSET_EXTENSIONS.contains(&ext));
            if !allowed {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            fs::copy(&path, self.path.join(&name))
                .with_context(|| format!("failed to copy {name}"))?;
            copied.push(name);
        }

        copied.sort();
        Ok(copied)
    }
}

/// Unique temporary file path next to the target.
///
/// Uses cryptographically secure random bytes to avoid name collisions.
/// Format: `filename.tmp.<randomhex>`
fn random_tmp_path(target: &Path) -> Result<PathBuf> {
    let mut buf = [0u8; 8]; // 64 bit entropy
    fill(&mut buf)?;

    let rand_string = buf.iter().map(|b| format!("{:02x}", b)).collect::<String>();

    let file_name = target.file_name().unwrap().to_string_lossy();

    Ok(target.with_file_name(format!("{}.tmp.{}", file_name, rand_string)))
}

/// Atomically replaces `target` with `tmp_path`.
///
/// Uses Windows `ReplaceFileW` with `REPLACEFILE_WRITE_THROUGH` when a
/// previous wrapper exists; a first build falls back to a plain rename
/// since `ReplaceFileW` requires an existing target.
#[cfg(target_os = "windows")]
fn atomic_replace(tmp_path: &Path, target: &Path) -> Result<()> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

    if !target.exists() {
        fs::rename(tmp_path, target)?;
        return Ok(());
    }

    fn to_wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(std::iter::once(0)).collect()
    }

    let target_w = to_wide(target.as_os_str());
    let tmp_w = to_wide(tmp_path.as_os_str());

    // SAFETY:
    // - Strings are valid UTF-16 and null-terminated
    // - Pointers remain valid during the call
    // - Windows does not retain the pointers after return
    let result = unsafe {
        ReplaceFileW(
            target_w.as_ptr(),
            tmp_w.as_ptr(),
            std::ptr::null(),
            REPLACEFILE_WRITE_THROUGH,
            std::ptr::null(),
            std::ptr::null(),
        )
    };

    if result == 0 {
        let err = std::io::Error::last_os_error();
        return Err(err).context("atomic replace failed");
    }

    Ok(())
}

/// Atomically replaces `target` with `tmp_path`.
///
/// On Unix, `rename()` is atomic when both paths are on the same filesystem.
#[cfg(not(target_os = "windows"))]
fn atomic_replace(tmp_path: &Path, target: &Path) -> Result<()> {
    fs::rename(tmp_path, target)?;
    Ok(())
}
