//! Optional per-site manifest.
//!
//! A `pagelock.json` next to the source assets supplies build defaults
//! so a site can pin its own title, work factor, and strictness. CLI
//! flags always win over manifest values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Manifest filename looked up in the source directory.
pub const MANIFEST_FILE: &str = "pagelock.json";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub title: Option<String>,
    pub iterations: Option<u32>,
    pub strict: Option<bool>,
}

impl Manifest {
    /// Loads the manifest from `source_dir` if one exists; a missing
    /// file yields an empty manifest, a malformed one is an error.
    pub fn load(source_dir: &Path) -> Result<Self> {
        let path = source_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid manifest {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_manifest_is_empty() {
        let dir = tempdir().unwrap();

        let manifest = Manifest::load(dir.path()).unwrap();
        assert!(manifest.title.is_none());
        assert!(manifest.iterations.is_none());
        assert!(manifest.strict.is_none());
    }

    #[test]
    fn manifest_values_are_read() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{ "title": "Field Study", "iterations": 250000, "strict": true }"#,
        )
        .unwrap();

        let manifest = Manifest::load(dir.path()).unwrap();
        assert_eq!(manifest.title.as_deref(), Some("Field Study"));
        assert_eq!(manifest.iterations, Some(250_000));
        assert_eq!(manifest.strict, Some(true));
    }

    #[test]
    fn malformed_manifest_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();

        assert!(Manifest::load(dir.path()).is_err());
    }

    #[test]
    fn unknown_keys_fail() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), r#"{ "titel": "typo" }"#).unwrap();

        assert!(Manifest::load(dir.path()).is_err());
    }
}
