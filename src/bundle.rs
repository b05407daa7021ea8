//! Inlines the source fragments into a single standalone HTML string.
//!
//! Substitution is exact-literal string replacement of the reference
//! tags the shell is expected to contain, not HTML parsing. A shell
//! that spells a tag differently (extra attribute, single quotes) will
//! not match; in lenient mode the fragment is silently left out, in
//! strict mode the build fails naming the missing tag.

use crate::error::BundleError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// The HTML shell every source directory must contain.
pub const SHELL_FILE: &str = "index.html";
/// The stylesheet inlined into the shell.
pub const STYLESHEET_FILE: &str = "styles.css";

/// Source fragments loaded from a site directory.
#[derive(Debug)]
pub struct Bundle {
    shell: String,
    stylesheet: String,
    scripts: Vec<(String, String)>,
}

impl Bundle {
    /// Loads the shell, the stylesheet, and every `*.js` file from
    /// `dir`. Scripts are sorted by filename so output is stable
    /// across directory iteration orders.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let shell = fs::read_to_string(dir.join(SHELL_FILE))
            .with_context(|| format!("failed to read {}", dir.join(SHELL_FILE).display()))?;
        let stylesheet = fs::read_to_string(dir.join(STYLESHEET_FILE))
            .with_context(|| format!("failed to read {}", dir.join(STYLESHEET_FILE).display()))?;

        let mut scripts = Vec::new();
        for entry in fs::read_dir(dir)
            .with_context(|| format!("failed to read source directory {}", dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "js") {
                let name = entry.file_name().to_string_lossy().into_owned();
                let body = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                scripts.push((name, body));
            }
        }
        scripts.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            shell,
            stylesheet,
            scripts,
        })
    }

    /// Builds a bundle from in-memory fragments.
    pub fn new(shell: String, stylesheet: String, scripts: Vec<(String, String)>) -> Self {
        Self {
            shell,
            stylesheet,
            scripts,
        }
    }

    /// Produces the standalone document by replacing each external
    /// reference tag with an inline equivalent.
    pub fn inline(&self, strict: bool) -> Result<String, BundleError> {
        let mut doc = self.shell.clone();

        let link_tag = format!(r#"<link rel="stylesheet" href="{STYLESHEET_FILE}">"#);
        doc = substitute(
            doc,
            &link_tag,
            &format!("<style>\n{}\n</style>", self.stylesheet),
            strict,
        )?;

        for (name, body) in &self.scripts {
            let script_tag = format!(r#"<script src="{name}"></script>"#);
            doc = substitute(
                doc,
                &script_tag,
                &format!("<script>\n{body}\n</script>"),
                strict,
            )?;
        }

        Ok(doc)
    }
}

fn substitute(
    doc: String,
    tag: &str,
    replacement: &str,
    strict: bool,
) -> Result<String, BundleError> {
    if doc.contains(tag) {
        Ok(doc.replace(tag, replacement))
    } else if strict {
        Err(BundleError::MissingReference(tag.to_string()))
    } else {
        Ok(doc)
    }
}
