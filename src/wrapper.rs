//! Generates the outer wrapper page and reads the parameters back out.
//!
//! The wrapper is a constant template with three markers. Rendering is
//! the same exact-literal substitution the bundler uses; extraction
//! scans for the two script constants the template defines, which is
//! what `verify` needs to replay the browser's decryption path.

use anyhow::{Context, Result, bail};

const TEMPLATE: &str = include_str!("wrapper_template.html");

const TITLE_MARKER: &str = "{{TITLE}}";
const BLOB_MARKER: &str = "{{BLOB}}";
const ITERATIONS_MARKER: &str = "{{ITERATIONS}}";

const BLOB_PREFIX: &str = "const ENCRYPTED = \"";
const ITERATIONS_PREFIX: &str = "const ITERATIONS = ";

/// Renders the wrapper page for the given title, base64 blob, and
/// PBKDF2 iteration count.
pub fn render(title: &str, blob_b64: &str, iterations: u32) -> String {
    TEMPLATE
        .replace(TITLE_MARKER, title)
        .replace(BLOB_MARKER, blob_b64)
        .replace(ITERATIONS_MARKER, &iterations.to_string())
}

/// Pulls the base64 blob and the iteration count out of a generated
/// wrapper page.
pub fn extract(page: &str) -> Result<(String, u32)> {
    let blob = extract_after(page, BLOB_PREFIX)
        .and_then(|rest| rest.split('"').next())
        .context("wrapper page has no embedded blob")?;

    let iterations: u32 = extract_after(page, ITERATIONS_PREFIX)
        .and_then(|rest| rest.split(';').next())
        .context("wrapper page has no iteration count")?
        .trim()
        .parse()
        .context("wrapper iteration count is not a number")?;

    if blob.is_empty() {
        bail!("wrapper page has an empty blob");
    }

    Ok((blob.to_string(), iterations))
}

fn extract_after<'a>(page: &'a str, prefix: &str) -> Option<&'a str> {
    page.find(prefix).map(|pos| &page[pos + prefix.len()..])
}
