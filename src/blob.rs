//! Wire format shared with the wrapper page.
//!
//! Layout:
//! ```text
//! SALT (16) | NONCE (12) | CIPHERTEXT+TAG
//! ```
//!
//! No magic, no version byte, no length prefixes: the browser-side
//! decryptor slices at fixed offsets 16 and 28. The whole blob travels
//! base64-encoded (standard alphabet, padded) inside a script string
//! literal in the wrapper page.

use crate::crypto::{NONCE_LEN, SALT_LEN, TAG_LEN};
use anyhow::{Context, Result, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD};

#[derive(Debug)]
pub struct Blob {
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl Blob {
    pub fn new(salt: [u8; SALT_LEN], nonce: [u8; NONCE_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            salt,
            nonce,
            ciphertext,
        }
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Packed byte length: `SALT_LEN + NONCE_LEN + ciphertext.len()`.
    pub fn len(&self) -> usize {
        SALT_LEN + NONCE_LEN + self.ciphertext.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        // Even an empty plaintext leaves a 16-byte tag behind.
        if data.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
            bail!("encrypted blob too short");
        }

        let salt: [u8; SALT_LEN] = data[..SALT_LEN].try_into().context("invalid salt length")?;
        let nonce: [u8; NONCE_LEN] = data[SALT_LEN..SALT_LEN + NONCE_LEN]
            .try_into()
            .context("invalid nonce length")?;
        let ciphertext = data[SALT_LEN + NONCE_LEN..].to_vec();

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text)
            .context("encrypted blob is not valid base64")?;
        Self::from_bytes(&bytes)
    }
}
