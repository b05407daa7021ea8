use anyhow::Result;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::KEY_LEN;

/// Default PBKDF2 work factor. The wrapper page hard-codes the same
/// value it was built with, so unlock latency in the browser scales
/// with this number.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    pub fn new(iterations: u32) -> anyhow::Result<Self> {
        let params = Self { iterations };
        params.validate()?;
        Ok(params)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.iterations < 1 {
            anyhow::bail!("PBKDF2 iteration count must be >= 1");
        }
        Ok(())
    }
}

pub fn derive_key(password: &str, salt: &[u8], kdf: KdfParams) -> Result<[u8; KEY_LEN]> {
    kdf.validate()?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, kdf.iterations, &mut key);

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];
        let kdf = KdfParams::new(100).unwrap();

        let k1 = derive_key("password", &salt, kdf).unwrap();
        let k2 = derive_key("password", &salt, kdf).unwrap();

        assert_eq!(k1, k2);
    }

    #[test]
    fn kdf_iterations_affect_output() {
        let salt = [7u8; 16];

        let k1 = derive_key("pw", &salt, KdfParams::new(100).unwrap()).unwrap();
        let k2 = derive_key("pw", &salt, KdfParams::new(200).unwrap()).unwrap();

        assert_ne!(k1, k2);
    }

    #[test]
    fn kdf_salt_affects_output() {
        let kdf = KdfParams::new(100).unwrap();

        let k1 = derive_key("pw", &[1u8; 16], kdf).unwrap();
        let k2 = derive_key("pw", &[2u8; 16], kdf).unwrap();

        assert_ne!(k1, k2);
    }

    #[test]
    fn kdf_zero_iterations_fails() {
        assert!(KdfParams::new(0).is_err());
    }
}
