//! Cryptographic primitives for page locking.
//!
//! Provides key derivation, authenticated encryption, and random
//! salt/nonce generation. Parameter choices are pinned by the browser
//! side of the format: the wrapper page decrypts with Web Crypto, so
//! the key comes from PBKDF2-SHA256 and the cipher is AES-256-GCM.

pub mod aead;
pub mod kdf;

pub use aead::{decrypt, encrypt, generate_nonce, generate_salt};
pub use kdf::{DEFAULT_ITERATIONS, KdfParams, derive_key};

/// Length of the salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the nonce (12 bytes, AES-GCM standard).
pub const NONCE_LEN: usize = 12;
/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the GCM authentication tag appended to the ciphertext (16 bytes).
pub const TAG_LEN: usize = 16;
