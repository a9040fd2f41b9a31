//! Content encryption using XChaCha20-Poly1305
//!
//! Each upload is encrypted under its own fresh `Secret` key. The nonce is
//! drawn per encryption call and returned alongside the ciphertext; it is
//! carried in the wire envelope, not hidden. Only the key is secret.

use std::ops::Deref;

use chacha20poly1305::Key;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use serde::{Deserialize, Serialize};

/// Size of XChaCha20-Poly1305 nonce in bytes
pub const NONCE_SIZE: usize = 24;
/// Size of XChaCha20-Poly1305 key in bytes (256 bits)
pub const SECRET_SIZE: usize = 32;

/// Errors that can occur during encryption/decryption
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret error: {0}")]
    Default(#[from] anyhow::Error),
    /// Authentication tag verification failed. Deliberately opaque: a wrong
    /// key and a tampered ciphertext are indistinguishable.
    #[error("authentication failed")]
    Authentication,
}

/// A 256-bit one-time symmetric key for content encryption
///
/// A `Secret` encrypts exactly one serialized payload using XChaCha20-Poly1305
/// AEAD, then travels to the recipient inside the address token. Tampering
/// with the ciphertext or nonce makes decryption fail rather than silently
/// corrupt data.
///
/// # Examples
///
/// ```ignore
/// let secret = Secret::generate();
///
/// let (nonce, ciphertext) = secret.encrypt(b"sensitive data")?;
/// let recovered = secret.decrypt(&nonce, &ciphertext)?;
/// assert_eq!(b"sensitive data", &recovered[..]);
/// ```
#[derive(PartialEq, Clone, Serialize, Deserialize)]
pub struct Secret([u8; SECRET_SIZE]);

impl std::fmt::Debug for Secret {
    // Key material must never reach logs or error messages
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(..)")
    }
}

impl Deref for Secret {
    type Target = [u8; SECRET_SIZE];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; SECRET_SIZE]> for Secret {
    fn from(bytes: [u8; SECRET_SIZE]) -> Self {
        Secret(bytes)
    }
}

impl Secret {
    /// Generate a new random secret using a cryptographically secure RNG
    pub fn generate() -> Self {
        let mut buff = [0; SECRET_SIZE];
        getrandom::getrandom(&mut buff).expect("failed to generate random bytes");
        Self(buff)
    }

    /// Create a secret from a byte slice
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length is not exactly `SECRET_SIZE` bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, SecretError> {
        if data.len() != SECRET_SIZE {
            return Err(anyhow::anyhow!(
                "invalid secret size, expected {}, got {}",
                SECRET_SIZE,
                data.len()
            )
            .into());
        }
        let mut buff = [0; SECRET_SIZE];
        buff.copy_from_slice(data);
        Ok(buff.into())
    }

    /// Get a reference to the secret key bytes
    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Encrypt data using XChaCha20-Poly1305 AEAD
    ///
    /// A random nonce is generated for each encryption operation and returned
    /// separately so the caller can place it in the wire envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails (should be rare, only on system
    /// RNG failure).
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<([u8; NONCE_SIZE], Vec<u8>), SecretError> {
        let key = Key::from_slice(self.bytes());
        let cipher = XChaCha20Poly1305::new(key);

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce_bytes)
            .map_err(|e| anyhow::anyhow!("failed to generate nonce: {}", e))?;
        let nonce = XNonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| anyhow::anyhow!("encrypt error"))?;

        Ok((nonce_bytes, ciphertext))
    }

    /// Decrypt data using XChaCha20-Poly1305 AEAD
    ///
    /// Returns the original plaintext if and only if the ciphertext and nonce
    /// were produced under this key and have not been altered.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Authentication`] on any tag mismatch, whether
    /// the cause is a wrong key or tampered data.
    pub fn decrypt(
        &self,
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, SecretError> {
        let key = Key::from_slice(self.bytes());
        let cipher = XChaCha20Poly1305::new(key);
        cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| SecretError::Authentication)
    }
}
