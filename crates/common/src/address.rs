//! Shareable address tokens
//!
//! An `Address` is the recipient-facing capability: the decryption key plus
//! the content hash of the ciphertext envelope. It serializes to compact
//! binary and is shared as a base-58 token, which is safe in a URL path
//! segment without escaping.
//!
//! Anyone holding the token can fetch and decrypt the file; the token is the
//! secret.

use serde::{Deserialize, Serialize};

use crate::crypto::Secret;

/// Errors that can occur while parsing an address token
///
/// Both variants are the same kind at the pipeline boundary: the token is not
/// a valid address. The split only preserves detail for display.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("invalid address encoding: {0}")]
    Encoding(#[from] bs58::decode::Error),
    #[error("invalid address structure: {0}")]
    Structure(#[from] bincode::Error),
}

/// The `{key, hash}` pair a recipient needs to fetch and decrypt one upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    key: Secret,
    hash: String,
}

impl Address {
    pub fn new(key: Secret, hash: impl Into<String>) -> Self {
        Self {
            key,
            hash: hash.into(),
        }
    }

    pub fn key(&self) -> &Secret {
        &self.key
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Encode this address as a base-58 token
    pub fn to_token(&self) -> String {
        let bytes = bincode::serialize(self).expect("address serialization is infallible");
        bs58::encode(bytes).into_string()
    }

    /// Parse a base-58 token back into an address
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not valid base-58 or the decoded
    /// bytes are not a well-formed address structure.
    pub fn parse(token: &str) -> Result<Self, AddressError> {
        let bytes = bs58::decode(token).into_vec()?;
        Ok(bincode::deserialize(&bytes)?)
    }

    /// Extract only the content hash from a token
    ///
    /// Useful when the lookup hash is needed before any key material is,
    /// e.g. to report which blob is being fetched.
    pub fn extract_hash(token: &str) -> Result<String, AddressError> {
        Ok(Self::parse(token)?.hash)
    }
}
