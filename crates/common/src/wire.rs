//! Versioned binary envelopes for encrypted transfer
//!
//! Two structures cross the wire: the `Message` envelope actually written to
//! the content-addressed store, and the `Payload` serialized before
//! encryption. Both are compact length-prefixed binary (bincode); decoding
//! detects truncation and field-type mismatch and fails with
//! [`WireError::Malformed`] instead of reading garbage.

use serde::{Deserialize, Serialize};

use crate::crypto::NONCE_SIZE;

/// The only envelope version this build can produce or open.
///
/// Decoders must treat any other value as "format too new" rather than
/// attempting a lossy decode; that check lives in the download pipeline so
/// that a structurally valid future envelope still parses here.
pub const MESSAGE_VERSION: u32 = 1;

/// Errors that can occur while encoding or decoding wire structures
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("malformed wire data: {0}")]
    Malformed(#[from] bincode::Error),
}

/// The unit written to the content-addressed store
///
/// Wraps the ciphertext with the nonce it was produced under and the envelope
/// format version. Nothing in here is secret; confidentiality lives entirely
/// in the ciphertext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
    pub version: u32,
}

impl Message {
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// The plaintext logical unit the sender wants transferred
///
/// The filename travels inside the encrypted payload, so the store never
/// learns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Payload {
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
