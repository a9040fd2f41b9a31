//! Upload and download pipelines
//!
//! Each pipeline is one strictly sequential chain: every step consumes the
//! previous step's output, so failures propagate with `?` and abort the whole
//! call. Nothing is retried. A blob written before a later failure is simply
//! orphaned in the store, which is harmless because content-addressed stores
//! are idempotent on identical bytes.

use common::address::{Address, AddressError};
use common::crypto::{Secret, SecretError};
use common::wire::{Message, Payload, WireError, MESSAGE_VERSION};

use crate::gateway::{BlobGateway, GatewayError};

/// Returned to the caller after a successful upload
///
/// The address token is the only thing the recipient needs; the hash is
/// exposed separately for display and bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult {
    pub address: String,
    pub hash: String,
    pub filename: String,
}

/// Everything that can go wrong in a transfer, one variant per kind
///
/// Every variant is terminal for the invocation that produced it. Callers
/// branch on the variant; the display string is for humans.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Serialized payload exceeds the active limit. Raised before any crypto
    /// or network work.
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("malformed envelope: {0}")]
    Malformed(#[from] WireError),
    /// The envelope decoded structurally but was produced by a newer client.
    /// Distinct from [`TransferError::Malformed`] so callers can say
    /// "please upgrade" instead of "data corrupted".
    #[error("Encryption format is too new: version {0}")]
    UnsupportedVersion(u32),
    /// Wrong key and tampered ciphertext are deliberately indistinguishable.
    #[error("decryption failed: wrong key or corrupted data")]
    Authentication,
    #[error("encryption failed: {0}")]
    Crypto(SecretError),
}

/// Encrypt a payload and write it to the store
///
/// Serialize → size check → fresh key → encrypt → version-1 envelope →
/// gateway write → address token. The key is generated here, used for
/// exactly one encryption, and leaves only inside the returned address.
pub async fn upload<G: BlobGateway>(
    gateway: &G,
    max_payload_size: usize,
    payload: Payload,
) -> Result<UploadResult, TransferError> {
    let filename = payload.filename.clone();
    let encoded = payload.encode()?;
    if encoded.len() > max_payload_size {
        return Err(TransferError::FileTooLarge {
            size: encoded.len(),
            limit: max_payload_size,
        });
    }

    let key = Secret::generate();
    let (nonce, ciphertext) = key.encrypt(&encoded).map_err(TransferError::Crypto)?;
    let message = Message {
        nonce,
        ciphertext,
        version: MESSAGE_VERSION,
    };

    let hash = gateway.write(&message.encode()?).await?;
    let address = Address::new(key, hash.as_str()).to_token();
    tracing::info!(%hash, size = encoded.len(), "uploaded encrypted payload");

    Ok(UploadResult {
        address,
        hash,
        filename,
    })
}

/// Fetch a payload by address token and decrypt it
///
/// Parse address → gateway read → decode envelope → version gate → decrypt →
/// decode payload. A malformed token fails before any gateway call.
pub async fn download<G: BlobGateway>(
    gateway: &G,
    token: &str,
) -> Result<Payload, TransferError> {
    let address = Address::parse(token)?;
    let bytes = gateway.read(address.hash()).await?;

    let message = Message::decode(&bytes)?;
    if message.version != MESSAGE_VERSION {
        return Err(TransferError::UnsupportedVersion(message.version));
    }

    let plaintext = address
        .key()
        .decrypt(&message.nonce, &message.ciphertext)
        .map_err(|_| TransferError::Authentication)?;
    let payload = Payload::decode(&plaintext)?;
    tracing::info!(hash = %address.hash(), size = payload.data.len(), "downloaded encrypted payload");

    Ok(payload)
}
