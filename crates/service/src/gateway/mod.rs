//! Content-addressed blob store boundary
//!
//! The store is an external collaborator reachable over HTTP. The pipelines
//! only require the [`BlobGateway`] capability: store bytes and get back the
//! content hash the store assigned, or fetch bytes by hash. The store never
//! sees plaintext or key material, only opaque ciphertext envelopes.

mod http;

pub use http::HttpGateway;

use async_trait::async_trait;

/// Errors surfaced by a gateway
///
/// None of these are retried internally; every failure is terminal for the
/// pipeline invocation that hit it.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Failed to write: {status} {detail}")]
    WriteFailed {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error("Failed to read: {status} {detail}")]
    ReadFailed {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error("gateway response did not include a content hash")]
    MissingHash,
}

/// Capability interface the transfer pipelines require from their environment
#[async_trait]
pub trait BlobGateway: Send + Sync {
    /// Store the given bytes and return the content hash the store assigned
    async fn write(&self, bytes: &[u8]) -> Result<String, GatewayError>;

    /// Fetch previously stored bytes by content hash
    async fn read(&self, hash: &str) -> Result<Vec<u8>, GatewayError>;
}
