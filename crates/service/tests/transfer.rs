//! Integration tests for the upload and download pipelines
//!
//! All tests run against an in-memory gateway stub; no network anywhere.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use common::address::Address;
use common::crypto::Secret;
use common::wire::{Message, Payload, MESSAGE_VERSION};
use service::gateway::{BlobGateway, GatewayError};
use service::transfer::{self, TransferError};

/// In-memory content-addressed store that hands out sequential hashes and
/// counts calls, so tests can assert the gateway was never touched.
struct StubGateway {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
    reads: AtomicUsize,
}

impl StubGateway {
    fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    /// Place bytes in the store directly, bypassing the write path
    fn insert(&self, hash: &str, bytes: Vec<u8>) {
        self.blobs.lock().unwrap().insert(hash.to_string(), bytes);
    }

    fn stored(&self, hash: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(hash).cloned()
    }

    fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobGateway for StubGateway {
    async fn write(&self, bytes: &[u8]) -> Result<String, GatewayError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut blobs = self.blobs.lock().unwrap();
        let hash = format!("HASH{}", blobs.len() + 1);
        blobs.insert(hash.clone(), bytes.to_vec());
        Ok(hash)
    }

    async fn read(&self, hash: &str) -> Result<Vec<u8>, GatewayError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.blobs.lock().unwrap().get(hash).cloned().ok_or_else(|| {
            GatewayError::ReadFailed {
                status: reqwest::StatusCode::NOT_FOUND,
                detail: "no such blob".to_string(),
            }
        })
    }
}

fn payload(filename: &str, data: &[u8]) -> Payload {
    Payload {
        filename: filename.to_string(),
        data: data.to_vec(),
    }
}

const NO_LIMIT: usize = usize::MAX;

#[tokio::test]
async fn test_upload_then_download() {
    let gateway = StubGateway::new();

    let result = transfer::upload(&gateway, NO_LIMIT, payload("a.txt", b"hello"))
        .await
        .unwrap();
    assert_eq!(result.hash, "HASH1");
    assert_eq!(result.filename, "a.txt");

    let fetched = transfer::download(&gateway, &result.address).await.unwrap();
    assert_eq!(fetched.filename, "a.txt");
    assert_eq!(fetched.data, b"hello");
}

#[tokio::test]
async fn test_store_only_sees_ciphertext() {
    let gateway = StubGateway::new();
    let secret_body = b"extremely confidential bytes";

    let result = transfer::upload(&gateway, NO_LIMIT, payload("secret.txt", secret_body))
        .await
        .unwrap();

    let stored = gateway.stored(&result.hash).unwrap();
    assert!(!stored
        .windows(secret_body.len())
        .any(|window| window == secret_body));
    assert!(!stored.windows(10).any(|window| window == b"secret.txt"));
}

#[tokio::test]
async fn test_size_limit_boundary() {
    let gateway = StubGateway::new();
    let item = payload("exact.bin", &[0xAB; 1024]);
    let encoded_len = item.encode().unwrap().len();

    // Exactly at the limit succeeds
    let result = transfer::upload(&gateway, encoded_len, item.clone()).await;
    assert!(result.is_ok());

    // One byte over fails before any gateway call
    let gateway = StubGateway::new();
    let result = transfer::upload(&gateway, encoded_len - 1, item).await;
    match result {
        Err(TransferError::FileTooLarge { size, limit }) => {
            assert_eq!(size, encoded_len);
            assert_eq!(limit, encoded_len - 1);
        }
        other => panic!("expected FileTooLarge, got {:?}", other),
    }
    assert_eq!(gateway.write_count(), 0);
}

#[tokio::test]
async fn test_malformed_address_skips_gateway() {
    let gateway = StubGateway::new();

    let result = transfer::download(&gateway, "not-a-valid-token").await;
    assert!(matches!(result, Err(TransferError::InvalidAddress(_))));
    assert_eq!(gateway.read_count(), 0);
}

#[tokio::test]
async fn test_version_gate() {
    let gateway = StubGateway::new();
    let key = Secret::generate();

    let encoded = payload("future.txt", b"from a newer client").encode().unwrap();
    let (nonce, ciphertext) = key.encrypt(&encoded).unwrap();
    let message = Message {
        nonce,
        ciphertext,
        version: 2,
    };
    gateway.insert("HASH1", message.encode().unwrap());

    let token = Address::new(key, "HASH1").to_token();
    let result = transfer::download(&gateway, &token).await;
    assert!(matches!(result, Err(TransferError::UnsupportedVersion(2))));
}

#[tokio::test]
async fn test_corrupted_store_content_is_malformed() {
    let gateway = StubGateway::new();
    gateway.insert("HASH1", b"garbage".to_vec());

    let token = Address::new(Secret::generate(), "HASH1").to_token();
    let result = transfer::download(&gateway, &token).await;
    assert!(matches!(result, Err(TransferError::Malformed(_))));
}

#[tokio::test]
async fn test_wrong_key_fails_authentication() {
    let gateway = StubGateway::new();
    let result = transfer::upload(&gateway, NO_LIMIT, payload("a.txt", b"hello"))
        .await
        .unwrap();

    // Same hash, different key
    let forged = Address::new(Secret::generate(), result.hash.as_str()).to_token();
    let outcome = transfer::download(&gateway, &forged).await;
    assert!(matches!(outcome, Err(TransferError::Authentication)));
}

#[tokio::test]
async fn test_tampered_ciphertext_fails_authentication() {
    let gateway = StubGateway::new();
    let result = transfer::upload(&gateway, NO_LIMIT, payload("a.txt", b"hello"))
        .await
        .unwrap();

    let mut message = Message::decode(&gateway.stored(&result.hash).unwrap()).unwrap();
    message.ciphertext[0] ^= 0x01;
    gateway.insert(&result.hash, message.encode().unwrap());

    let outcome = transfer::download(&gateway, &result.address).await;
    assert!(matches!(outcome, Err(TransferError::Authentication)));
}

#[tokio::test]
async fn test_missing_blob_surfaces_read_failed() {
    let gateway = StubGateway::new();
    let token = Address::new(Secret::generate(), "NOPE").to_token();

    let result = transfer::download(&gateway, &token).await;
    assert!(matches!(
        result,
        Err(TransferError::Gateway(GatewayError::ReadFailed { .. }))
    ));
}

#[tokio::test]
async fn test_fresh_key_per_upload() {
    let gateway = StubGateway::new();

    let first = transfer::upload(&gateway, NO_LIMIT, payload("a.txt", b"same bytes"))
        .await
        .unwrap();
    let second = transfer::upload(&gateway, NO_LIMIT, payload("a.txt", b"same bytes"))
        .await
        .unwrap();

    let key_a = Address::parse(&first.address).unwrap().key().clone();
    let key_b = Address::parse(&second.address).unwrap().key().clone();
    assert_ne!(key_a, key_b);
}
