//! Cryptographic primitives for sealdrop
//!
//! # Security Model
//!
//! ## Content Encryption
//! Every upload gets its own one-time XChaCha20-Poly1305 `Secret` key:
//! - One key per upload, one encryption per key
//! - Nonce uniqueness follows from random generation plus never reusing keys
//! - The key travels only inside the shared address token, never to the store
//!
//! ## What this module does not do
//! There is no sender authentication, no key rotation, and no metadata
//! protection. Whoever holds the address token can decrypt the content.

mod secret;

pub use secret::{Secret, SecretError, NONCE_SIZE, SECRET_SIZE};
