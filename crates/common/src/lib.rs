/**
 * Shareable address tokens.
 *  Packs a decryption key and a content hash into
 *  a single base-58 token safe for URL path segments.
 */
pub mod address;
/**
 * Cryptographic types and operations.
 *  - One-time symmetric content keys
 *  - XChaCha20-Poly1305 authenticated encryption
 */
pub mod crypto;
/**
 * Binary wire envelopes.
 * Handles translation to/from the versioned Message
 *  envelope written to the store and the Payload
 *  carried inside it.
 */
pub mod wire;

pub mod prelude {
    pub use crate::address::{Address, AddressError};
    pub use crate::crypto::{Secret, SecretError, NONCE_SIZE, SECRET_SIZE};
    pub use crate::wire::{Message, Payload, WireError, MESSAGE_VERSION};
}
