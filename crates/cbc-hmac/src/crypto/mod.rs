//! Adapters over the RustCrypto block-cipher and MAC primitives.
//!
//! This layer knows nothing about key splitting or tag construction. It exposes
//! the two primitives the composition needs:
//!
//! - [`cipher`]: AES in CBC mode with PKCS#7 padding, key size picked from the
//!   key length (16, 24 or 32 bytes).
//! - [`mac`]: HMAC over SHA-256, SHA-384 or SHA-512.
//!
//! Primitive objects are built per call and dropped before returning.

pub mod cipher;
pub mod mac;

use thiserror::Error;

pub use cipher::{BLOCK_LEN, IV_LEN};

/// Errors produced by the primitive layer.
///
/// Mapped onto [`crate::CryptoError`] by the composition in [`crate::aead`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimitiveError {
    /// The key is not a valid length for the primitive.
    #[error("invalid key length: {0} bytes")]
    InvalidKeyLength(usize),

    /// The IV is not exactly [`IV_LEN`] bytes.
    #[error("invalid IV length: expected {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),

    /// Malformed padding or input not aligned to the block size.
    #[error("unpad failed")]
    Unpad,
}
