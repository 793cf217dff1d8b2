//! Common error types shared across crates.

use thiserror::Error;

/// Coarse classification of a [`CryptoError`].
///
/// Stable across releases; callers that only need to branch on the failure
/// category should match on this rather than on the error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidKeyMaterial,
    UnsupportedAlgorithm,
    InvalidAssociatedData,
    InvalidIv,
    EncryptionFailed,
    DecryptionFailed,
}

impl ErrorKind {
    /// Short machine-readable code (e.g. `"invalid_iv"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidKeyMaterial => "invalid_key_material",
            ErrorKind::UnsupportedAlgorithm => "unsupported_algorithm",
            ErrorKind::InvalidAssociatedData => "invalid_associated_data",
            ErrorKind::InvalidIv => "invalid_iv",
            ErrorKind::EncryptionFailed => "encryption_failed",
            ErrorKind::DecryptionFailed => "decryption_failed",
        }
    }
}

/// Errors produced by the authenticated-encryption core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The combined key is shorter than the algorithm requires.
    #[error("invalid key material: {required_bits} bits required, got {actual_bits}")]
    InvalidKeyMaterial {
        required_bits: usize,
        actual_bits: usize,
    },

    /// The algorithm identifier is not one of the supported CBC-HMAC suites.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The associated data cannot be bound into the tag.
    #[error("invalid associated data: {0}")]
    InvalidAssociatedData(&'static str),

    /// The IV is not exactly one cipher block long.
    #[error("invalid IV length: expected {expected} bytes, got {got}")]
    InvalidIv { expected: usize, got: usize },

    /// The block cipher rejected the input during encryption.
    #[error("encryption failed")]
    EncryptionFailed,

    /// Decryption failed. Padding errors and tag mismatches are not told apart.
    #[error("decryption failed")]
    DecryptionFailed,
}

impl CryptoError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::InvalidKeyMaterial { .. } => ErrorKind::InvalidKeyMaterial,
            CryptoError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            CryptoError::InvalidAssociatedData(_) => ErrorKind::InvalidAssociatedData,
            CryptoError::InvalidIv { .. } => ErrorKind::InvalidIv,
            CryptoError::EncryptionFailed => ErrorKind::EncryptionFailed,
            CryptoError::DecryptionFailed => ErrorKind::DecryptionFailed,
        }
    }

    /// Short machine-readable code, see [`ErrorKind::as_str`].
    pub fn code(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Top-level error type for the command-line front end.
///
/// Variants map to process exit codes:
/// - [`ServiceError::BadRequest`] → 2
/// - [`ServiceError::Crypto`] → 3
/// - [`ServiceError::Internal`] → 1
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be read: malformed JSON or base64, or oversized input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The cryptographic operation itself failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceError::BadRequest(_) => 2,
            ServiceError::Crypto(_) => 3,
            ServiceError::Internal(_) => 1,
        }
    }

    /// Short machine-readable error code for the JSON error response.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Crypto(e) => e.code(),
            ServiceError::Internal(_) => "internal_error",
        }
    }
}
