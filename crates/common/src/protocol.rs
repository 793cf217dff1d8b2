//! Request and response types exchanged with the `cbc-hmac` command.
//!
//! These types are serialised as JSON. Every byte-valued field carries
//! base64url without padding.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A single request, discriminated by its `op` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Encrypt(EncryptRequest),
    Decrypt(DecryptRequest),
    Open(OpenRequest),
    Algorithms,
}

/// Body of an `encrypt` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Algorithm identifier; the configured default is used when absent.
    #[serde(default)]
    pub alg: Option<String>,
    /// Combined MAC + encryption key.
    pub key: String,
    /// 16-byte initialisation vector.
    pub iv: String,
    /// Associated data; empty when absent.
    #[serde(default)]
    pub aad: String,
    pub plaintext: String,
}

/// Body of a `decrypt` request. The response carries the recomputed tag and
/// leaves verification to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    #[serde(default)]
    pub alg: Option<String>,
    pub key: String,
    pub iv: String,
    #[serde(default)]
    pub aad: String,
    pub ciphertext: String,
}

/// Body of an `open` request: the tag is verified before anything is decrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRequest {
    #[serde(default)]
    pub alg: Option<String>,
    pub key: String,
    pub iv: String,
    #[serde(default)]
    pub aad: String,
    pub ciphertext: String,
    pub tag: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful response to any request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Encrypt(EncryptResponse),
    Decrypt(DecryptResponse),
    Open(OpenResponse),
    Algorithms(AlgorithmsResponse),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Canonical identifier of the algorithm that was applied.
    pub alg: String,
    pub ciphertext: String,
    pub tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub alg: String,
    pub plaintext: String,
    /// Tag recomputed over the supplied ciphertext. Not compared against anything.
    pub tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenResponse {
    pub alg: String,
    pub plaintext: String,
}

/// Response body for `algorithms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmsResponse {
    pub algorithms: Vec<AlgorithmInfo>,
}

/// Summary of one supported algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub key_bits: usize,
    pub tag_bytes: usize,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error body written instead of a [`Response`] on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"decryption_failed"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
