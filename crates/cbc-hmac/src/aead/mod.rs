//! Encrypt-then-MAC composition.
//!
//! # Tag construction
//!
//! ```text
//! AL      = be64(len(aad) * 8)
//! tag     = HMAC(mac_key, aad || iv || ciphertext || AL)[..tag_len]
//! ```
//!
//! Every operation resolves the algorithm, splits the combined key, and builds
//! fresh cipher and MAC instances. Nothing is retained between calls.

mod decrypt;
mod encrypt;

#[cfg(test)]
mod vectors;

use std::fmt;

use subtle::ConstantTimeEq;

pub use decrypt::{decrypt, open};
pub use encrypt::encrypt;

use crate::algorithm::AlgorithmParameters;
use crate::crypto::{mac, PrimitiveError, IV_LEN};
use crate::CryptoError;

/// Output of [`encrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCiphertext {
    /// AES-CBC ciphertext, a non-zero multiple of 16 bytes.
    pub ciphertext: Vec<u8>,
    /// Truncated HMAC, `tag_len` bytes for the algorithm used.
    pub tag: Vec<u8>,
}

/// Output of [`decrypt`].
///
/// `tag` is recomputed from the ciphertext that was supplied. The plaintext
/// must not be trusted until the caller has checked `tag` against the tag it
/// received, with [`tags_match`] or another constant-time comparison.
#[derive(Clone, PartialEq, Eq)]
pub struct Decrypted {
    pub plaintext: Vec<u8>,
    pub tag: Vec<u8>,
}

impl fmt::Debug for Decrypted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decrypted")
            .field("plaintext_len", &self.plaintext.len())
            .field("tag_len", &self.tag.len())
            .finish()
    }
}

/// Constant-time tag comparison. Tags of different lengths never match.
pub fn tags_match(expected: &[u8], actual: &[u8]) -> bool {
    expected.ct_eq(actual).into()
}

/// Big-endian 64-bit length of `aad` in bits.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidAssociatedData`] if the bit length does not
/// fit in 64 bits.
pub(crate) fn aad_bit_length(aad: &[u8]) -> Result<[u8; 8], CryptoError> {
    u64::try_from(aad.len())
        .ok()
        .and_then(|len| len.checked_mul(8))
        .map(u64::to_be_bytes)
        .ok_or(CryptoError::InvalidAssociatedData(
            "length in bits exceeds 64 bits",
        ))
}

/// HMAC over `aad || iv || ciphertext || aad_bits`, truncated to the tag length.
pub(crate) fn compute_tag(
    params: &AlgorithmParameters,
    mac_key: &[u8],
    aad: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad_bits: &[u8; 8],
) -> Result<Vec<u8>, PrimitiveError> {
    let parts = [aad, iv, ciphertext, aad_bits.as_slice()];
    let mut digest = mac::compute(params.digest, mac_key, &parts)?;
    digest.truncate(params.tag_len);
    Ok(digest)
}

/// Map a primitive failure onto the public taxonomy. IV errors keep their own
/// kind, everything else collapses into `failure`.
pub(crate) fn map_primitive(err: PrimitiveError, failure: CryptoError) -> CryptoError {
    match err {
        PrimitiveError::InvalidIvLength(got) => CryptoError::InvalidIv {
            expected: IV_LEN,
            got,
        },
        PrimitiveError::InvalidKeyLength(_) | PrimitiveError::Unpad => failure,
    }
}
