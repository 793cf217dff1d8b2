//! Splitting a combined key into its MAC and encryption halves.

use std::fmt;

use zeroize::Zeroizing;

use crate::algorithm::AlgorithmParameters;
use crate::CryptoError;

/// MAC key and encryption key taken from a combined key.
///
/// Both halves are owned copies that are overwritten with zeroes on drop.
/// The caller's combined key is left untouched.
pub struct SplitKey {
    mac_key: Zeroizing<Vec<u8>>,
    enc_key: Zeroizing<Vec<u8>>,
}

impl SplitKey {
    /// The leading `mac_key_bytes` of the combined key.
    pub fn mac_key(&self) -> &[u8] {
        &self.mac_key
    }

    /// The `enc_key_bytes` that follow the MAC key.
    pub fn enc_key(&self) -> &[u8] {
        &self.enc_key
    }
}

impl fmt::Debug for SplitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.write_str("SplitKey([REDACTED])")
    }
}

/// Split `combined_key` according to `params`.
///
/// The MAC key occupies the leading bytes and the encryption key the bytes
/// after it. Bytes beyond `total_key_bits` are ignored.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyMaterial`] if `combined_key` is shorter
/// than `params.total_key_bits`.
pub fn split(combined_key: &[u8], params: &AlgorithmParameters) -> Result<SplitKey, CryptoError> {
    let required = params.mac_key_bytes + params.enc_key_bytes;
    if combined_key.len() < required {
        return Err(CryptoError::InvalidKeyMaterial {
            required_bits: params.total_key_bits,
            actual_bits: combined_key.len().saturating_mul(8),
        });
    }

    let (mac_key, rest) = combined_key.split_at(params.mac_key_bytes);
    Ok(SplitKey {
        mac_key: Zeroizing::new(mac_key.to_vec()),
        enc_key: Zeroizing::new(rest[..params.enc_key_bytes].to_vec()),
    })
}
