use tracing::debug;

use super::{aad_bit_length, compute_tag, map_primitive, AuthenticatedCiphertext};
use crate::algorithm::resolve;
use crate::crypto::cipher;
use crate::key::split;
use crate::CryptoError;

/// Encrypt `plaintext` and authenticate it together with `aad`.
///
/// Steps, in order: resolve `algorithm` and split `combined_key`; AES-CBC
/// encrypt under the encryption key; HMAC `aad || iv || ciphertext || AL`
/// under the MAC key; keep the leading `tag_len` bytes as the tag.
///
/// Deterministic for identical inputs. The caller is responsible for `iv`
/// being unique and unpredictable per key.
///
/// # Errors
///
/// - [`CryptoError::UnsupportedAlgorithm`] for an unknown identifier.
/// - [`CryptoError::InvalidKeyMaterial`] if the key is too short.
/// - [`CryptoError::InvalidIv`] if `iv` is not 16 bytes.
/// - [`CryptoError::InvalidAssociatedData`] if the AAD bit length overflows.
/// - [`CryptoError::EncryptionFailed`] for any other primitive failure.
pub fn encrypt(
    combined_key: &[u8],
    iv: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    algorithm: &str,
) -> Result<AuthenticatedCiphertext, CryptoError> {
    let params = resolve(algorithm)?;
    let keys = split(combined_key, params)?;
    debug!(
        alg = %params.algorithm,
        aad_len = aad.len(),
        plaintext_len = plaintext.len(),
        "encrypting"
    );

    let ciphertext = cipher::encrypt(keys.enc_key(), iv, plaintext)
        .map_err(|e| map_primitive(e, CryptoError::EncryptionFailed))?;

    let aad_bits = aad_bit_length(aad)?;
    let tag = compute_tag(params, keys.mac_key(), aad, iv, &ciphertext, &aad_bits)
        .map_err(|e| map_primitive(e, CryptoError::EncryptionFailed))?;

    Ok(AuthenticatedCiphertext { ciphertext, tag })
}
