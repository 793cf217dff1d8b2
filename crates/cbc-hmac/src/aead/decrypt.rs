use tracing::debug;

use super::{aad_bit_length, compute_tag, map_primitive, tags_match, Decrypted};
use crate::algorithm::resolve;
use crate::crypto::cipher;
use crate::key::split;
use crate::CryptoError;

/// Decrypt `ciphertext` and recompute its tag.
///
/// Decryption happens first; if the cipher rejects the input (bad padding,
/// misaligned or empty ciphertext) this returns
/// [`CryptoError::DecryptionFailed`] before any tag is computed. Otherwise the
/// tag is recomputed over the supplied `aad`, `iv` and `ciphertext`.
///
/// **The returned tag is not checked.** The caller must compare it with the
/// received tag using [`tags_match`] before using the plaintext. Prefer
/// [`open`] where that ordering is not required.
///
/// # Errors
///
/// Same taxonomy as [`super::encrypt`], with [`CryptoError::DecryptionFailed`]
/// in place of `EncryptionFailed`.
pub fn decrypt(
    combined_key: &[u8],
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    algorithm: &str,
) -> Result<Decrypted, CryptoError> {
    let params = resolve(algorithm)?;
    let keys = split(combined_key, params)?;
    debug!(
        alg = %params.algorithm,
        aad_len = aad.len(),
        ciphertext_len = ciphertext.len(),
        "decrypting"
    );

    let plaintext = cipher::decrypt(keys.enc_key(), iv, ciphertext).map_err(|e| {
        debug!(alg = %params.algorithm, "decryption failed");
        map_primitive(e, CryptoError::DecryptionFailed)
    })?;

    let aad_bits = aad_bit_length(aad)?;
    let tag = compute_tag(params, keys.mac_key(), aad, iv, ciphertext, &aad_bits)
        .map_err(|e| map_primitive(e, CryptoError::DecryptionFailed))?;

    Ok(Decrypted { plaintext, tag })
}

/// Verify `tag` and, only if it matches, decrypt `ciphertext`.
///
/// The tag is recomputed over the received ciphertext and compared in
/// constant time before the cipher is touched. A tag mismatch and a padding
/// failure both yield the same [`CryptoError::DecryptionFailed`].
///
/// # Errors
///
/// Resolution, key and IV errors as for [`decrypt`]; otherwise
/// [`CryptoError::DecryptionFailed`].
pub fn open(
    combined_key: &[u8],
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    algorithm: &str,
) -> Result<Vec<u8>, CryptoError> {
    let params = resolve(algorithm)?;
    let keys = split(combined_key, params)?;
    debug!(
        alg = %params.algorithm,
        aad_len = aad.len(),
        ciphertext_len = ciphertext.len(),
        "opening"
    );

    let aad_bits = aad_bit_length(aad)?;
    let expected = compute_tag(params, keys.mac_key(), aad, iv, ciphertext, &aad_bits)
        .map_err(|e| map_primitive(e, CryptoError::DecryptionFailed))?;

    if !tags_match(&expected, tag) {
        debug!(alg = %params.algorithm, "decryption failed");
        return Err(CryptoError::DecryptionFailed);
    }

    cipher::decrypt(keys.enc_key(), iv, ciphertext).map_err(|e| {
        debug!(alg = %params.algorithm, "decryption failed");
        map_primitive(e, CryptoError::DecryptionFailed)
    })
}
