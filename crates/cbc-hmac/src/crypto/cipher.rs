//! AES-CBC with PKCS#7 padding.

use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use super::PrimitiveError;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// CBC initialisation vector length (one block).
pub const IV_LEN: usize = BLOCK_LEN;

/// Encrypt `plaintext` under `key` and `iv`, appending PKCS#7 padding.
///
/// The AES variant follows the key length: 16 → AES-128, 24 → AES-192,
/// 32 → AES-256. The output is always a non-zero multiple of [`BLOCK_LEN`].
///
/// # Errors
///
/// Returns [`PrimitiveError::InvalidIvLength`] if `iv` is not [`IV_LEN`] bytes
/// and [`PrimitiveError::InvalidKeyLength`] for an unsupported key length.
pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
    check_iv(iv)?;
    match key.len() {
        16 => encrypt_with::<cbc::Encryptor<aes::Aes128>>(key, iv, plaintext),
        24 => encrypt_with::<cbc::Encryptor<aes::Aes192>>(key, iv, plaintext),
        32 => encrypt_with::<cbc::Encryptor<aes::Aes256>>(key, iv, plaintext),
        n => Err(PrimitiveError::InvalidKeyLength(n)),
    }
}

/// Decrypt `ciphertext` under `key` and `iv` and strip PKCS#7 padding.
///
/// # Errors
///
/// Returns [`PrimitiveError::Unpad`] when the ciphertext is empty, not a
/// multiple of [`BLOCK_LEN`], or its padding is malformed. Key and IV errors
/// as for [`encrypt`].
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
    check_iv(iv)?;
    match key.len() {
        16 => decrypt_with::<cbc::Decryptor<aes::Aes128>>(key, iv, ciphertext),
        24 => decrypt_with::<cbc::Decryptor<aes::Aes192>>(key, iv, ciphertext),
        32 => decrypt_with::<cbc::Decryptor<aes::Aes256>>(key, iv, ciphertext),
        n => Err(PrimitiveError::InvalidKeyLength(n)),
    }
}

fn check_iv(iv: &[u8]) -> Result<(), PrimitiveError> {
    if iv.len() != IV_LEN {
        return Err(PrimitiveError::InvalidIvLength(iv.len()));
    }
    Ok(())
}

fn encrypt_with<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, PrimitiveError>
where
    C: KeyIvInit + BlockEncryptMut,
{
    let cipher =
        C::new_from_slices(key, iv).map_err(|_| PrimitiveError::InvalidKeyLength(key.len()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_with<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, PrimitiveError>
where
    C: KeyIvInit + BlockDecryptMut,
{
    let cipher =
        C::new_from_slices(key, iv).map_err(|_| PrimitiveError::InvalidKeyLength(key.len()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| PrimitiveError::Unpad)
}
