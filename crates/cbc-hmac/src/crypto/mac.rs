//! HMAC-SHA2 over a message given as a sequence of parts.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use super::PrimitiveError;
use crate::algorithm::MacDigest;

/// Compute `HMAC(key, parts[0] || parts[1] || ...)` with the given digest.
///
/// Parts are fed to the MAC in order without any delimiter, so the result is
/// the same as for the concatenated message. The full, untruncated digest is
/// returned.
pub fn compute(digest: MacDigest, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, PrimitiveError> {
    match digest {
        MacDigest::Sha256 => compute_with::<Hmac<Sha256>>(key, parts),
        MacDigest::Sha384 => compute_with::<Hmac<Sha384>>(key, parts),
        MacDigest::Sha512 => compute_with::<Hmac<Sha512>>(key, parts),
    }
}

fn compute_with<M>(key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, PrimitiveError>
where
    M: Mac + hmac::digest::KeyInit,
{
    let mut mac =
        <M as Mac>::new_from_slice(key).map_err(|_| PrimitiveError::InvalidKeyLength(key.len()))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2.
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn rfc4231_case2_sha256() {
        let out = compute(MacDigest::Sha256, KEY, &[DATA]).unwrap();
        assert_eq!(
            hex::encode(out),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn digest_lengths() {
        assert_eq!(compute(MacDigest::Sha256, KEY, &[DATA]).unwrap().len(), 32);
        assert_eq!(compute(MacDigest::Sha384, KEY, &[DATA]).unwrap().len(), 48);
        assert_eq!(compute(MacDigest::Sha512, KEY, &[DATA]).unwrap().len(), 64);
    }

    #[test]
    fn parts_equal_concatenation() {
        let whole = compute(MacDigest::Sha384, KEY, &[DATA]).unwrap();
        let split = compute(MacDigest::Sha384, KEY, &[&DATA[..4], &DATA[4..9], &DATA[9..]]).unwrap();
        assert_eq!(whole, split);
    }

    #[test]
    fn different_keys_differ() {
        let a = compute(MacDigest::Sha512, b"key-a", &[DATA]).unwrap();
        let b = compute(MacDigest::Sha512, b"key-b", &[DATA]).unwrap();
        assert_ne!(a, b);
    }
}
