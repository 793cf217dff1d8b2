//! AES-CBC + HMAC-SHA2 authenticated encryption, as defined for the
//! `A128CBC-HS256`, `A192CBC-HS384` and `A256CBC-HS512` content-encryption
//! algorithms (RFC 7518 §5.2).
//!
//! The composition is Encrypt-then-MAC: the plaintext is encrypted with
//! AES-CBC/PKCS#7 under the second half of the combined key, then
//! `HMAC(aad || iv || ciphertext || be64(aad_bits))` under the first half is
//! truncated to form the tag.
//!
//! ```text
//! combined key:  [ mac key | enc key ]
//! tag:           HMAC(mac key, aad || iv || ciphertext || AL)[..tag_len]
//! ```
//!
//! Key management, IV generation and envelope formats are left to the caller.
//! [`decrypt`] returns the recomputed tag without checking it; [`open`]
//! performs the constant-time check before decrypting.

pub mod aead;
pub mod algorithm;
pub mod crypto;
pub mod key;

pub use aead::{decrypt, encrypt, open, tags_match, AuthenticatedCiphertext, Decrypted};
pub use algorithm::{resolve, Algorithm, AlgorithmParameters, MacDigest};
pub use common::{CryptoError, ErrorKind};
pub use crypto::{BLOCK_LEN, IV_LEN};
pub use key::{split, SplitKey};
