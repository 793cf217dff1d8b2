//! Registry of the supported CBC-HMAC content-encryption algorithms.

use std::fmt;
use std::str::FromStr;

use crate::CryptoError;

/// Hash function underlying the HMAC of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacDigest {
    Sha256,
    Sha384,
    Sha512,
}

/// Fixed parameters of one CBC-HMAC algorithm.
///
/// The tag is always as long as the MAC key, and the MAC key is always as long
/// as the encryption key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgorithmParameters {
    pub algorithm: Algorithm,
    /// Minimum length of the combined key, in bits.
    pub total_key_bits: usize,
    pub mac_key_bytes: usize,
    pub enc_key_bytes: usize,
    pub digest: MacDigest,
    pub tag_len: usize,
}

static A128CBC_HS256: AlgorithmParameters = AlgorithmParameters {
    algorithm: Algorithm::A128CbcHs256,
    total_key_bits: 256,
    mac_key_bytes: 16,
    enc_key_bytes: 16,
    digest: MacDigest::Sha256,
    tag_len: 16,
};

static A192CBC_HS384: AlgorithmParameters = AlgorithmParameters {
    algorithm: Algorithm::A192CbcHs384,
    total_key_bits: 384,
    mac_key_bytes: 24,
    enc_key_bytes: 24,
    digest: MacDigest::Sha384,
    tag_len: 24,
};

static A256CBC_HS512: AlgorithmParameters = AlgorithmParameters {
    algorithm: Algorithm::A256CbcHs512,
    total_key_bits: 512,
    mac_key_bytes: 32,
    enc_key_bytes: 32,
    digest: MacDigest::Sha512,
    tag_len: 32,
};

/// A supported content-encryption algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    A128CbcHs256,
    A192CbcHs384,
    A256CbcHs512,
}

impl Algorithm {
    /// Every supported algorithm, weakest first.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::A128CbcHs256,
        Algorithm::A192CbcHs384,
        Algorithm::A256CbcHs512,
    ];

    /// Canonical identifier, e.g. `"A128CBC-HS256"`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::A128CbcHs256 => "A128CBC-HS256",
            Algorithm::A192CbcHs384 => "A192CBC-HS384",
            Algorithm::A256CbcHs512 => "A256CBC-HS512",
        }
    }

    pub fn parameters(self) -> &'static AlgorithmParameters {
        match self {
            Algorithm::A128CbcHs256 => &A128CBC_HS256,
            Algorithm::A192CbcHs384 => &A192CBC_HS384,
            Algorithm::A256CbcHs512 => &A256CBC_HS512,
        }
    }

    /// Look up an algorithm by identifier, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] for any other identifier.
    pub fn resolve(name: &str) -> Result<Self, CryptoError> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(name.to_owned()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

/// Resolve an algorithm identifier straight to its parameters.
pub fn resolve(name: &str) -> Result<&'static AlgorithmParameters, CryptoError> {
    Algorithm::resolve(name).map(Algorithm::parameters)
}
