//! Common types, protocol definitions, and errors shared across `cbc-hmac` crates.

pub mod error;
pub mod protocol;

pub use error::{CryptoError, ErrorKind, ServiceError};
