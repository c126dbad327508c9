//! Error types for vsys-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) — Main error type, returned by most operations
//!   - [`ValidationError`] — Malformed or out-of-range field at construction
//!   - [`InvalidKeyError`] — Malformed key at signing time
//!   - [`ChainMismatchError`] — Address belongs to a different chain than expected
//!
//! Every error is raised synchronously at the point of detection. A
//! transaction request is either fully valid or never produced: once a
//! request exists, serializing it cannot fail (signing with raw key bytes
//! being the one exception, which yields [`InvalidKeyError`]).
//!
//! # Example
//!
//! ```rust
//! use vsys_kit::{Address, ValidationError};
//!
//! match "not-a-valid-address!!".parse::<Address>() {
//!     Ok(addr) => println!("parsed {addr}"),
//!     Err(ValidationError::InvalidBase58(_)) => println!("bad encoding"),
//!     Err(e) => println!("rejected: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::types::ChainId;

/// Error validating a field value at construction time.
///
/// No partially-built value ever escapes: constructors return this error
/// instead of producing a malformed `Address`, `Fee`, request, etc.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid address version: expected 5, got {0}")]
    InvalidAddressVersion(u8),

    #[error("Unknown chain id byte: {0:#04x}")]
    UnknownChainId(u8),

    #[error("Address checksum does not match its payload")]
    InvalidChecksum,

    #[error("Field '{field}' is {len} bytes, which exceeds the {max}-byte limit")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Fee {fee} is below the minimum of {minimum} for this transaction kind")]
    FeeTooLow { fee: u64, minimum: u64 },

    #[error("Invalid amount '{0}': finer than the smallest unit (1e-8 VSYS)")]
    AmountGranularity(String),

    #[error("Invalid number in amount: '{0}'")]
    InvalidNumber(String),

    #[error("Amount overflow: value too large")]
    Overflow,

    #[error("Invalid timestamp {0}: must be 0 or at least one second in nanoseconds")]
    InvalidTimestamp(u64),

    #[error("Public key does not match the private key")]
    KeyPairMismatch,
}

/// A signing key had the wrong length.
///
/// This is the only failure mode of the signing engine: signing is a pure
/// local computation, so there is nothing to retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid key length: expected {expected} bytes, got {actual}")]
pub struct InvalidKeyError {
    pub expected: usize,
    pub actual: usize,
}

/// An address was used with a chain it does not belong to.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Address is on chain '{}' but chain '{}' was expected", *actual as char, *expected as char)]
pub struct ChainMismatchError {
    /// Chain id byte the caller expected.
    pub expected: u8,
    /// Chain id byte carried by the address.
    pub actual: u8,
}

impl ChainMismatchError {
    pub(crate) fn new(expected: ChainId, actual: u8) -> Self {
        Self {
            expected: expected.as_byte(),
            actual,
        }
    }
}

/// Main error type for vsys-kit operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),

    #[error(transparent)]
    ChainMismatch(#[from] ChainMismatchError),
}
