//! Cryptographic primitives: the Curve25519 signing engine and the digest
//! functions used for addresses and ids.

pub mod curve25519;
pub mod hashes;
