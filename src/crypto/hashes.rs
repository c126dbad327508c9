//! Digest functions used for addresses, ids, and signing.
//!
//! VSYS chains two digests for address and id material: a 32-byte BLAKE2b
//! followed by Keccak-256 (the pre-standard variant, not SHA3-256). The
//! combined form is exposed as [`keccak256_blake2b256`] since the two are
//! never used separately for that purpose.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

/// 32-byte BLAKE2b.
type Blake2b256 = Blake2b<U32>;

/// Hash the given data with SHA-256.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Hash the given data with SHA-512.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    Sha512::digest(data).into()
}

/// Hash the given data with Keccak-256.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hash the given data with BLAKE2b, 32-byte output.
pub fn blake2b256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

/// The VSYS address/id hash chain: `keccak256(blake2b256(data))`.
pub fn keccak256_blake2b256(data: &[u8]) -> [u8; 32] {
    keccak256(&blake2b256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex(&sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha512_known_vector() {
        assert_eq!(
            hex(&sha512(b"")),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn test_keccak256_known_vector() {
        // Keccak-256 of the empty string, distinct from SHA3-256.
        assert_eq!(
            hex(&keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_blake2b256_known_vector() {
        assert_eq!(
            hex(&blake2b256(b"")),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_combined_matches_composition() {
        let data = b"vsys";
        assert_eq!(keccak256_blake2b256(data), keccak256(&blake2b256(data)));
    }
}
