//! Curve25519 signatures in the axolotl `calculateSignature` variant.
//!
//! VSYS nodes validate signatures produced by the classic axolotl
//! (libsignal) Curve25519 scheme rather than plain Ed25519: the key pair is
//! an X25519 pair (Montgomery u-coordinates), the nonce is derived from 64
//! bytes of fresh randomness per call, and the Edwards sign bit of the
//! public key is folded into byte 63 of the signature. Verification converts
//! the Montgomery public key back to an Edwards point using that bit and
//! then checks the usual Ed25519 equation.
//!
//! [`sign`] draws new randomness on every invocation; nonce reuse here is a
//! key-recovery defect, not an optimization target.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::{clamp_integer, Scalar};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};

use crate::error::InvalidKeyError;

/// Length of a private key in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;
/// Length of a public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Length of a signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Domain prefix mixed into the nonce hash (0xFE followed by 31 0xFF bytes),
/// as in the reference axolotl `crypto_sign_modified`.
const NONCE_PREFIX: [u8; 32] = [
    0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff,
];

/// Derive a private key from 32 random bytes by clamping them.
pub fn generate_private_key(rand32: [u8; 32]) -> [u8; 32] {
    clamp_integer(rand32)
}

/// Derive the X25519 public key (Montgomery u-coordinate) for a private key.
///
/// Fails with [`InvalidKeyError`] if the private key is not exactly 32 bytes.
pub fn public_key(private_key: &[u8]) -> Result<[u8; PUBLIC_KEY_LEN], InvalidKeyError> {
    let key = key32(private_key)?;
    Ok(EdwardsPoint::mul_base_clamped(key)
        .to_montgomery()
        .to_bytes())
}

/// Sign a message, drawing 64 bytes of fresh randomness for the nonce.
///
/// Two signatures over the same key and message will differ, yet both
/// verify. The only failure mode is a private key of the wrong length.
pub fn sign(private_key: &[u8], message: &[u8]) -> Result<[u8; SIGNATURE_LEN], InvalidKeyError> {
    Ok(sign_keyed(&key32(private_key)?, message))
}

/// Sign with a key whose length is already proven; cannot fail.
pub(crate) fn sign_keyed(private_key: &[u8; 32], message: &[u8]) -> [u8; SIGNATURE_LEN] {
    let mut random = [0u8; 64];
    OsRng.fill_bytes(&mut random);
    sign_with_random(private_key, message, &random)
}

/// Deterministic core of [`sign`]: the caller supplies the 64 random bytes.
///
/// Exposed within the crate so tests can pin the nonce; production paths go
/// through [`sign`].
pub(crate) fn sign_with_random(
    private_key: &[u8; 32],
    message: &[u8],
    random: &[u8; 64],
) -> [u8; SIGNATURE_LEN] {
    // The private key bytes are used as a scalar directly; clamping happened
    // at key generation.
    let a = Scalar::from_bytes_mod_order(*private_key);
    let ed_public = EdwardsPoint::mul_base(&a).compress();
    let sign_bit = ed_public.as_bytes()[31] & 0x80;

    // nonce = SHA-512(prefix || key || message || random) mod l
    let mut hasher = Sha512::new();
    hasher.update(NONCE_PREFIX);
    hasher.update(private_key);
    hasher.update(message);
    hasher.update(random);
    let nonce = Scalar::from_bytes_mod_order_wide(&hasher.finalize().into());

    let big_r = EdwardsPoint::mul_base(&nonce).compress();

    // hram = SHA-512(R || A_ed || message) mod l
    let mut hasher = Sha512::new();
    hasher.update(big_r.as_bytes());
    hasher.update(ed_public.as_bytes());
    hasher.update(message);
    let hram = Scalar::from_bytes_mod_order_wide(&hasher.finalize().into());

    let s = nonce + hram * a;

    let mut signature = [0u8; SIGNATURE_LEN];
    signature[..32].copy_from_slice(big_r.as_bytes());
    signature[32..].copy_from_slice(&s.to_bytes());
    // Carry the Edwards sign bit of the public key in the top bit of S.
    signature[63] &= 0x7f;
    signature[63] |= sign_bit;
    signature
}

/// Verify a signature against an X25519 public key and message.
///
/// Total over its input space: any malformed input (wrong lengths, point not
/// on the curve, non-canonical scalar) returns `false` rather than an error.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    if public_key.len() != PUBLIC_KEY_LEN || signature.len() != SIGNATURE_LEN {
        return false;
    }

    let mut mont = [0u8; 32];
    mont.copy_from_slice(public_key);
    let edwards_sign = (signature[63] & 0x80) >> 7;
    let Some(a_ed) = MontgomeryPoint(mont).to_edwards(edwards_sign) else {
        return false;
    };
    let ed_public = a_ed.compress();

    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&signature[32..]);
    s_bytes[31] &= 0x7f;
    let s: Option<Scalar> = Scalar::from_canonical_bytes(s_bytes).into();
    let Some(s) = s else {
        return false;
    };

    let mut hasher = Sha512::new();
    hasher.update(&signature[..32]);
    hasher.update(ed_public.as_bytes());
    hasher.update(message);
    let hram = Scalar::from_bytes_mod_order_wide(&hasher.finalize().into());

    // R' = s*B - hram*A must equal the R carried in the signature.
    let recomputed = EdwardsPoint::vartime_double_scalar_mul_basepoint(&-hram, &a_ed, &s);
    recomputed.compress().as_bytes() == &signature[..32]
}

fn key32(private_key: &[u8]) -> Result<[u8; 32], InvalidKeyError> {
    private_key.try_into().map_err(|_| InvalidKeyError {
        expected: PRIVATE_KEY_LEN,
        actual: private_key.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> [u8; 32] {
        let mut seed = [0u8; 32];
        seed.copy_from_slice(b"0123456789abcdef0123456789abcdef");
        generate_private_key(seed)
    }

    #[test]
    fn test_sign_and_verify() {
        let private = test_key();
        let public = public_key(&private).unwrap();
        let message = b"canonical bytes to sign";

        let signature = sign(&private, message).unwrap();
        assert!(verify(&public, message, &signature));
    }

    #[test]
    fn test_signatures_are_randomized() {
        let private = test_key();
        let public = public_key(&private).unwrap();
        let message = b"same message twice";

        let sig1 = sign(&private, message).unwrap();
        let sig2 = sign(&private, message).unwrap();

        assert_ne!(sig1.to_vec(), sig2.to_vec());
        assert!(verify(&public, message, &sig1));
        assert!(verify(&public, message, &sig2));
    }

    #[test]
    fn test_sign_is_deterministic_for_fixed_randomness() {
        let private = test_key();
        let random = [7u8; 64];
        let message = b"pinned nonce";

        let sig1 = sign_with_random(&private, message, &random);
        let sig2 = sign_with_random(&private, message, &random);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_verify_rejects_flipped_message_bit() {
        let private = test_key();
        let public = public_key(&private).unwrap();
        let message = b"untampered".to_vec();

        let signature = sign(&private, &message).unwrap();

        let mut tampered = message.clone();
        tampered[0] ^= 0x01;
        assert!(!verify(&public, &tampered, &signature));
    }

    #[test]
    fn test_verify_rejects_tampered_signature() {
        let private = test_key();
        let public = public_key(&private).unwrap();
        let message = b"message";

        let mut signature = sign(&private, message).unwrap();
        signature[10] ^= 0xff;
        assert!(!verify(&public, message, &signature));
    }

    #[test]
    fn test_short_private_key_is_rejected() {
        let err = sign(&[0u8; 10], b"msg").unwrap_err();
        assert_eq!(
            err,
            InvalidKeyError {
                expected: 32,
                actual: 10
            }
        );
        assert!(public_key(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_verify_is_total_over_malformed_input() {
        assert!(!verify(&[0u8; 31], b"msg", &[0u8; 64]));
        assert!(!verify(&[0u8; 32], b"msg", &[0u8; 63]));
        assert!(!verify(&[0u8; 32], b"msg", &[0u8; 64]));
    }

    #[test]
    fn test_clamping() {
        let private = generate_private_key([0xffu8; 32]);
        assert_eq!(private[0] & 0b0000_0111, 0);
        assert_eq!(private[31] & 0b1000_0000, 0);
        assert_eq!(private[31] & 0b0100_0000, 0b0100_0000);
    }
}
