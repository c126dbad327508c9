//! Cryptographic key types for VSYS.
//!
//! VSYS keys are X25519 key pairs used with the axolotl Curve25519 signature
//! scheme (see [`crate::crypto::curve25519`]). All text forms are plain
//! base58 with no scheme prefix, matching what nodes and explorers display.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::curve25519;
use crate::error::ValidationError;

/// A 32-byte Curve25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PublicKey::LEN]);

impl PublicKey {
    /// Key length in bytes.
    pub const LEN: usize = 32;

    /// Create from raw 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        let arr: [u8; Self::LEN] =
            bytes
                .try_into()
                .map_err(|_| ValidationError::InvalidLength {
                    expected: Self::LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// The raw key bytes.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Verify a signature over a message.
    ///
    /// Deterministic and total: malformed signatures return `false`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        curve25519::verify(&self.0, message, signature.as_bytes())
    }
}

impl FromStr for PublicKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ValidationError::InvalidBase58(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A 32-byte Curve25519 private key (clamped).
#[derive(Clone)]
pub struct SecretKey([u8; SecretKey::LEN]);

impl SecretKey {
    /// Key length in bytes.
    pub const LEN: usize = 32;

    /// Generate a new random key.
    pub fn generate() -> Self {
        let mut seed = [0u8; Self::LEN];
        OsRng.fill_bytes(&mut seed);
        Self(curve25519::generate_private_key(seed))
    }

    /// Derive a key from 32 bytes of seed material (e.g. an account seed
    /// hash), clamping them into a valid private key.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self(curve25519::generate_private_key(seed))
    }

    /// Create from raw, already-clamped 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        let arr: [u8; Self::LEN] =
            bytes
                .try_into()
                .map_err(|_| ValidationError::InvalidLength {
                    expected: Self::LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// The raw key bytes.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Derive the public key.
    pub fn public_key(&self) -> PublicKey {
        match curve25519::public_key(&self.0) {
            Ok(bytes) => PublicKey(bytes),
            // The length is fixed by the type.
            Err(_) => unreachable!("32-byte key cannot be rejected"),
        }
    }

    /// Sign a message, drawing fresh randomness for the nonce.
    ///
    /// The key length is guaranteed by this type, so signing cannot fail;
    /// see [`curve25519::sign`] for the raw-bytes fallible entry point.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(curve25519::sign_keyed(&self.0, message))
    }
}

impl FromStr for SecretKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ValidationError::InvalidBase58(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(***)")
    }
}

/// A 64-byte Curve25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; Signature::LEN]);

impl Signature {
    /// Signature length in bytes.
    pub const LEN: usize = 64;

    /// Create from raw 64 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        let arr: [u8; Self::LEN] =
            bytes
                .try_into()
                .map_err(|_| ValidationError::InvalidLength {
                    expected: Self::LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// The raw signature bytes.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl FromStr for Signature {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ValidationError::InvalidBase58(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A public/private key pair.
///
/// # Example
///
/// ```
/// use vsys_kit::KeyPair;
///
/// let keypair = KeyPair::random();
/// let signature = keypair.secret_key.sign(b"hello");
/// assert!(keypair.public_key.verify(b"hello", &signature));
/// ```
#[derive(Clone)]
pub struct KeyPair {
    /// The public key.
    pub public_key: PublicKey,
    /// The private key.
    pub secret_key: SecretKey,
}

impl KeyPair {
    /// Generate a random key pair.
    pub fn random() -> Self {
        Self::from_secret_key(SecretKey::generate())
    }

    /// Build a key pair from an existing secret key.
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            public_key,
            secret_key,
        }
    }

    /// Assemble a key pair from both halves, probing that they match.
    ///
    /// A pair whose public key does not verify the private key's signatures
    /// is rejected with [`ValidationError::KeyPairMismatch`].
    pub fn new(public_key: PublicKey, secret_key: SecretKey) -> Result<Self, ValidationError> {
        let probe = secret_key.sign(b"vsys-kit keypair probe");
        if !public_key.verify(b"vsys-kit keypair probe", &probe) {
            return Err(ValidationError::KeyPairMismatch);
        }
        Ok(Self {
            public_key,
            secret_key,
        })
    }
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("secret_key", &"***")
            .finish()
    }
}
