//! Addresses, chain ids, and the fixed-length identifier types.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::hashes::keccak256_blake2b256;
use crate::error::{ChainMismatchError, ValidationError};
use crate::types::PublicKey;

/// The chain an address belongs to, identified by one ASCII byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChainId {
    Mainnet = b'M',
    Testnet = b'T',
}

impl ChainId {
    /// The byte embedded in addresses and ids on this chain.
    pub const fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Look up a chain by its id byte.
    pub fn from_byte(byte: u8) -> Result<Self, ValidationError> {
        match byte {
            b'M' => Ok(ChainId::Mainnet),
            b'T' => Ok(ChainId::Testnet),
            other => Err(ValidationError::UnknownChainId(other)),
        }
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

/// A VSYS account address.
///
/// 26 bytes on the wire: version (1) · chain id (1) · public-key hash (20) ·
/// checksum (4). The checksum is the first 4 bytes of
/// `keccak256(blake2b256(...))` over the preceding 22 bytes. Construction
/// validates all of that, so an `Address` in hand is always well-formed —
/// but callers must still check it is on the chain they expect with
/// [`Address::ensure_on`] before embedding it in a transaction.
///
/// # Example
///
/// ```
/// use vsys_kit::{Address, ChainId, KeyPair};
///
/// let keypair = KeyPair::random();
/// let addr = Address::from_public_key(&keypair.public_key, ChainId::Testnet);
/// assert!(addr.ensure_on(ChainId::Testnet).is_ok());
/// assert!(addr.ensure_on(ChainId::Mainnet).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; Address::LEN]);

impl Address {
    /// Total serialized length in bytes.
    pub const LEN: usize = 26;
    /// Address format version.
    pub const VERSION: u8 = 5;
    /// Length of the embedded public-key hash.
    pub const PUBLIC_KEY_HASH_LEN: usize = 20;
    /// Length of the trailing checksum.
    pub const CHECKSUM_LEN: usize = 4;

    /// Derive the address of a public key on the given chain.
    pub fn from_public_key(public_key: &PublicKey, chain: ChainId) -> Self {
        let mut bytes = [0u8; Self::LEN];
        bytes[0] = Self::VERSION;
        bytes[1] = chain.as_byte();
        let hash = keccak256_blake2b256(public_key.as_bytes());
        bytes[2..22].copy_from_slice(&hash[..Self::PUBLIC_KEY_HASH_LEN]);
        let checksum = keccak256_blake2b256(&bytes[..22]);
        bytes[22..].copy_from_slice(&checksum[..Self::CHECKSUM_LEN]);
        Self(bytes)
    }

    /// Validate raw bytes as an address.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        if bytes.len() != Self::LEN {
            return Err(ValidationError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        if bytes[0] != Self::VERSION {
            return Err(ValidationError::InvalidAddressVersion(bytes[0]));
        }
        ChainId::from_byte(bytes[1])?;

        let checksum = keccak256_blake2b256(&bytes[..Self::LEN - Self::CHECKSUM_LEN]);
        if bytes[Self::LEN - Self::CHECKSUM_LEN..] != checksum[..Self::CHECKSUM_LEN] {
            return Err(ValidationError::InvalidChecksum);
        }

        let mut arr = [0u8; Self::LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// The raw 26 bytes, embedded in signing bytes without a length prefix.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// The address format version byte.
    pub const fn version(&self) -> u8 {
        self.0[0]
    }

    /// The chain this address belongs to.
    pub fn chain_id(&self) -> ChainId {
        // Validated at construction, so the byte is always known.
        match ChainId::from_byte(self.0[1]) {
            Ok(chain) => chain,
            Err(_) => unreachable!("address constructed with unknown chain id"),
        }
    }

    /// The 20-byte public-key hash.
    pub fn public_key_hash(&self) -> &[u8] {
        &self.0[2..2 + Self::PUBLIC_KEY_HASH_LEN]
    }

    /// Assert this address is on the expected chain.
    ///
    /// Using an address from the wrong chain is a contract violation, not a
    /// condition to tolerate, so this returns [`ChainMismatchError`].
    pub fn ensure_on(&self, chain: ChainId) -> Result<(), ChainMismatchError> {
        if self.0[1] != chain.as_byte() {
            return Err(ChainMismatchError::new(chain, self.0[1]));
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ValidationError::InvalidBase58(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn decode_fixed(s: &str, expected: usize) -> Result<Vec<u8>, ValidationError> {
    let bytes = bs58::decode(s)
        .into_vec()
        .map_err(|e| ValidationError::InvalidBase58(e.to_string()))?;
    if bytes.len() != expected {
        return Err(ValidationError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// A transaction id: 32 opaque bytes with a base58 text form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId([u8; TransactionId::LEN]);

impl TransactionId {
    /// Serialized length in bytes.
    pub const LEN: usize = 32;

    /// Create from raw bytes.
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

    /// The raw 32 bytes, embedded in signing bytes without a length prefix.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl FromStr for TransactionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(&decode_fixed(s, Self::LEN)?)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", self)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A contract id: 26 opaque bytes with a base58 text form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractId([u8; ContractId::LEN]);

impl ContractId {
    /// Serialized length in bytes.
    pub const LEN: usize = 26;
    /// Address-style version byte of contract ids.
    pub const VERSION: i8 = 6;

    /// Create from raw bytes.
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

    /// The raw 26 bytes, embedded in signing bytes without a length prefix.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Derive the id of the token at `index` within this contract.
    pub fn token_id(&self, index: u32) -> TokenId {
        let raw = &self.0[1..Self::LEN - Address::CHECKSUM_LEN];

        let mut bytes = [0u8; TokenId::LEN];
        bytes[0] = TokenId::VERSION as u8;
        bytes[1..22].copy_from_slice(raw);
        bytes[22..26].copy_from_slice(&index.to_be_bytes());
        let checksum = keccak256_blake2b256(&bytes[..26]);
        bytes[26..].copy_from_slice(&checksum[..Address::CHECKSUM_LEN]);
        TokenId(bytes)
    }
}

impl FromStr for ContractId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(&decode_fixed(s, Self::LEN)?)
    }
}

impl Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractId({})", self)
    }
}

impl Serialize for ContractId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContractId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A token id: 30 opaque bytes with a base58 text form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId([u8; TokenId::LEN]);

impl TokenId {
    /// Serialized length in bytes.
    pub const LEN: usize = 30;
    /// Address-style version byte of token ids.
    pub const VERSION: i8 = -124;
    /// Length of the embedded token index.
    pub const INDEX_LEN: usize = 4;

    /// The system (VSYS coin) token id on mainnet.
    pub const MAINNET_VSYS: &'static str = "TWatCreEv7ayv6iAfLgke6ppVV33kDjFqSJn8yicf";
    /// The system (VSYS coin) token id on testnet.
    pub const TESTNET_VSYS: &'static str = "TWuKDNU1SAheHR99s1MbGZLPh1KophEmKk1eeU3mW";

    /// Create from raw bytes.
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

    /// The raw 30 bytes.
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Derive the id of the contract this token belongs to.
    pub fn contract_id(&self) -> ContractId {
        let raw = &self.0[1..Self::LEN - Self::INDEX_LEN - Address::CHECKSUM_LEN];

        let mut bytes = [0u8; ContractId::LEN];
        bytes[0] = ContractId::VERSION as u8;
        bytes[1..22].copy_from_slice(raw);
        let checksum = keccak256_blake2b256(&bytes[..22]);
        bytes[22..].copy_from_slice(&checksum[..Address::CHECKSUM_LEN]);
        ContractId(bytes)
    }
}

impl FromStr for TokenId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(&decode_fixed(s, Self::LEN)?)
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self)
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
