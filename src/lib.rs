//! # vsys-kit
//!
//! Transaction encoding and signing for the VSYS blockchain.
//!
//! This crate covers the offline half of talking to a VSYS node: building
//! transaction requests, producing their canonical signing bytes, signing
//! them with axolotl Curve25519 keys, and projecting signed requests into
//! the JSON payloads the node broadcast endpoints accept. Submitting those
//! payloads over HTTP is left to the caller.
//!
//! ## Quick start
//!
//! ```
//! use vsys_kit::*;
//!
//! // Keys and the sender's address on testnet
//! let keypair = KeyPair::random();
//! let sender = Address::from_public_key(&keypair.public_key, ChainId::Testnet);
//!
//! // A 1.5 VSYS payment
//! let recipient: Address =
//!     Address::from_public_key(&KeyPair::random().public_key, ChainId::Testnet);
//! recipient.ensure_on(ChainId::Testnet)?;
//!
//! let request = PaymentRequest::new(
//!     recipient,
//!     "1.5".parse::<Amount>()?,
//!     Timestamp::now(),
//!     b"for lunch".to_vec(),
//!     Fee::PAYMENT,
//! )?;
//!
//! // Ready for POST /vsys/broadcast/payment
//! let payload = request.to_broadcast_payload(&keypair);
//! let body = serde_json::to_string(&payload).unwrap();
//! # Ok::<(), vsys_kit::Error>(())
//! ```
//!
//! ## Module overview
//!
//! - [`types`] — addresses, keys, amounts, and the transaction requests
//! - [`crypto`] — hashing and the Curve25519 signature scheme
//! - [`error`] — the error hierarchy
//!
//! Everything in [`types`] is re-exported at the crate root.

pub mod crypto;
pub mod error;
pub mod types;

pub use error::{ChainMismatchError, Error, InvalidKeyError, ValidationError};
pub use types::*;
