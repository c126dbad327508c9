//! Transaction requests: canonical signing bytes and broadcast payloads.
//!
//! Each transaction kind owns its fields and derives exactly two things: the
//! canonical byte string a signature is computed over, and the JSON payload
//! handed to a node's broadcast endpoint. The byte layouts here must match
//! node-side validation bit for bit — field order, big-endian widths, and
//! 2-byte length prefixes are all load-bearing.
//!
//! Note the historical asymmetry in field order: Payment puts the timestamp
//! right after the discriminant, every other kind puts it last, and the
//! 2-byte fee scale always follows the fee. Nodes validate the legacy order,
//! so it is reproduced exactly rather than normalized.
//!
//! # Example
//!
//! ```
//! use vsys_kit::*;
//!
//! let keypair = KeyPair::random();
//! let recipient = Address::from_public_key(&KeyPair::random().public_key, ChainId::Testnet);
//!
//! let request = PaymentRequest::new(
//!     recipient,
//!     Amount::vsys(5),
//!     Timestamp::now(),
//!     Vec::new(),
//!     Fee::PAYMENT,
//! )?;
//!
//! let payload = request.to_broadcast_payload(&keypair);
//! let json = serde_json::to_string(&payload).unwrap();
//! # Ok::<(), vsys_kit::ValidationError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ValidationError;
use crate::types::{
    Address, Amount, ContractId, DbData, DbKey, Fee, KeyPair, PublicKey, Signature, Timestamp,
    TransactionId,
};

/// Maximum byte length that fits a u16 length prefix.
const MAX_PREFIXED_LEN: usize = u16::MAX as usize;

/// Transaction kind, one byte on the wire.
///
/// The discriminant is always the first byte of a transaction's signing
/// bytes. This mapping is wire compatibility and must never change for
/// existing kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxType {
    Genesis = 1,
    Payment = 2,
    Lease = 3,
    LeaseCancel = 4,
    Minting = 5,
    ContendSlots = 6,
    ReleaseSlots = 7,
    RegisterContract = 8,
    ExecuteContractFunction = 9,
    DbPut = 10,
}

impl TxType {
    /// The one-byte wire discriminant.
    pub const fn as_byte(&self) -> u8 {
        *self as u8
    }
}

/// Index of a contract function, 2 bytes big-endian on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionIndex(pub u16);

impl FunctionIndex {
    /// Serialized form.
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

// ============================================================================
// Byte-building helpers
// ============================================================================

fn put_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn put_fee(buf: &mut Vec<u8>, fee: Fee) {
    // The fee scale constant is always welded to the fee.
    buf.extend_from_slice(&fee.as_units().to_be_bytes());
    buf.extend_from_slice(&Fee::SCALE.to_be_bytes());
}

fn put_len_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    buf.extend_from_slice(bytes);
}

fn check_len(field: &'static str, bytes: &[u8]) -> Result<(), ValidationError> {
    if bytes.len() > MAX_PREFIXED_LEN {
        return Err(ValidationError::FieldTooLong {
            field,
            len: bytes.len(),
            max: MAX_PREFIXED_LEN,
        });
    }
    Ok(())
}

// ============================================================================
// Request variants
// ============================================================================

/// A VSYS coin transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    recipient: Address,
    amount: Amount,
    timestamp: Timestamp,
    attachment: Vec<u8>,
    fee: Fee,
}

impl PaymentRequest {
    pub const TX_TYPE: TxType = TxType::Payment;

    /// Build a payment request; the attachment must fit a u16 length prefix.
    pub fn new(
        recipient: Address,
        amount: Amount,
        timestamp: Timestamp,
        attachment: Vec<u8>,
        fee: Fee,
    ) -> Result<Self, ValidationError> {
        check_len("attachment", &attachment)?;
        Ok(Self {
            recipient,
            amount,
            timestamp,
            attachment,
            fee,
        })
    }

    pub fn recipient(&self) -> &Address {
        &self.recipient
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The canonical bytes a signature is computed over.
    ///
    /// Layout: type(1) · timestamp(8) · amount(8) · fee(8) · feeScale(2) ·
    /// recipient(26) · attachmentLen(2)+attachment.
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(55 + self.attachment.len());
        buf.push(Self::TX_TYPE.as_byte());
        put_u64(&mut buf, self.timestamp.as_nanos());
        put_u64(&mut buf, self.amount.as_units());
        put_fee(&mut buf, self.fee);
        buf.extend_from_slice(self.recipient.as_bytes());
        put_len_prefixed(&mut buf, &self.attachment);
        buf
    }

    /// Sign and project into the `/vsys/broadcast/payment` payload.
    pub fn to_broadcast_payload(&self, key_pair: &KeyPair) -> PaymentPayload {
        let signature = key_pair.secret_key.sign(&self.to_sign_bytes());
        PaymentPayload {
            sender_public_key: key_pair.public_key,
            recipient: self.recipient,
            amount: self.amount,
            fee: self.fee,
            fee_scale: Fee::SCALE,
            timestamp: self.timestamp,
            attachment: bs58::encode(&self.attachment).into_string(),
            signature,
        }
    }
}

/// A lease of VSYS coins to a supernode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaseRequest {
    supernode: Address,
    amount: Amount,
    timestamp: Timestamp,
    fee: Fee,
}

impl LeaseRequest {
    pub const TX_TYPE: TxType = TxType::Lease;

    pub fn new(supernode: Address, amount: Amount, timestamp: Timestamp, fee: Fee) -> Self {
        Self {
            supernode,
            amount,
            timestamp,
            fee,
        }
    }

    pub fn supernode(&self) -> &Address {
        &self.supernode
    }

    /// Layout: type(1) · supernode(26) · amount(8) · fee(8) · feeScale(2) ·
    /// timestamp(8).
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(53);
        buf.push(Self::TX_TYPE.as_byte());
        buf.extend_from_slice(self.supernode.as_bytes());
        put_u64(&mut buf, self.amount.as_units());
        put_fee(&mut buf, self.fee);
        put_u64(&mut buf, self.timestamp.as_nanos());
        buf
    }

    /// Sign and project into the `/leasing/broadcast/lease` payload.
    pub fn to_broadcast_payload(&self, key_pair: &KeyPair) -> LeasePayload {
        let signature = key_pair.secret_key.sign(&self.to_sign_bytes());
        LeasePayload {
            sender_public_key: key_pair.public_key,
            recipient: self.supernode,
            amount: self.amount,
            fee: self.fee,
            fee_scale: Fee::SCALE,
            timestamp: self.timestamp,
            signature,
        }
    }
}

/// Cancellation of an active lease, referenced by its transaction id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaseCancelRequest {
    leasing_tx_id: TransactionId,
    timestamp: Timestamp,
    fee: Fee,
}

impl LeaseCancelRequest {
    pub const TX_TYPE: TxType = TxType::LeaseCancel;

    pub fn new(leasing_tx_id: TransactionId, timestamp: Timestamp, fee: Fee) -> Self {
        Self {
            leasing_tx_id,
            timestamp,
            fee,
        }
    }

    /// Layout: type(1) · fee(8) · feeScale(2) · timestamp(8) · txId(32).
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(51);
        buf.push(Self::TX_TYPE.as_byte());
        put_fee(&mut buf, self.fee);
        put_u64(&mut buf, self.timestamp.as_nanos());
        buf.extend_from_slice(self.leasing_tx_id.as_bytes());
        buf
    }

    /// Sign and project into the `/leasing/broadcast/cancel` payload.
    pub fn to_broadcast_payload(&self, key_pair: &KeyPair) -> LeaseCancelPayload {
        let signature = key_pair.secret_key.sign(&self.to_sign_bytes());
        LeaseCancelPayload {
            sender_public_key: key_pair.public_key,
            tx_id: self.leasing_tx_id,
            fee: self.fee,
            fee_scale: Fee::SCALE,
            timestamp: self.timestamp,
            signature,
        }
    }
}

/// Registration of a new contract.
///
/// The contract metadata and the init data stack arrive here as
/// already-serialized byte blobs; this request only length-prefixes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterContractRequest {
    contract: Vec<u8>,
    init_data: Vec<u8>,
    description: String,
    timestamp: Timestamp,
    fee: Fee,
}

impl RegisterContractRequest {
    pub const TX_TYPE: TxType = TxType::RegisterContract;

    pub fn new(
        contract: Vec<u8>,
        init_data: Vec<u8>,
        description: String,
        timestamp: Timestamp,
        fee: Fee,
    ) -> Result<Self, ValidationError> {
        check_len("contract", &contract)?;
        check_len("initData", &init_data)?;
        check_len("description", description.as_bytes())?;
        Ok(Self {
            contract,
            init_data,
            description,
            timestamp,
            fee,
        })
    }

    /// Layout: type(1) · contractLen(2)+contract · initDataLen(2)+initData ·
    /// descriptionLen(2)+description · fee(8) · feeScale(2) · timestamp(8).
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            25 + self.contract.len() + self.init_data.len() + self.description.len(),
        );
        buf.push(Self::TX_TYPE.as_byte());
        put_len_prefixed(&mut buf, &self.contract);
        put_len_prefixed(&mut buf, &self.init_data);
        put_len_prefixed(&mut buf, self.description.as_bytes());
        put_fee(&mut buf, self.fee);
        put_u64(&mut buf, self.timestamp.as_nanos());
        buf
    }

    /// Sign and project into the `/contract/broadcast/register` payload.
    pub fn to_broadcast_payload(&self, key_pair: &KeyPair) -> RegisterContractPayload {
        let signature = key_pair.secret_key.sign(&self.to_sign_bytes());
        RegisterContractPayload {
            sender_public_key: key_pair.public_key,
            contract: bs58::encode(&self.contract).into_string(),
            init_data: bs58::encode(&self.init_data).into_string(),
            description: self.description.clone(),
            fee: self.fee,
            fee_scale: Fee::SCALE,
            timestamp: self.timestamp,
            signature,
        }
    }
}

/// A call of a function on a registered contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteContractRequest {
    contract_id: ContractId,
    function_index: FunctionIndex,
    function_data: Vec<u8>,
    attachment: Vec<u8>,
    timestamp: Timestamp,
    fee: Fee,
}

impl ExecuteContractRequest {
    pub const TX_TYPE: TxType = TxType::ExecuteContractFunction;

    pub fn new(
        contract_id: ContractId,
        function_index: FunctionIndex,
        function_data: Vec<u8>,
        attachment: Vec<u8>,
        timestamp: Timestamp,
        fee: Fee,
    ) -> Result<Self, ValidationError> {
        check_len("functionData", &function_data)?;
        check_len("attachment", &attachment)?;
        Ok(Self {
            contract_id,
            function_index,
            function_data,
            attachment,
            timestamp,
            fee,
        })
    }

    /// Layout: type(1) · contractId(26) · functionIndex(2) ·
    /// functionDataLen(2)+functionData · attachmentLen(2)+attachment ·
    /// fee(8) · feeScale(2) · timestamp(8).
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        let mut buf =
            Vec::with_capacity(51 + self.function_data.len() + self.attachment.len());
        buf.push(Self::TX_TYPE.as_byte());
        buf.extend_from_slice(self.contract_id.as_bytes());
        buf.extend_from_slice(&self.function_index.to_bytes());
        put_len_prefixed(&mut buf, &self.function_data);
        put_len_prefixed(&mut buf, &self.attachment);
        put_fee(&mut buf, self.fee);
        put_u64(&mut buf, self.timestamp.as_nanos());
        buf
    }

    /// Sign and project into the `/contract/broadcast/execute` payload.
    pub fn to_broadcast_payload(&self, key_pair: &KeyPair) -> ExecuteContractPayload {
        let signature = key_pair.secret_key.sign(&self.to_sign_bytes());
        ExecuteContractPayload {
            sender_public_key: key_pair.public_key,
            contract_id: self.contract_id,
            function_index: self.function_index,
            function_data: bs58::encode(&self.function_data).into_string(),
            attachment: bs58::encode(&self.attachment).into_string(),
            fee: self.fee,
            fee_scale: Fee::SCALE,
            timestamp: self.timestamp,
            signature,
        }
    }
}

/// Storage of a value in the chain database under a text key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbPutRequest {
    db_key: DbKey,
    data: DbData,
    timestamp: Timestamp,
    fee: Fee,
}

impl DbPutRequest {
    pub const TX_TYPE: TxType = TxType::DbPut;

    pub fn new(db_key: DbKey, data: DbData, timestamp: Timestamp, fee: Fee) -> Self {
        Self {
            db_key,
            data,
            timestamp,
            fee,
        }
    }

    /// Layout: type(1) · dbKey(serialized) · data(serialized) · fee(8) ·
    /// feeScale(2) · timestamp(8).
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        let key = self.db_key.to_bytes();
        let data = self.data.to_bytes();
        let mut buf = Vec::with_capacity(19 + key.len() + data.len());
        buf.push(Self::TX_TYPE.as_byte());
        buf.extend_from_slice(&key);
        buf.extend_from_slice(&data);
        put_fee(&mut buf, self.fee);
        put_u64(&mut buf, self.timestamp.as_nanos());
        buf
    }

    /// Sign and project into the `/database/broadcast/put` payload.
    pub fn to_broadcast_payload(&self, key_pair: &KeyPair) -> DbPutPayload {
        let signature = key_pair.secret_key.sign(&self.to_sign_bytes());
        DbPutPayload {
            sender_public_key: key_pair.public_key,
            db_key: self.db_key.as_str().to_string(),
            data_type: self.data.type_name().to_string(),
            data: self.data.as_str().to_string(),
            fee: self.fee,
            fee_scale: Fee::SCALE,
            timestamp: self.timestamp,
            signature,
        }
    }
}

// ============================================================================
// The request sum type
// ============================================================================

/// Any transaction request.
///
/// The per-kind structs do the real work; this enum gives callers one type
/// to hold and makes kind handling exhaustive at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionRequest {
    Payment(PaymentRequest),
    Lease(LeaseRequest),
    LeaseCancel(LeaseCancelRequest),
    RegisterContract(RegisterContractRequest),
    ExecuteContract(ExecuteContractRequest),
    DbPut(DbPutRequest),
}

impl TransactionRequest {
    /// The wire discriminant of this request's kind.
    pub fn tx_type(&self) -> TxType {
        match self {
            Self::Payment(_) => TxType::Payment,
            Self::Lease(_) => TxType::Lease,
            Self::LeaseCancel(_) => TxType::LeaseCancel,
            Self::RegisterContract(_) => TxType::RegisterContract,
            Self::ExecuteContract(_) => TxType::ExecuteContractFunction,
            Self::DbPut(_) => TxType::DbPut,
        }
    }

    /// The canonical bytes to sign. Pure and deterministic: identical field
    /// values always produce identical bytes.
    pub fn to_sign_bytes(&self) -> Vec<u8> {
        match self {
            Self::Payment(req) => req.to_sign_bytes(),
            Self::Lease(req) => req.to_sign_bytes(),
            Self::LeaseCancel(req) => req.to_sign_bytes(),
            Self::RegisterContract(req) => req.to_sign_bytes(),
            Self::ExecuteContract(req) => req.to_sign_bytes(),
            Self::DbPut(req) => req.to_sign_bytes(),
        }
    }

    /// Sign the canonical bytes with fresh randomness.
    pub fn sign(&self, key_pair: &KeyPair) -> Signature {
        let bytes = self.to_sign_bytes();
        trace!(tx_type = ?self.tx_type(), len = bytes.len(), "signing canonical bytes");
        key_pair.secret_key.sign(&bytes)
    }

    /// Sign and project into the broadcast payload for this kind.
    pub fn to_broadcast_payload(&self, key_pair: &KeyPair) -> BroadcastPayload {
        debug!(tx_type = ?self.tx_type(), "projecting broadcast payload");
        match self {
            Self::Payment(req) => BroadcastPayload::Payment(req.to_broadcast_payload(key_pair)),
            Self::Lease(req) => BroadcastPayload::Lease(req.to_broadcast_payload(key_pair)),
            Self::LeaseCancel(req) => {
                BroadcastPayload::LeaseCancel(req.to_broadcast_payload(key_pair))
            }
            Self::RegisterContract(req) => {
                BroadcastPayload::RegisterContract(req.to_broadcast_payload(key_pair))
            }
            Self::ExecuteContract(req) => {
                BroadcastPayload::ExecuteContract(req.to_broadcast_payload(key_pair))
            }
            Self::DbPut(req) => BroadcastPayload::DbPut(req.to_broadcast_payload(key_pair)),
        }
    }
}

impl From<PaymentRequest> for TransactionRequest {
    fn from(req: PaymentRequest) -> Self {
        Self::Payment(req)
    }
}

impl From<LeaseRequest> for TransactionRequest {
    fn from(req: LeaseRequest) -> Self {
        Self::Lease(req)
    }
}

impl From<LeaseCancelRequest> for TransactionRequest {
    fn from(req: LeaseCancelRequest) -> Self {
        Self::LeaseCancel(req)
    }
}

impl From<RegisterContractRequest> for TransactionRequest {
    fn from(req: RegisterContractRequest) -> Self {
        Self::RegisterContract(req)
    }
}

impl From<ExecuteContractRequest> for TransactionRequest {
    fn from(req: ExecuteContractRequest) -> Self {
        Self::ExecuteContract(req)
    }
}

impl From<DbPutRequest> for TransactionRequest {
    fn from(req: DbPutRequest) -> Self {
        Self::DbPut(req)
    }
}

// ============================================================================
// Broadcast payloads
// ============================================================================

/// Payload for `/vsys/broadcast/payment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub sender_public_key: PublicKey,
    pub recipient: Address,
    pub amount: Amount,
    pub fee: Fee,
    pub fee_scale: u16,
    pub timestamp: Timestamp,
    /// Base58 of the raw attachment bytes.
    pub attachment: String,
    pub signature: Signature,
}

/// Payload for `/leasing/broadcast/lease`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeasePayload {
    pub sender_public_key: PublicKey,
    pub recipient: Address,
    pub amount: Amount,
    pub fee: Fee,
    pub fee_scale: u16,
    pub timestamp: Timestamp,
    pub signature: Signature,
}

/// Payload for `/leasing/broadcast/cancel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseCancelPayload {
    pub sender_public_key: PublicKey,
    pub tx_id: TransactionId,
    pub fee: Fee,
    pub fee_scale: u16,
    pub timestamp: Timestamp,
    pub signature: Signature,
}

/// Payload for `/contract/broadcast/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterContractPayload {
    pub sender_public_key: PublicKey,
    /// Base58 of the serialized contract metadata.
    pub contract: String,
    /// Base58 of the serialized init data stack.
    pub init_data: String,
    /// Plain text, not base58.
    pub description: String,
    pub fee: Fee,
    pub fee_scale: u16,
    pub timestamp: Timestamp,
    pub signature: Signature,
}

/// Payload for `/contract/broadcast/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteContractPayload {
    pub sender_public_key: PublicKey,
    pub contract_id: ContractId,
    pub function_index: FunctionIndex,
    /// Base58 of the serialized call data stack.
    pub function_data: String,
    /// Base58 of the raw attachment bytes.
    pub attachment: String,
    pub fee: Fee,
    pub fee_scale: u16,
    pub timestamp: Timestamp,
    pub signature: Signature,
}

/// Payload for `/database/broadcast/put`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbPutPayload {
    pub sender_public_key: PublicKey,
    /// Plain text, not base58.
    pub db_key: String,
    /// Declared type of the stored value, e.g. `"ByteArray"`.
    pub data_type: String,
    /// Plain text, not base58.
    pub data: String,
    pub fee: Fee,
    pub fee_scale: u16,
    pub timestamp: Timestamp,
    pub signature: Signature,
}

/// A broadcast payload of any kind, ready for JSON submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BroadcastPayload {
    Payment(PaymentPayload),
    Lease(LeasePayload),
    LeaseCancel(LeaseCancelPayload),
    RegisterContract(RegisterContractPayload),
    ExecuteContract(ExecuteContractPayload),
    DbPut(DbPutPayload),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChainId;

    fn fixed_address() -> Address {
        let public = PublicKey::from_bytes(&[7u8; 32]).unwrap();
        Address::from_public_key(&public, ChainId::Testnet)
    }

    fn keypair() -> KeyPair {
        KeyPair::random()
    }

    fn payment_request() -> PaymentRequest {
        PaymentRequest::new(
            fixed_address(),
            Amount::from_units(500_000_000),
            Timestamp::from_nanos(1_690_000_000_000_000_000).unwrap(),
            Vec::new(),
            Fee::PAYMENT,
        )
        .unwrap()
    }

    fn all_requests() -> Vec<TransactionRequest> {
        vec![
            payment_request().into(),
            LeaseRequest::new(
                fixed_address(),
                Amount::vsys(1),
                Timestamp::from_unix(1_700_000_000).unwrap(),
                Fee::LEASING,
            )
            .into(),
            LeaseCancelRequest::new(
                TransactionId::from_bytes(&[9u8; 32]).unwrap(),
                Timestamp::from_unix(1_700_000_000).unwrap(),
                Fee::LEASE_CANCEL,
            )
            .into(),
            RegisterContractRequest::new(
                vec![1, 2, 3, 4],
                vec![5, 6],
                "token contract".to_string(),
                Timestamp::from_unix(1_700_000_000).unwrap(),
                Fee::REGISTER_CONTRACT,
            )
            .unwrap()
            .into(),
            ExecuteContractRequest::new(
                ContractId::from_bytes(&[8u8; 26]).unwrap(),
                FunctionIndex(3),
                vec![0xaa, 0xbb],
                b"memo".to_vec(),
                Timestamp::from_unix(1_700_000_000).unwrap(),
                Fee::EXECUTE_CONTRACT,
            )
            .unwrap()
            .into(),
            DbPutRequest::new(
                DbKey::new("weather").unwrap(),
                DbData::byte_array("sunny").unwrap(),
                Timestamp::from_unix(1_700_000_000).unwrap(),
                Fee::DB_PUT,
            )
            .into(),
        ]
    }

    #[test]
    fn test_payment_golden_vector() {
        // 5 VSYS payment, empty attachment, minimum fee.
        let bytes = payment_request().to_sign_bytes();

        let mut expected = vec![2u8];
        expected.extend_from_slice(&1_690_000_000_000_000_000u64.to_be_bytes());
        expected.extend_from_slice(&500_000_000u64.to_be_bytes());
        expected.extend_from_slice(&10_000_000u64.to_be_bytes());
        expected.extend_from_slice(&[0x00, 0x64]);
        expected.extend_from_slice(fixed_address().as_bytes());
        expected.extend_from_slice(&[0x00, 0x00]);

        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 55);
    }

    #[test]
    fn test_sign_bytes_are_deterministic() {
        for request in all_requests() {
            assert_eq!(
                request.to_sign_bytes(),
                request.to_sign_bytes(),
                "{:?} not deterministic",
                request.tx_type()
            );
        }
    }

    #[test]
    fn test_first_byte_is_discriminant() {
        for request in all_requests() {
            assert_eq!(
                request.to_sign_bytes()[0],
                request.tx_type().as_byte(),
                "{:?}",
                request.tx_type()
            );
        }
    }

    #[test]
    fn test_discriminant_values_are_wire_stable() {
        assert_eq!(TxType::Genesis.as_byte(), 1);
        assert_eq!(TxType::Payment.as_byte(), 2);
        assert_eq!(TxType::Lease.as_byte(), 3);
        assert_eq!(TxType::LeaseCancel.as_byte(), 4);
        assert_eq!(TxType::Minting.as_byte(), 5);
        assert_eq!(TxType::ContendSlots.as_byte(), 6);
        assert_eq!(TxType::ReleaseSlots.as_byte(), 7);
        assert_eq!(TxType::RegisterContract.as_byte(), 8);
        assert_eq!(TxType::ExecuteContractFunction.as_byte(), 9);
        assert_eq!(TxType::DbPut.as_byte(), 10);
    }

    #[test]
    fn test_fee_scale_always_follows_fee() {
        // Offsets of the fee field per kind, fee scale is the 2 bytes after.
        let cases: Vec<(TransactionRequest, usize)> = vec![
            (payment_request().into(), 17),
            (
                LeaseRequest::new(
                    fixed_address(),
                    Amount::vsys(1),
                    Timestamp::from_unix(1_700_000_000).unwrap(),
                    Fee::LEASING,
                )
                .into(),
                35,
            ),
            (
                LeaseCancelRequest::new(
                    TransactionId::from_bytes(&[9u8; 32]).unwrap(),
                    Timestamp::from_unix(1_700_000_000).unwrap(),
                    Fee::LEASE_CANCEL,
                )
                .into(),
                1,
            ),
        ];
        for (request, fee_offset) in cases {
            let bytes = request.to_sign_bytes();
            assert_eq!(
                &bytes[fee_offset + 8..fee_offset + 10],
                &[0x00, 0x64],
                "{:?}",
                request.tx_type()
            );
        }
    }

    #[test]
    fn test_lease_layout_recipient_first_timestamp_last() {
        let timestamp = Timestamp::from_unix(1_700_000_000).unwrap();
        let request = LeaseRequest::new(fixed_address(), Amount::vsys(1), timestamp, Fee::LEASING);
        let bytes = request.to_sign_bytes();

        assert_eq!(bytes.len(), 53);
        assert_eq!(&bytes[1..27], fixed_address().as_bytes());
        assert_eq!(&bytes[45..], &timestamp.as_nanos().to_be_bytes());
    }

    #[test]
    fn test_lease_cancel_layout_tx_id_last() {
        let tx_id = TransactionId::from_bytes(&[9u8; 32]).unwrap();
        let request = LeaseCancelRequest::new(
            tx_id,
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::LEASE_CANCEL,
        );
        let bytes = request.to_sign_bytes();

        assert_eq!(bytes.len(), 51);
        assert_eq!(&bytes[19..], tx_id.as_bytes());
    }

    #[test]
    fn test_register_contract_length_prefixes() {
        let request = RegisterContractRequest::new(
            vec![1, 2, 3, 4],
            vec![5, 6],
            "desc".to_string(),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::REGISTER_CONTRACT,
        )
        .unwrap();
        let bytes = request.to_sign_bytes();

        // type(1) · [0,4][1,2,3,4] · [0,2][5,6] · [0,4]"desc" · fee · scale · ts
        assert_eq!(&bytes[1..3], &[0, 4]);
        assert_eq!(&bytes[3..7], &[1, 2, 3, 4]);
        assert_eq!(&bytes[7..9], &[0, 2]);
        assert_eq!(&bytes[9..11], &[5, 6]);
        assert_eq!(&bytes[11..13], &[0, 4]);
        assert_eq!(&bytes[13..17], b"desc");
        assert_eq!(bytes.len(), 17 + 8 + 2 + 8);
    }

    #[test]
    fn test_execute_contract_layout() {
        let contract_id = ContractId::from_bytes(&[8u8; 26]).unwrap();
        let request = ExecuteContractRequest::new(
            contract_id,
            FunctionIndex(3),
            vec![0xaa, 0xbb],
            Vec::new(),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::EXECUTE_CONTRACT,
        )
        .unwrap();
        let bytes = request.to_sign_bytes();

        assert_eq!(&bytes[1..27], contract_id.as_bytes());
        assert_eq!(&bytes[27..29], &[0, 3]);
        assert_eq!(&bytes[29..31], &[0, 2]);
        assert_eq!(&bytes[31..33], &[0xaa, 0xbb]);
        // empty attachment
        assert_eq!(&bytes[33..35], &[0, 0]);
    }

    #[test]
    fn test_db_put_layout() {
        let request = DbPutRequest::new(
            DbKey::new("k").unwrap(),
            DbData::byte_array("v").unwrap(),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::DB_PUT,
        );
        let bytes = request.to_sign_bytes();

        assert_eq!(bytes[0], 10);
        assert_eq!(&bytes[1..4], b"\x00\x01k");
        assert_eq!(&bytes[4..8], b"\x00\x02\x01v");
    }

    #[test]
    fn test_attachment_length_prefix() {
        let attachment = b"hello attachment".to_vec();
        let request = PaymentRequest::new(
            fixed_address(),
            Amount::vsys(1),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            attachment.clone(),
            Fee::PAYMENT,
        )
        .unwrap();
        let bytes = request.to_sign_bytes();

        let prefix = u16::from_be_bytes([bytes[53], bytes[54]]) as usize;
        assert_eq!(prefix, attachment.len());
        assert_eq!(&bytes[55..], &attachment[..]);
    }

    #[test]
    fn test_oversized_attachment_rejected() {
        let err = PaymentRequest::new(
            fixed_address(),
            Amount::vsys(1),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            vec![0u8; MAX_PREFIXED_LEN + 1],
            Fee::PAYMENT,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::FieldTooLong {
                field: "attachment",
                ..
            }
        ));
    }

    #[test]
    fn test_signature_in_payload_verifies() {
        let keypair = keypair();
        for request in all_requests() {
            let signature = request.sign(&keypair);
            assert!(
                keypair
                    .public_key
                    .verify(&request.to_sign_bytes(), &signature),
                "{:?}",
                request.tx_type()
            );
        }
    }

    #[test]
    fn test_payment_payload_field_names() {
        let payload = payment_request().to_broadcast_payload(&keypair());
        let json = serde_json::to_value(&payload).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "amount",
                "attachment",
                "fee",
                "feeScale",
                "recipient",
                "senderPublicKey",
                "signature",
                "timestamp"
            ]
        );
        assert_eq!(json["feeScale"], 100);
        assert_eq!(json["amount"], 500_000_000u64);
        assert_eq!(json["attachment"], "");
    }

    #[test]
    fn test_lease_payload_field_names() {
        let request = LeaseRequest::new(
            fixed_address(),
            Amount::vsys(1),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::LEASING,
        );
        let json = serde_json::to_value(request.to_broadcast_payload(&keypair())).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "amount",
                "fee",
                "feeScale",
                "recipient",
                "senderPublicKey",
                "signature",
                "timestamp"
            ]
        );
        // The supernode travels under the generic "recipient" name.
        assert_eq!(json["recipient"], fixed_address().to_string());
    }

    #[test]
    fn test_register_contract_payload_field_names() {
        let request = RegisterContractRequest::new(
            vec![1, 2, 3, 4],
            vec![5, 6],
            "token contract".to_string(),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::REGISTER_CONTRACT,
        )
        .unwrap();
        let json = serde_json::to_value(request.to_broadcast_payload(&keypair())).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "contract",
                "description",
                "fee",
                "feeScale",
                "initData",
                "senderPublicKey",
                "signature",
                "timestamp"
            ]
        );
        // Blobs travel as base58, the description as plain text.
        assert_eq!(json["contract"], bs58::encode([1, 2, 3, 4]).into_string());
        assert_eq!(json["initData"], bs58::encode([5, 6]).into_string());
        assert_eq!(json["description"], "token contract");
    }

    #[test]
    fn test_lease_cancel_payload_field_names() {
        let request = LeaseCancelRequest::new(
            TransactionId::from_bytes(&[9u8; 32]).unwrap(),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::LEASE_CANCEL,
        );
        let json = serde_json::to_value(request.to_broadcast_payload(&keypair())).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["fee", "feeScale", "senderPublicKey", "signature", "timestamp", "txId"]
        );
    }

    #[test]
    fn test_db_put_payload_declares_data_type() {
        let request = DbPutRequest::new(
            DbKey::new("weather").unwrap(),
            DbData::byte_array("sunny").unwrap(),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::DB_PUT,
        );
        let json = serde_json::to_value(request.to_broadcast_payload(&keypair())).unwrap();
        assert_eq!(json["dataType"], "ByteArray");
        // dbKey and data travel as plain text, not base58
        assert_eq!(json["dbKey"], "weather");
        assert_eq!(json["data"], "sunny");
    }

    #[test]
    fn test_execute_payload_encodings() {
        let request = ExecuteContractRequest::new(
            ContractId::from_bytes(&[8u8; 26]).unwrap(),
            FunctionIndex(3),
            vec![0xaa, 0xbb],
            b"memo".to_vec(),
            Timestamp::from_unix(1_700_000_000).unwrap(),
            Fee::EXECUTE_CONTRACT,
        )
        .unwrap();
        let json = serde_json::to_value(request.to_broadcast_payload(&keypair())).unwrap();

        assert_eq!(json["functionIndex"], 3);
        assert_eq!(
            json["functionData"],
            bs58::encode([0xaa, 0xbb]).into_string()
        );
        assert_eq!(json["attachment"], bs58::encode(b"memo").into_string());
    }
}
