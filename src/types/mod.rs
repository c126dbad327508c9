//! Core types for VSYS transactions.

mod address;
mod dbput;
mod key;
mod transaction;
mod units;

pub use address::{Address, ChainId, ContractId, TokenId, TransactionId};
pub use dbput::{DbData, DbKey};
pub use key::{KeyPair, PublicKey, SecretKey, Signature};
pub use transaction::{
    BroadcastPayload, DbPutPayload, DbPutRequest, ExecuteContractPayload, ExecuteContractRequest,
    FunctionIndex, LeaseCancelPayload, LeaseCancelRequest, LeasePayload, LeaseRequest,
    PaymentPayload, PaymentRequest, RegisterContractPayload, RegisterContractRequest,
    TransactionRequest, TxType,
};
pub use units::{Amount, Fee, Timestamp, UNIT};
