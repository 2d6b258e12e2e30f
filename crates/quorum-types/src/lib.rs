//! Core types for quorum multisig coordination
//!
//! This crate provides the shared vocabulary of the workspace: chain
//! profiles, account addresses, protobuf `Any` packing, and the record
//! types exchanged with the signature store.

pub mod address;
pub mod chain;
pub mod protobuf;
pub mod tx;

pub use address::AccAddress;
pub use chain::{ChainFamily, ChainProfile};
pub use protobuf::{Any, MessageExt};
pub use tx::{AccountSequence, Coin, Fee, PendingTransaction, SignatureRecord};
