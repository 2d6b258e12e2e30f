//! Transaction and signature record types

use crate::protobuf::Any;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while interpreting record fields
#[derive(Error, Debug)]
pub enum RecordError {
    /// A numeric field held a non-decimal value
    #[error("invalid numeric field {field}:: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// A single coin amount
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination
    pub denom: String,
    /// Amount as decimal string
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Transaction fee
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Fee amounts
    pub amount: Vec<Coin>,
    /// Gas limit as decimal string
    pub gas: String,
}

/// A transaction awaiting threshold signatures.
///
/// Immutable once submitted: every signer must encode the same messages and
/// memo so their body bytes match.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTransaction {
    /// Ordered messages, each a packed protobuf Any
    pub msgs: Vec<Any>,
    /// Fee for the whole transaction
    pub fee: Fee,
    /// Transaction memo
    pub memo: String,
    /// Bech32 address of the target multisig account
    pub multisig_address: String,
}

impl PendingTransaction {
    /// Distinct type URLs of the messages, in first-seen order
    pub fn type_urls(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for msg in &self.msgs {
            if !seen.contains(&msg.type_url) {
                seen.push(msg.type_url.clone());
            }
        }
        seen
    }
}

/// One collected signature, as exchanged with the record store.
///
/// Account number and sequence travel as decimal strings, matching the LCD
/// and the store's JSON payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    /// Canonical encoded transaction body, base64
    pub body_bytes: String,
    /// Signature bytes, base64
    pub signature: String,
    /// Signer's bech32 address
    pub address: String,
    /// Multisig account number at signing time
    pub account_number: String,
    /// Multisig sequence at signing time
    pub sequence: String,
}

/// Account number and sequence of an on-chain account.
///
/// Fetched fresh immediately before each sign; a stale sequence invalidates
/// the signature on broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSequence {
    pub account_number: String,
    pub sequence: String,
}

impl AccountSequence {
    /// Account number as u64
    pub fn account_number_u64(&self) -> Result<u64, RecordError> {
        self.account_number
            .parse()
            .map_err(|_| RecordError::InvalidNumber {
                field: "account_number",
                value: self.account_number.clone(),
            })
    }

    /// Sequence as u64
    pub fn sequence_u64(&self) -> Result<u64, RecordError> {
        self.sequence.parse().map_err(|_| RecordError::InvalidNumber {
            field: "sequence",
            value: self.sequence.clone(),
        })
    }
}
