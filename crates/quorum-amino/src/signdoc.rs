//! Amino sign document
//!
//! The document an amino-only signer actually signs: account number, chain
//! id, fee, memo, messages, and sequence, serialized as canonical JSON
//! (sorted keys, HTML-sensitive characters escaped) before hashing.

use crate::registry::AminoMsg;
use quorum_types::{Coin, Fee};
use serde::{Deserialize, Serialize};

/// Fee in its amino JSON form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    /// Fee amounts
    pub amount: Vec<Coin>,
    /// Gas limit as decimal string
    pub gas: String,
}

impl From<&Fee> for StdFee {
    fn from(fee: &Fee) -> Self {
        Self {
            amount: fee.amount.clone(),
            gas: fee.gas.clone(),
        }
    }
}

/// The legacy amino signing document.
///
/// Account number and sequence are decimal strings; every co-signer of a
/// multisig transaction signs the same document with the multisig
/// account's values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub account_number: String,
    pub chain_id: String,
    pub fee: StdFee,
    pub memo: String,
    pub msgs: Vec<AminoMsg>,
    pub sequence: String,
}

impl StdSignDoc {
    /// Canonical bytes to hand to the signer.
    ///
    /// Serialization goes through `serde_json::Value`, whose objects are
    /// key-sorted maps, giving the canonical ordering amino requires; the
    /// HTML characters `&`, `<`, `>` are escaped the way legacy signers
    /// expect.
    pub fn sign_bytes(&self) -> Vec<u8> {
        let value = serde_json::to_value(self).expect("sign doc serialization should not fail");
        let json = serde_json::to_string(&value).expect("sign doc serialization should not fail");
        escape_characters(&json).into_bytes()
    }
}

fn escape_characters(json: &str) -> String {
    json.replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}
