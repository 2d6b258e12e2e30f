//! Bank module messages

use super::{coin_to_amino, CoinProto};
use quorum_types::MessageExt;
use prost::Message;
use serde_json::{json, Value};

/// MsgSend represents a message to send coins from one account to another
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgSend {
    /// The sender's address as bech32 string
    #[prost(string, tag = "1")]
    pub from_address: String,
    /// The recipient's address as bech32 string
    #[prost(string, tag = "2")]
    pub to_address: String,
    /// The amount to send
    #[prost(message, repeated, tag = "3")]
    pub amount: Vec<CoinProto>,
}

impl MessageExt for MsgSend {
    const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";
}

/// Amino type tag for MsgSend
pub const MSG_SEND_AMINO: &str = "cosmos-sdk/MsgSend";

pub(crate) fn msg_send_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgSend::decode(bytes)?;
    Ok(json!({
        "from_address": msg.from_address,
        "to_address": msg.to_address,
        "amount": msg.amount.iter().map(coin_to_amino).collect::<Vec<_>>(),
    }))
}
