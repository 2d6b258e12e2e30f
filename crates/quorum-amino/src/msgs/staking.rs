//! Staking module messages

use super::{coin_to_amino, CoinProto};
use quorum_types::MessageExt;
use prost::Message;
use serde_json::{json, Value};

/// MsgDelegate delegates coins from a delegator to a validator
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgDelegate {
    /// The delegator's address
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    /// The validator operator address
    #[prost(string, tag = "2")]
    pub validator_address: String,
    /// The amount to delegate
    #[prost(message, optional, tag = "3")]
    pub amount: Option<CoinProto>,
}

impl MessageExt for MsgDelegate {
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgDelegate";
}

/// MsgUndelegate undelegates coins from a validator
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgUndelegate {
    /// The delegator's address
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    /// The validator operator address
    #[prost(string, tag = "2")]
    pub validator_address: String,
    /// The amount to undelegate
    #[prost(message, optional, tag = "3")]
    pub amount: Option<CoinProto>,
}

impl MessageExt for MsgUndelegate {
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgUndelegate";
}

/// MsgBeginRedelegate moves a delegation between validators
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgBeginRedelegate {
    /// The delegator's address
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    /// The source validator operator address
    #[prost(string, tag = "2")]
    pub validator_src_address: String,
    /// The destination validator operator address
    #[prost(string, tag = "3")]
    pub validator_dst_address: String,
    /// The amount to redelegate
    #[prost(message, optional, tag = "4")]
    pub amount: Option<CoinProto>,
}

impl MessageExt for MsgBeginRedelegate {
    const TYPE_URL: &'static str = "/cosmos.staking.v1beta1.MsgBeginRedelegate";
}

pub const MSG_DELEGATE_AMINO: &str = "cosmos-sdk/MsgDelegate";
pub const MSG_UNDELEGATE_AMINO: &str = "cosmos-sdk/MsgUndelegate";
pub const MSG_BEGIN_REDELEGATE_AMINO: &str = "cosmos-sdk/MsgBeginRedelegate";

pub(crate) fn msg_delegate_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgDelegate::decode(bytes)?;
    Ok(json!({
        "delegator_address": msg.delegator_address,
        "validator_address": msg.validator_address,
        "amount": msg.amount.as_ref().map(coin_to_amino),
    }))
}

pub(crate) fn msg_undelegate_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgUndelegate::decode(bytes)?;
    Ok(json!({
        "delegator_address": msg.delegator_address,
        "validator_address": msg.validator_address,
        "amount": msg.amount.as_ref().map(coin_to_amino),
    }))
}

pub(crate) fn msg_begin_redelegate_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgBeginRedelegate::decode(bytes)?;
    Ok(json!({
        "delegator_address": msg.delegator_address,
        "validator_src_address": msg.validator_src_address,
        "validator_dst_address": msg.validator_dst_address,
        "amount": msg.amount.as_ref().map(coin_to_amino),
    }))
}
