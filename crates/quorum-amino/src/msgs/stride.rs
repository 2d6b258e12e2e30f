//! Stride liquid-staking messages
//!
//! Available only through the Stride converter provider; other chains do
//! not resolve these type URLs.

use quorum_types::MessageExt;
use prost::Message;
use serde_json::{json, Value};

/// MsgLiquidStake stakes native tokens for stTokens
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgLiquidStake {
    /// The staker's address
    #[prost(string, tag = "1")]
    pub creator: String,
    /// The amount to stake, as decimal string
    #[prost(string, tag = "2")]
    pub amount: String,
    /// IBC denom of the host zone token
    #[prost(string, tag = "3")]
    pub host_denom: String,
}

impl MessageExt for MsgLiquidStake {
    const TYPE_URL: &'static str = "/stride.stakeibc.MsgLiquidStake";
}

/// MsgRedeemStake redeems stTokens back to the host zone
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgRedeemStake {
    /// The redeemer's address
    #[prost(string, tag = "1")]
    pub creator: String,
    /// The amount to redeem, as decimal string
    #[prost(string, tag = "2")]
    pub amount: String,
    /// Host zone chain id
    #[prost(string, tag = "3")]
    pub host_zone: String,
    /// Receiver address on the host zone
    #[prost(string, tag = "4")]
    pub receiver: String,
}

impl MessageExt for MsgRedeemStake {
    const TYPE_URL: &'static str = "/stride.stakeibc.MsgRedeemStake";
}

pub const MSG_LIQUID_STAKE_AMINO: &str = "stakeibc/LiquidStake";
pub const MSG_REDEEM_STAKE_AMINO: &str = "stakeibc/RedeemStake";

pub(crate) fn msg_liquid_stake_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgLiquidStake::decode(bytes)?;
    Ok(json!({
        "creator": msg.creator,
        "amount": msg.amount,
        "host_denom": msg.host_denom,
    }))
}

pub(crate) fn msg_redeem_stake_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgRedeemStake::decode(bytes)?;
    Ok(json!({
        "creator": msg.creator,
        "amount": msg.amount,
        "host_zone": msg.host_zone,
        "receiver": msg.receiver,
    }))
}
