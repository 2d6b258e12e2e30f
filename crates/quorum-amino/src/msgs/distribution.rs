//! Distribution module messages

use quorum_types::MessageExt;
use prost::Message;
use serde_json::{json, Value};

/// MsgWithdrawDelegatorReward withdraws accumulated staking rewards
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgWithdrawDelegatorReward {
    /// The delegator's address
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    /// The validator operator address
    #[prost(string, tag = "2")]
    pub validator_address: String,
}

impl MessageExt for MsgWithdrawDelegatorReward {
    const TYPE_URL: &'static str = "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward";
}

// The amino name predates the proto rename and differs from the type URL.
pub const MSG_WITHDRAW_REWARD_AMINO: &str = "cosmos-sdk/MsgWithdrawDelegationReward";

pub(crate) fn msg_withdraw_reward_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgWithdrawDelegatorReward::decode(bytes)?;
    Ok(json!({
        "delegator_address": msg.delegator_address,
        "validator_address": msg.validator_address,
    }))
}
