//! Governance module messages

use quorum_types::MessageExt;
use prost::Message;
use serde_json::{json, Value};

/// MsgVote casts a vote on an active proposal
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgVote {
    /// The proposal being voted on
    #[prost(uint64, tag = "1")]
    pub proposal_id: u64,
    /// The voter's address
    #[prost(string, tag = "2")]
    pub voter: String,
    /// Vote option (1 yes, 2 abstain, 3 no, 4 no with veto)
    #[prost(int32, tag = "3")]
    pub option: i32,
}

impl MessageExt for MsgVote {
    const TYPE_URL: &'static str = "/cosmos.gov.v1beta1.MsgVote";
}

pub const MSG_VOTE_AMINO: &str = "cosmos-sdk/MsgVote";

// Amino renders the proposal id as a decimal string but keeps the vote
// option numeric.
pub(crate) fn msg_vote_to_amino(bytes: &[u8]) -> Result<Value, prost::DecodeError> {
    let msg = MsgVote::decode(bytes)?;
    Ok(json!({
        "proposal_id": msg.proposal_id.to_string(),
        "voter": msg.voter,
        "option": msg.option,
    }))
}
