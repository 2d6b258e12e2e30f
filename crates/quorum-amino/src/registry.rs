//! Amino converter registry
//!
//! Converter resolution is a static, explicit mapping from message type URL
//! to converter, declared per provider at compile time. Which provider
//! serves a transaction is keyed by chain id: Stride chains carry their own
//! converter package layered over the cosmos one, every other chain uses
//! the cosmos package alone.

use crate::msgs::{bank, distribution, gov, staking, stride};
use quorum_types::{Any, MessageExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AminoError {
    /// No converter is registered for the message type
    #[error("unsupported message type:: {0}")]
    UnsupportedMessageType(String),

    /// The packed bytes do not decode as the registered message
    #[error("failed to decode {type_url}:: {source}")]
    Decode {
        type_url: String,
        source: prost::DecodeError,
    },
}

type ToAmino = fn(&[u8]) -> Result<Value, prost::DecodeError>;

/// One registered converter: the amino type tag paired with the protobuf
/// decode of its message family.
#[derive(Clone, Copy)]
pub struct AminoConverter {
    /// Amino type tag written into the sign doc (e.g. "cosmos-sdk/MsgSend")
    pub amino_type: &'static str,
    /// Decode packed protobuf bytes into the amino JSON value
    pub to_amino: ToAmino,
}

/// Converter table contributed by one message package
type ConverterTable = &'static [(&'static str, AminoConverter)];

static COSMOS_TABLE: ConverterTable = &[
    (
        bank::MsgSend::TYPE_URL,
        AminoConverter {
            amino_type: bank::MSG_SEND_AMINO,
            to_amino: bank::msg_send_to_amino,
        },
    ),
    (
        staking::MsgDelegate::TYPE_URL,
        AminoConverter {
            amino_type: staking::MSG_DELEGATE_AMINO,
            to_amino: staking::msg_delegate_to_amino,
        },
    ),
    (
        staking::MsgUndelegate::TYPE_URL,
        AminoConverter {
            amino_type: staking::MSG_UNDELEGATE_AMINO,
            to_amino: staking::msg_undelegate_to_amino,
        },
    ),
    (
        staking::MsgBeginRedelegate::TYPE_URL,
        AminoConverter {
            amino_type: staking::MSG_BEGIN_REDELEGATE_AMINO,
            to_amino: staking::msg_begin_redelegate_to_amino,
        },
    ),
    (
        distribution::MsgWithdrawDelegatorReward::TYPE_URL,
        AminoConverter {
            amino_type: distribution::MSG_WITHDRAW_REWARD_AMINO,
            to_amino: distribution::msg_withdraw_reward_to_amino,
        },
    ),
    (
        gov::MsgVote::TYPE_URL,
        AminoConverter {
            amino_type: gov::MSG_VOTE_AMINO,
            to_amino: gov::msg_vote_to_amino,
        },
    ),
];

static STRIDE_TABLE: ConverterTable = &[
    (
        stride::MsgLiquidStake::TYPE_URL,
        AminoConverter {
            amino_type: stride::MSG_LIQUID_STAKE_AMINO,
            to_amino: stride::msg_liquid_stake_to_amino,
        },
    ),
    (
        stride::MsgRedeemStake::TYPE_URL,
        AminoConverter {
            amino_type: stride::MSG_REDEEM_STAKE_AMINO,
            to_amino: stride::msg_redeem_stake_to_amino,
        },
    ),
];

/// Tables merged per provider, in order; a later table wins on collision
static COSMOS_PROVIDER: &[ConverterTable] = &[COSMOS_TABLE];
static STRIDE_PROVIDER: &[ConverterTable] = &[COSMOS_TABLE, STRIDE_TABLE];

/// Chain-id-keyed provider selection
fn provider_for_chain(chain_id: &str) -> &'static [ConverterTable] {
    match chain_id {
        "stride-1" | "stride-internal-1" => STRIDE_PROVIDER,
        _ => COSMOS_PROVIDER,
    }
}

/// A message in its amino JSON form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AminoMsg {
    /// Amino type tag
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Amino JSON value
    pub value: Value,
}

/// The converters needed to amino-encode one transaction.
///
/// Built from the transaction's type URLs; unresolvable URLs simply
/// produce no entry, and converting such a message later fails with
/// `UnsupportedMessageType`.
pub struct AminoRegistry {
    converters: HashMap<String, AminoConverter>,
}

impl AminoRegistry {
    /// Assemble the converter set for a transaction's type URLs.
    ///
    /// Never fails: duplicate URLs are collapsed and lookup misses are
    /// skipped.
    pub fn for_transaction<S: AsRef<str>>(type_urls: &[S], chain_id: &str) -> Self {
        let tables = provider_for_chain(chain_id);
        let mut converters = HashMap::new();

        for url in type_urls {
            let url = url.as_ref();
            if converters.contains_key(url) {
                continue;
            }
            for table in tables {
                if let Some((_, converter)) = table.iter().find(|(key, _)| *key == url) {
                    converters.insert(url.to_string(), *converter);
                }
            }
        }

        Self { converters }
    }

    /// Whether a converter is registered for the type URL
    pub fn contains(&self, type_url: &str) -> bool {
        self.converters.contains_key(type_url)
    }

    /// Number of registered converters
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Convert a packed message into its amino JSON form
    pub fn convert(&self, msg: &Any) -> Result<AminoMsg, AminoError> {
        let converter = self
            .converters
            .get(&msg.type_url)
            .ok_or_else(|| AminoError::UnsupportedMessageType(msg.type_url.clone()))?;

        let value = (converter.to_amino)(&msg.value).map_err(|source| AminoError::Decode {
            type_url: msg.type_url.clone(),
            source,
        })?;

        Ok(AminoMsg {
            msg_type: converter.amino_type.to_string(),
            value,
        })
    }
}
