//! Message definitions for amino-signable transactions
//!
//! Each module declares the protobuf shape of a message family and its
//! amino JSON conversion. The registration tables in `registry` reference
//! these pairs.

pub mod bank;
pub mod distribution;
pub mod gov;
pub mod staking;
pub mod stride;

use serde_json::{json, Value};

/// Protobuf representation of a coin amount
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct CoinProto {
    /// The denomination
    #[prost(string, tag = "1")]
    pub denom: String,
    /// The amount as decimal string
    #[prost(string, tag = "2")]
    pub amount: String,
}

/// Amino JSON form of a coin
pub(crate) fn coin_to_amino(coin: &CoinProto) -> Value {
    json!({
        "denom": coin.denom,
        "amount": coin.amount,
    })
}
