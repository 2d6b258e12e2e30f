//! Transaction body encoding
//!
//! Every co-signer must produce byte-identical body bytes for their
//! signatures to combine; the body is therefore always encoded from the
//! pending transaction's own messages and memo.

use quorum_types::protobuf::{Any, ProtobufError};
use prost::Message;

/// Protobuf representation of a transaction body
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxBodyProto {
    /// Messages in the transaction
    #[prost(message, repeated, tag = "1")]
    pub messages: Vec<Any>,
    /// Transaction memo
    #[prost(string, tag = "2")]
    pub memo: String,
    /// Timeout height for the transaction
    #[prost(uint64, tag = "3")]
    pub timeout_height: u64,
}

/// Encode the canonical body bytes for a set of messages and a memo
pub fn encode_body(messages: &[Any], memo: &str) -> Result<Vec<u8>, ProtobufError> {
    let body = TxBodyProto {
        messages: messages.to_vec(),
        memo: memo.to_string(),
        timeout_height: 0,
    };
    let mut buf = Vec::new();
    body.encode(&mut buf)?;
    Ok(buf)
}
