//! Protobuf utilities for Cosmos SDK compatibility
//!
//! Provides the `Any` type and `MessageExt` trait used to carry transaction
//! messages polymorphically between the record store, the amino conversion
//! layer, and the body encoder.

use prost::Message;
use thiserror::Error;

/// Protobuf encoding/decoding errors
#[derive(Error, Debug)]
pub enum ProtobufError {
    /// Encoding failed
    #[error("failed to encode protobuf: {0}")]
    EncodeError(#[from] prost::EncodeError),

    /// Decoding failed
    #[error("failed to decode protobuf: {0}")]
    DecodeError(#[from] prost::DecodeError),
}

/// Result type for protobuf operations
pub type Result<T> = std::result::Result<T, ProtobufError>;

/// Cosmos SDK Any type implementation
///
/// Type URLs use the format: /fully.qualified.protobuf.Name
/// For Cosmos SDK messages, this is typically: /cosmos.bank.v1beta1.MsgSend
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Any {
    /// Type URL uniquely identifying the serialized message type
    #[prost(string, tag = "1")]
    pub type_url: String,

    /// Binary serialization of the protobuf message
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

impl Any {
    /// Create a new Any from a message and type URL
    pub fn from_msg<M: Message>(msg: &M, type_url: impl Into<String>) -> Result<Self> {
        let mut value = Vec::new();
        msg.encode(&mut value)?;

        Ok(Self {
            type_url: type_url.into(),
            value,
        })
    }

    /// Pack a message into an Any with automatic type URL generation
    pub fn pack<M: Message + MessageExt>(msg: &M) -> Result<Self> {
        Self::from_msg(msg, msg.type_url())
    }

    /// Unpack an Any into a specific message type
    pub fn unpack<M: Message + Default>(&self) -> Result<M> {
        M::decode(self.value.as_slice()).map_err(ProtobufError::from)
    }

    /// Check if this Any contains a message of the given type
    pub fn is<M: MessageExt>(&self) -> bool {
        self.type_url == M::TYPE_URL
    }
}

/// Extension trait for messages with type URL support
pub trait MessageExt: Message {
    /// The type URL for this message type
    const TYPE_URL: &'static str;

    /// Get the type URL for this message
    fn type_url(&self) -> &'static str {
        Self::TYPE_URL
    }
}
