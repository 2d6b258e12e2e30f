//! Public key representation

use base64::{engine::general_purpose, Engine as _};
use k256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Amino JSON tag for secp256k1 public keys, as stored by record stores
pub const AMINO_SECP256K1_TYPE: &str = "tendermint/PubKeySecp256k1";

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("invalid public key:: {0}")]
    InvalidPublicKey(String),

    #[error("invalid base64 key encoding:: {0}")]
    InvalidEncoding(String),

    #[error("unknown public key type:: {0}")]
    UnknownKeyType(String),
}

/// A secp256k1 public key.
///
/// All multisig member keys are points on this curve; the chain family
/// decides how an account address is derived from one, not the key itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parse from SEC1 bytes (compressed or uncompressed)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
        Ok(Self(key))
    }

    /// Parse from a base64-encoded SEC1 key
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Compressed SEC1 bytes (33 bytes)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Uncompressed SEC1 bytes (65 bytes, leading 0x04 tag)
    pub fn uncompressed_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(false).as_bytes().to_vec()
    }

    /// Base64 of the compressed key
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.to_bytes())
    }
}

// Keys travel as {"type": ..., "value": base64} pairs. The amino tag is
// emitted; the protobuf type URLs are accepted alongside it on read since
// ethsecp256k1 keys share the curve.
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct PublicKeyData {
            #[serde(rename = "type")]
            key_type: String,
            value: String,
        }

        let data = PublicKeyData {
            key_type: AMINO_SECP256K1_TYPE.to_string(),
            value: self.to_base64(),
        };

        data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PublicKeyData {
            #[serde(rename = "type")]
            key_type: String,
            value: String,
        }

        let data = PublicKeyData::deserialize(deserializer)?;
        match data.key_type.as_str() {
            AMINO_SECP256K1_TYPE
            | "/cosmos.crypto.secp256k1.PubKey"
            | "/ethermint.crypto.v1.ethsecp256k1.PubKey"
            | "/injective.crypto.v1beta1.ethsecp256k1.PubKey" => {
                PublicKey::from_base64(&data.value).map_err(serde::de::Error::custom)
            }
            other => Err(serde::de::Error::custom(KeyError::UnknownKeyType(
                other.to_string(),
            ))),
        }
    }
}

/// Deterministic key material for tests: the public key of the scalar
/// `[n; 32]`.
#[cfg(test)]
pub(crate) fn test_key(scalar: u8) -> PublicKey {
    use k256::ecdsa::SigningKey;
    let signing = SigningKey::from_slice(&[scalar; 32]).unwrap();
    PublicKey::from_bytes(signing.verifying_key().to_encoded_point(true).as_bytes()).unwrap()
}
