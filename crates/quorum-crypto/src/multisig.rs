//! Multisig descriptor and membership checks

use crate::derive::{address_of, DeriveError};
use crate::keys::PublicKey;
use quorum_types::ChainFamily;
use serde::Deserialize;
use thiserror::Error;

/// Amino JSON tag of the threshold multisig key wrapper
pub const AMINO_MULTISIG_TYPE: &str = "tendermint/PubKeyMultisigThreshold";

#[derive(Error, Debug)]
pub enum MultisigError {
    #[error("malformed multisig key:: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unexpected multisig key type:: {0}")]
    UnexpectedType(String),

    #[error("invalid threshold:: {0}")]
    InvalidThreshold(String),
}

/// Configuration of one multisig account: its member keys, threshold, and
/// the addressing scheme of the chain it lives on.
///
/// Immutable for the lifetime of the multisig; signatures accruing against
/// a transaction never change it.
#[derive(Clone, Debug)]
pub struct MultisigDescriptor {
    /// Ordered member public keys
    pub pubkeys: Vec<PublicKey>,
    /// Number of member signatures required
    pub threshold: u32,
    /// Bech32 prefix of the multisig's chain
    pub prefix: String,
    /// Address-derivation family of the multisig's chain
    pub family: ChainFamily,
}

// Record stores persist the member set as the amino JSON wrapper:
// {"type":"tendermint/PubKeyMultisigThreshold",
//  "value":{"threshold":"2","pubkeys":[{"type":...,"value":...},...]}}
#[derive(Deserialize)]
struct AminoMultisig {
    #[serde(rename = "type")]
    key_type: String,
    value: AminoMultisigValue,
}

#[derive(Deserialize)]
struct AminoMultisigValue {
    threshold: String,
    pubkeys: Vec<PublicKey>,
}

impl MultisigDescriptor {
    pub fn new(
        pubkeys: Vec<PublicKey>,
        threshold: u32,
        prefix: impl Into<String>,
        family: ChainFamily,
    ) -> Self {
        Self {
            pubkeys,
            threshold,
            prefix: prefix.into(),
            family,
        }
    }

    /// Parse the amino JSON wrapper a record store persists for a multisig
    pub fn from_amino_json(
        json: &str,
        prefix: impl Into<String>,
        family: ChainFamily,
    ) -> Result<Self, MultisigError> {
        let wrapper: AminoMultisig = serde_json::from_str(json)?;
        if wrapper.key_type != AMINO_MULTISIG_TYPE {
            return Err(MultisigError::UnexpectedType(wrapper.key_type));
        }
        let threshold = wrapper
            .value
            .threshold
            .parse()
            .map_err(|_| MultisigError::InvalidThreshold(wrapper.value.threshold.clone()))?;

        Ok(Self::new(wrapper.value.pubkeys, threshold, prefix, family))
    }

    /// Bech32 addresses of every member, in member order
    pub fn member_addresses(&self) -> Vec<String> {
        self.pubkeys
            .iter()
            .map(|key| address_of(key, self.family, &self.prefix))
            .collect()
    }

    /// Whether `candidate` is the address of one of the member keys.
    ///
    /// Recomputed on every identity change rather than cached; the active
    /// identity changes far less often than this is cheap to repeat.
    pub fn is_member(&self, candidate: &str) -> bool {
        self.member_addresses().iter().any(|addr| addr == candidate)
    }
}

/// Membership test over raw, not-yet-validated member key bytes
pub fn multisig_has_address(
    member_keys: &[Vec<u8>],
    candidate: &str,
    family: ChainFamily,
    prefix: &str,
) -> Result<bool, DeriveError> {
    for bytes in member_keys {
        let addr = crate::derive::derive_address(bytes, family, prefix)?;
        if addr == candidate {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::test_key;

    fn descriptor(family: ChainFamily) -> MultisigDescriptor {
        MultisigDescriptor::new(
            vec![test_key(1), test_key(2), test_key(3)],
            2,
            "cosmos",
            family,
        )
    }

    #[test]
    fn test_membership_law() {
        // is_member(addr) iff addr equals a derived member address
        let descriptor = descriptor(ChainFamily::Standard);
        for key in &descriptor.pubkeys {
            let addr = address_of(key, ChainFamily::Standard, "cosmos");
            assert!(descriptor.is_member(&addr));
        }

        let foreign = address_of(&test_key(9), ChainFamily::Standard, "cosmos");
        assert!(!descriptor.is_member(&foreign));
    }

    #[test]
    fn test_membership_uses_family_addressing() {
        let descriptor = descriptor(ChainFamily::Injective);
        let member = address_of(&test_key(1), ChainFamily::Injective, "cosmos");
        assert!(member.starts_with("inj1"));
        assert!(descriptor.is_member(&member));

        // The same key's standard-scheme address is not a member address
        let standard = address_of(&test_key(1), ChainFamily::Standard, "inj");
        assert!(!descriptor.is_member(&standard));
    }

    #[test]
    fn test_from_amino_json() {
        let json = format!(
            r#"{{
                "type": "tendermint/PubKeyMultisigThreshold",
                "value": {{
                    "threshold": "2",
                    "pubkeys": [
                        {{"type": "tendermint/PubKeySecp256k1", "value": "{}"}},
                        {{"type": "tendermint/PubKeySecp256k1", "value": "{}"}},
                        {{"type": "tendermint/PubKeySecp256k1", "value": "{}"}}
                    ]
                }}
            }}"#,
            test_key(1).to_base64(),
            test_key(2).to_base64(),
            test_key(3).to_base64(),
        );

        let descriptor =
            MultisigDescriptor::from_amino_json(&json, "cosmos", ChainFamily::Standard).unwrap();
        assert_eq!(descriptor.threshold, 2);
        assert_eq!(descriptor.pubkeys.len(), 3);
        assert_eq!(descriptor.pubkeys[0], test_key(1));
    }

    #[test]
    fn test_from_amino_json_rejects_wrong_wrapper() {
        let json = r#"{"type": "tendermint/PubKeySecp256k1", "value": {"threshold": "1", "pubkeys": []}}"#;
        let err =
            MultisigDescriptor::from_amino_json(json, "cosmos", ChainFamily::Standard).unwrap_err();
        assert!(matches!(err, MultisigError::UnexpectedType(_)));
    }

    #[test]
    fn test_multisig_has_address_raw_bytes() {
        let keys: Vec<Vec<u8>> = (1u8..=3).map(|n| test_key(n).to_bytes()).collect();
        let member = address_of(&test_key(2), ChainFamily::Standard, "cosmos");
        assert!(
            multisig_has_address(&keys, &member, ChainFamily::Standard, "cosmos").unwrap()
        );

        let bad_keys = vec![vec![0xaa; 33]];
        assert!(
            multisig_has_address(&bad_keys, &member, ChainFamily::Standard, "cosmos").is_err()
        );
    }
}
