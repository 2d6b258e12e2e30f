//! Chain-family-aware account address derivation
//!
//! Standard chains hash the compressed key with sha256 then ripemd160.
//! Ethsecp256k1-style chains (Ethermint, Injective) take the last 20 bytes
//! of the keccak256 of the uncompressed point, and always encode with the
//! family's fixed prefix.

use crate::keys::{KeyError, PublicKey};
use quorum_types::{AccAddress, ChainFamily};
use sha3::{Digest, Keccak256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeriveError {
    #[error("invalid public key:: {0}")]
    InvalidPublicKey(String),
}

impl From<KeyError> for DeriveError {
    fn from(err: KeyError) -> Self {
        DeriveError::InvalidPublicKey(err.to_string())
    }
}

/// Derive the bech32 account address for raw public key bytes.
///
/// Pure and deterministic: identical inputs always yield an identical
/// address. Malformed key bytes fail with `InvalidPublicKey`.
pub fn derive_address(
    pubkey_bytes: &[u8],
    family: ChainFamily,
    prefix: &str,
) -> Result<String, DeriveError> {
    let key = PublicKey::from_bytes(pubkey_bytes)?;
    Ok(address_of(&key, family, prefix))
}

/// Derive the bech32 account address for an already-validated key
pub fn address_of(key: &PublicKey, family: ChainFamily, prefix: &str) -> String {
    let raw = match family {
        ChainFamily::Standard => AccAddress::from_pubkey(&key.to_bytes()),
        ChainFamily::Ethermint | ChainFamily::Injective => eth_address(key),
    };
    // Ethsecp256k1 families carry their own prefix; the supplied one is
    // only meaningful for standard chains.
    let hrp = family.fixed_hrp().unwrap_or(prefix);
    raw.to_bech32(hrp)
}

/// keccak256 of the uncompressed point without the 0x04 tag, last 20 bytes
fn eth_address(key: &PublicKey) -> AccAddress {
    let uncompressed = key.uncompressed_bytes();
    let hash = Keccak256::digest(&uncompressed[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    AccAddress::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::test_key;

    #[test]
    fn test_deterministic() {
        let key = test_key(1);
        let a = address_of(&key, ChainFamily::Standard, "cosmos");
        let b = address_of(&key, ChainFamily::Standard, "cosmos");
        assert_eq!(a, b);
    }

    #[test]
    fn test_injective_over_corpus() {
        // No two distinct keys in the corpus may collide, per family
        for family in [
            ChainFamily::Standard,
            ChainFamily::Ethermint,
            ChainFamily::Injective,
        ] {
            let addrs: Vec<String> = (1u8..=8)
                .map(|n| address_of(&test_key(n), family, "cosmos"))
                .collect();
            for (i, a) in addrs.iter().enumerate() {
                for b in addrs.iter().skip(i + 1) {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_standard_uses_supplied_prefix() {
        let key = test_key(2);
        assert!(address_of(&key, ChainFamily::Standard, "cosmos").starts_with("cosmos1"));
        assert!(address_of(&key, ChainFamily::Standard, "juno").starts_with("juno1"));
    }

    #[test]
    fn test_eth_families_ignore_supplied_prefix() {
        let key = test_key(3);
        assert!(address_of(&key, ChainFamily::Ethermint, "cosmos").starts_with("evmos1"));
        assert!(address_of(&key, ChainFamily::Injective, "cosmos").starts_with("inj1"));
    }

    #[test]
    fn test_eth_and_standard_schemes_diverge() {
        // Same key, same prefix forced: the hash pipelines must differ
        let key = test_key(4);
        let standard = address_of(&key, ChainFamily::Standard, "evmos");
        let eth = address_of(&key, ChainFamily::Ethermint, "evmos");
        assert_ne!(standard, eth);
    }

    #[test]
    fn test_malformed_key_bytes() {
        let err = derive_address(&[0xaa; 33], ChainFamily::Standard, "cosmos").unwrap_err();
        assert!(matches!(err, DeriveError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_raw_bytes_path_matches_key_path() {
        let key = test_key(5);
        let via_bytes =
            derive_address(&key.to_bytes(), ChainFamily::Injective, "cosmos").unwrap();
        let via_key = address_of(&key, ChainFamily::Injective, "cosmos");
        assert_eq!(via_bytes, via_key);
    }
}
