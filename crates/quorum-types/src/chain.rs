//! Chain configuration types
//!
//! A `ChainProfile` is the immutable per-chain configuration the rest of
//! the workspace reads. The address-derivation scheme is declared once as a
//! `ChainFamily` when the profile is loaded; use sites branch on the enum,
//! never on chain-id strings.

use serde::{Deserialize, Serialize};

/// Address-derivation family of a chain.
///
/// `Ethermint` and `Injective` are ethsecp256k1-style: their account
/// addressing is keccak-based and their bech32 prefix is fixed by the
/// family, not by the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Standard,
    Ethermint,
    Injective,
}

impl ChainFamily {
    /// Fixed bech32 prefix for ethsecp256k1-style families, `None` for
    /// standard chains (which use the profile's prefix).
    pub fn fixed_hrp(&self) -> Option<&'static str> {
        match self {
            ChainFamily::Standard => None,
            ChainFamily::Ethermint => Some("evmos"),
            ChainFamily::Injective => Some("inj"),
        }
    }

    /// Protobuf type URL of the family's public key type
    pub fn pubkey_type_url(&self) -> &'static str {
        match self {
            ChainFamily::Standard => "/cosmos.crypto.secp256k1.PubKey",
            ChainFamily::Ethermint => "/ethermint.crypto.v1.ethsecp256k1.PubKey",
            ChainFamily::Injective => "/injective.crypto.v1beta1.ethsecp256k1.PubKey",
        }
    }
}

impl Default for ChainFamily {
    fn default() -> Self {
        ChainFamily::Standard
    }
}

/// Immutable per-chain configuration, sourced externally
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainProfile {
    /// Chain identifier (e.g. "cosmoshub-4")
    pub chain_id: String,
    /// Bech32 account prefix (e.g. "cosmos")
    pub prefix: String,
    /// Tendermint RPC endpoint
    pub rpc: String,
    /// LCD/REST API endpoint
    pub api: String,
    /// Base denomination (e.g. "uatom")
    pub denom: String,
    /// Display denomination (e.g. "ATOM")
    pub display_denom: String,
    /// Block-explorer transaction URL template; the tx hash is appended
    pub explorer_tx_url: String,
    /// Address-derivation family, resolved at configuration load
    #[serde(default)]
    pub family: ChainFamily,
}
