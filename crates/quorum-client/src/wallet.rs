//! Wallet credential provider seams
//!
//! Two credential sources exist: a browser-extension-style key provider
//! and a hardware device. Both ultimately yield an `OfflineAminoSigner`;
//! the extension additionally reports the current key and accepts signing
//! preferences, the hardware signer is scoped to a bech32 prefix.

use async_trait::async_trait;
use quorum_amino::StdSignDoc;
use quorum_crypto::PublicKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    /// No wallet is reachable for the requested chain
    #[error("no wallet credential available:: {0}")]
    CredentialUnavailable(String),

    /// The user rejected the request at the wallet prompt
    #[error("signing rejected:: {0}")]
    Rejected(String),

    /// Provider-internal failure
    #[error("wallet failure:: {0}")]
    Backend(String),
}

/// Where the active credential came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    Extension,
    Hardware,
}

/// The key a wallet reports for a chain
#[derive(Clone, Debug, PartialEq)]
pub struct WalletKey {
    /// Bech32 account address
    pub bech32_address: String,
    /// Compressed secp256k1 public key
    pub pubkey: PublicKey,
}

/// The signer identity active for the current session.
///
/// Replaced wholesale whenever the underlying credential source reports a
/// change; never mutated field-by-field.
#[derive(Clone, Debug, PartialEq)]
pub struct SignerIdentity {
    /// Bech32 account address
    pub address: String,
    /// Compressed secp256k1 public key
    pub pubkey: PublicKey,
    /// Which provider produced this identity
    pub source: CredentialSource,
}

impl SignerIdentity {
    pub fn new(key: WalletKey, source: CredentialSource) -> Self {
        Self {
            address: key.bech32_address,
            pubkey: key.pubkey,
            source,
        }
    }
}

/// Extension signing preferences.
///
/// Multisig co-signers are not necessarily funded and must not edit the
/// shared memo or fee, so all three switches are set on the signing path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignPreferences {
    pub prefer_no_set_memo: bool,
    pub prefer_no_set_fee: bool,
    pub disable_balance_check: bool,
}

impl SignPreferences {
    /// Preferences for multisig co-signing
    pub fn multisig() -> Self {
        Self {
            prefer_no_set_memo: true,
            prefer_no_set_fee: true,
            disable_balance_check: true,
        }
    }
}

/// Response from an amino signer: the document as signed plus the raw
/// signature bytes
#[derive(Clone, Debug, PartialEq)]
pub struct AminoSignResponse {
    /// The document the wallet signed (preferences keep it identical to
    /// the request)
    pub signed: StdSignDoc,
    /// Raw signature bytes
    pub signature: Vec<u8>,
}

/// A credential source able to sign an amino document without network
/// access. Calls may prompt the user and wait indefinitely.
#[async_trait]
pub trait OfflineAminoSigner: Send + Sync {
    async fn sign_amino(
        &self,
        signer_address: &str,
        sign_doc: &StdSignDoc,
    ) -> Result<AminoSignResponse, WalletError>;
}

/// Browser-extension-style key provider
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// The key currently selected in the extension for the chain
    async fn get_key(&self, chain_id: &str) -> Result<WalletKey, WalletError>;

    /// An amino-only offline signer for the chain
    async fn amino_signer(
        &self,
        chain_id: &str,
        prefs: SignPreferences,
    ) -> Result<Box<dyn OfflineAminoSigner>, WalletError>;
}

/// Hardware-device-backed key provider. Device interaction can take tens
/// of seconds; no timeout is enforced here, cancellation is user-driven.
#[async_trait]
pub trait HardwareWallet: Send + Sync {
    /// A device-backed amino signer scoped to the chain's bech32 prefix
    async fn amino_signer(&self, prefix: &str) -> Result<Box<dyn OfflineAminoSigner>, WalletError>;
}
