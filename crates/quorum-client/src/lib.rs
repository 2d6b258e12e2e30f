//! Client library for quorum multisig signing
//!
//! This crate provides the seams to the outside world: wallet credential
//! providers (extension and hardware), the amino signing client factory,
//! the chain LCD query for account sequences, and the HTTP client for the
//! signature record store.

pub mod chain;
pub mod config;
pub mod signing;
pub mod store;
pub mod wallet;

pub use chain::{ChainQueryError, HttpSequenceProvider, SequenceProvider};
pub use config::{ClientConfig, ConfigError};
pub use signing::{SignedPayload, SignerData, SigningClient, SigningError};
pub use store::{HttpSignatureStore, SignatureStore, StoreError};
pub use wallet::{
    AminoSignResponse, CredentialSource, HardwareWallet, OfflineAminoSigner, SignPreferences,
    SignerIdentity, WalletError, WalletExtension, WalletKey,
};
