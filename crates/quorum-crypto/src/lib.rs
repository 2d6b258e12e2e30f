//! Cryptographic primitives for quorum
//!
//! This crate provides the public key wrapper, chain-family-aware address
//! derivation, and multisig membership checks, using well-audited
//! implementations from the RustCrypto project.

pub mod derive;
pub mod keys;
pub mod multisig;

pub use derive::{derive_address, DeriveError};
pub use keys::{KeyError, PublicKey};
pub use multisig::{MultisigDescriptor, MultisigError};
