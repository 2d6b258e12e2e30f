//! Custom amino signing client
//!
//! Composes the amino converter registry with an offline signer into a
//! client that signs a pending transaction's messages the way legacy
//! signers require, while emitting the protobuf body bytes every co-signer
//! must reproduce bit-for-bit.

use crate::wallet::{OfflineAminoSigner, WalletError};
use quorum_amino::{encode_body, AminoError, AminoRegistry, StdFee, StdSignDoc};
use quorum_log::debug;
use quorum_types::protobuf::ProtobufError;
use quorum_types::{Any, Fee};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigningError {
    /// Amino conversion failed (unsupported type or corrupt payload)
    #[error("amino conversion failed:: {0}")]
    Amino(#[from] AminoError),

    /// The wallet refused or failed to sign
    #[error("wallet signing failed:: {0}")]
    Wallet(#[from] WalletError),

    /// Body encoding failed
    #[error("failed to encode transaction body:: {0}")]
    Body(#[from] ProtobufError),
}

/// Account state a signature commits to.
///
/// Obtained fresh immediately before signing; a multisig transaction is
/// signed with the multisig account's numbers, shared by every co-signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerData {
    pub account_number: u64,
    pub sequence: u64,
    pub chain_id: String,
}

/// Result of a successful sign
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedPayload {
    /// Canonical protobuf body bytes
    pub body_bytes: Vec<u8>,
    /// One signature per signer (a single co-signer here)
    pub signatures: Vec<Vec<u8>>,
}

/// An amino-aware signing client bound to one offline signer.
pub struct SigningClient {
    registry: AminoRegistry,
    signer: Box<dyn OfflineAminoSigner>,
}

impl SigningClient {
    /// Build a client for exactly the message types of one transaction,
    /// with converters resolved for the signer's chain.
    ///
    /// Performs no I/O beyond what the offline signer does internally.
    pub fn new<S: AsRef<str>>(
        type_urls: &[S],
        chain_id: &str,
        signer: Box<dyn OfflineAminoSigner>,
    ) -> Self {
        let registry = AminoRegistry::for_transaction(type_urls, chain_id);
        debug!(
            chain_id = %chain_id,
            converters = registry.len(),
            "built amino registry for transaction"
        );
        Self { registry, signer }
    }

    /// Sign the messages with the bound offline signer.
    ///
    /// The sign doc carries `signer_data`'s account number and sequence;
    /// the body bytes are encoded from the request messages and memo so
    /// every co-signer produces identical bytes.
    pub async fn sign(
        &self,
        signer_address: &str,
        messages: &[Any],
        fee: &Fee,
        memo: &str,
        signer_data: &SignerData,
    ) -> Result<SignedPayload, SigningError> {
        let amino_msgs = messages
            .iter()
            .map(|msg| self.registry.convert(msg))
            .collect::<Result<Vec<_>, _>>()?;

        let sign_doc = StdSignDoc {
            account_number: signer_data.account_number.to_string(),
            chain_id: signer_data.chain_id.clone(),
            fee: StdFee::from(fee),
            memo: memo.to_string(),
            msgs: amino_msgs,
            sequence: signer_data.sequence.to_string(),
        };

        let response = self.signer.sign_amino(signer_address, &sign_doc).await?;
        let body_bytes = encode_body(messages, memo)?;

        Ok(SignedPayload {
            body_bytes,
            signatures: vec![response.signature],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::AminoSignResponse;
    use async_trait::async_trait;
    use prost::Message;
    use quorum_amino::msgs::{bank::MsgSend, CoinProto};
    use quorum_types::Coin;
    use sha2::{Digest, Sha256};
    use std::sync::{Arc, Mutex};

    /// Deterministic fake signer: signature = sha256(sign bytes); records
    /// the last document it was asked to sign.
    struct FakeSigner {
        last_doc: Arc<Mutex<Option<StdSignDoc>>>,
    }

    impl FakeSigner {
        fn new() -> (Self, Arc<Mutex<Option<StdSignDoc>>>) {
            let last_doc = Arc::new(Mutex::new(None));
            (
                Self {
                    last_doc: last_doc.clone(),
                },
                last_doc,
            )
        }
    }

    #[async_trait]
    impl OfflineAminoSigner for FakeSigner {
        async fn sign_amino(
            &self,
            _signer_address: &str,
            sign_doc: &StdSignDoc,
        ) -> Result<AminoSignResponse, WalletError> {
            *self.last_doc.lock().unwrap() = Some(sign_doc.clone());
            Ok(AminoSignResponse {
                signed: sign_doc.clone(),
                signature: Sha256::digest(sign_doc.sign_bytes()).to_vec(),
            })
        }
    }

    fn packed_send() -> Any {
        let msg = MsgSend {
            from_address: "cosmos1multisig".to_string(),
            to_address: "cosmos1to".to_string(),
            amount: vec![CoinProto {
                denom: "uatom".to_string(),
                amount: "100".to_string(),
            }],
        };
        let mut value = Vec::new();
        msg.encode(&mut value).unwrap();
        Any {
            type_url: "/cosmos.bank.v1beta1.MsgSend".to_string(),
            value,
        }
    }

    fn fee() -> Fee {
        Fee {
            amount: vec![Coin::new("uatom", "2000")],
            gas: "200000".to_string(),
        }
    }

    fn signer_data() -> SignerData {
        SignerData {
            account_number: 5213,
            sequence: 11,
            chain_id: "cosmoshub-4".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_produces_body_and_signature() {
        let msgs = vec![packed_send()];
        let (signer, _) = FakeSigner::new();
        let client = SigningClient::new(
            &["/cosmos.bank.v1beta1.MsgSend"],
            "cosmoshub-4",
            Box::new(signer),
        );

        let payload = client
            .sign("cosmos1signer", &msgs, &fee(), "", &signer_data())
            .await
            .unwrap();

        assert_eq!(payload.signatures.len(), 1);
        assert!(!payload.body_bytes.is_empty());
        assert_eq!(payload.body_bytes, encode_body(&msgs, "").unwrap());
    }

    #[tokio::test]
    async fn test_sign_doc_carries_multisig_account_state() {
        let (signer, last_doc) = FakeSigner::new();
        let client = SigningClient::new(
            &["/cosmos.bank.v1beta1.MsgSend"],
            "cosmoshub-4",
            Box::new(signer),
        );

        client
            .sign("cosmos1signer", &[packed_send()], &fee(), "memo", &signer_data())
            .await
            .unwrap();

        let doc = last_doc.lock().unwrap().clone().unwrap();
        assert_eq!(doc.account_number, "5213");
        assert_eq!(doc.sequence, "11");
        assert_eq!(doc.chain_id, "cosmoshub-4");
        assert_eq!(doc.memo, "memo");
        assert_eq!(doc.msgs[0].msg_type, "cosmos-sdk/MsgSend");
    }

    #[tokio::test]
    async fn test_sign_unsupported_type() {
        let (signer, _) = FakeSigner::new();
        let client = SigningClient::new(
            &["/osmosis.gamm.v1beta1.MsgSwapExactAmountIn"],
            "osmosis-1",
            Box::new(signer),
        );

        let unknown = Any {
            type_url: "/osmosis.gamm.v1beta1.MsgSwapExactAmountIn".to_string(),
            value: vec![],
        };
        let err = client
            .sign("osmo1signer", &[unknown], &fee(), "", &signer_data())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SigningError::Amino(AminoError::UnsupportedMessageType(_))
        ));
    }

    #[tokio::test]
    async fn test_same_inputs_same_signature() {
        // Signing twice without a sequence change must yield identical
        // encoded signatures
        let msgs = vec![packed_send()];
        let (signer, _) = FakeSigner::new();
        let client = SigningClient::new(
            &["/cosmos.bank.v1beta1.MsgSend"],
            "cosmoshub-4",
            Box::new(signer),
        );

        let first = client
            .sign("cosmos1signer", &msgs, &fee(), "", &signer_data())
            .await
            .unwrap();
        let second = client
            .sign("cosmos1signer", &msgs, &fee(), "", &signer_data())
            .await
            .unwrap();
        assert_eq!(first.signatures, second.signatures);
    }
}
