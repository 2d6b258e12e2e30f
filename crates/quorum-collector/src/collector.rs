//! Signature collector state machine
//!
//! Drives one signer identity through membership gating, offline amino
//! signing with the multisig account's fresh sequence, signature
//! deduplication, and persistence to the record store.

use crate::notify::Notifier;
use base64::{engine::general_purpose, Engine as _};
use quorum_client::{
    ChainQueryError, CredentialSource, HardwareWallet, SequenceProvider, SignPreferences,
    SignatureStore, SignedPayload, SignerData, SignerIdentity, SigningClient, SigningError,
    StoreError, WalletError, WalletExtension,
};
use quorum_crypto::MultisigDescriptor;
use quorum_log::{debug, info};
use quorum_types::tx::RecordError;
use quorum_types::{ChainProfile, PendingTransaction, SignatureRecord};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    /// The active identity is not a member of the multisig
    #[error("your wallet account might be different from the one that created the multisig, switch to an appropriate account")]
    MembershipDenied,

    /// The produced signature already exists in the signature set
    #[error("this account has already signed")]
    DuplicateSignature,

    /// Deletion attempted by a non-member
    #[error("not a component account")]
    NotComponentAccount,

    /// The signer returned an empty signature set
    #[error("signer returned no signature")]
    MissingSignature,

    /// Wallet failure while obtaining a signer
    #[error("wallet error:: {0}")]
    Wallet(#[from] WalletError),

    /// Signing failure
    #[error("signing failed:: {0}")]
    Signing(#[from] SigningError),

    /// Chain query failure
    #[error("chain query failed:: {0}")]
    ChainQuery(#[from] ChainQueryError),

    /// Record store failure
    #[error("record store failed:: {0}")]
    Store(#[from] StoreError),

    /// The fetched account state did not parse
    #[error("invalid account state:: {0}")]
    Record(#[from] RecordError),
}

/// Collector states. `Blocked` absorbs until the identity changes; every
/// failure during `Signing`/`Submitting` reverts to the prior interactive
/// state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Blocked,
    Resolving,
    Signing,
    Submitting,
    Signed,
}

/// Collects signatures for one pending transaction.
///
/// The signature list held here is a snapshot supplied by the caller; the
/// record store owns the persisted set.
pub struct SignatureCollector {
    chain: ChainProfile,
    multisig: MultisigDescriptor,
    transaction_id: String,
    tx: PendingTransaction,
    signatures: Vec<SignatureRecord>,
    extension: Arc<dyn WalletExtension>,
    hardware: Arc<dyn HardwareWallet>,
    store: Arc<dyn SignatureStore>,
    sequence_provider: Arc<dyn SequenceProvider>,
    notifier: Arc<dyn Notifier>,
    state: CollectorState,
}

impl SignatureCollector {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain: ChainProfile,
        multisig: MultisigDescriptor,
        transaction_id: impl Into<String>,
        tx: PendingTransaction,
        current_signatures: Vec<SignatureRecord>,
        extension: Arc<dyn WalletExtension>,
        hardware: Arc<dyn HardwareWallet>,
        store: Arc<dyn SignatureStore>,
        sequence_provider: Arc<dyn SequenceProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            chain,
            multisig,
            transaction_id: transaction_id.into(),
            tx,
            signatures: current_signatures,
            extension,
            hardware,
            store,
            sequence_provider,
            notifier,
            state: CollectorState::Idle,
        }
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    /// The local signature snapshot
    pub fn signatures(&self) -> &[SignatureRecord] {
        &self.signatures
    }

    /// Replace the signature snapshot supplied by the caller
    pub fn update_signatures(&mut self, signatures: Vec<SignatureRecord>) {
        self.signatures = signatures;
    }

    /// Re-evaluate the entry guard for the (possibly new) identity.
    ///
    /// A non-member identity blocks the collector and no sign action is
    /// offered; a member identity releases a previous block.
    pub fn refresh_gate(&mut self, identity: Option<&SignerIdentity>) {
        match identity {
            Some(identity) if !self.multisig.is_member(&identity.address) => {
                self.state = CollectorState::Blocked;
            }
            _ => {
                if self.state == CollectorState::Blocked {
                    self.state = CollectorState::Idle;
                }
            }
        }
    }

    /// User-facing explanation while blocked, absent otherwise
    pub fn blocked_reason(&self) -> Option<&'static str> {
        match self.state {
            CollectorState::Blocked => Some(
                "your wallet account might be different from the one that created the multisig, \
                 switch to an appropriate account",
            ),
            _ => None,
        }
    }

    /// Produce, deduplicate, and persist a signature for the identity.
    ///
    /// The progress indicator opened here is dismissed by a single cleanup
    /// step on every exit, and the outcome is surfaced verbatim.
    pub async fn sign_transaction(
        &mut self,
        identity: &SignerIdentity,
    ) -> Result<SignatureRecord, CollectError> {
        self.notifier.loading("creating signature");
        let prior = self.state;
        let result = self.sign_inner(identity).await;

        self.notifier.loading_done();
        match &result {
            Ok(record) => {
                info!(address = %record.address, "sign successful");
                self.notifier.success("sign successful");
            }
            Err(err) => {
                if self.state != CollectorState::Blocked {
                    self.state = prior;
                }
                self.notifier.error(&err.to_string());
            }
        }
        result
    }

    async fn sign_inner(
        &mut self,
        identity: &SignerIdentity,
    ) -> Result<SignatureRecord, CollectError> {
        if !self.multisig.is_member(&identity.address) {
            self.state = CollectorState::Blocked;
            return Err(CollectError::MembershipDenied);
        }

        self.state = CollectorState::Resolving;
        let signer = match identity.source {
            CredentialSource::Extension => {
                self.extension
                    .amino_signer(&self.chain.chain_id, SignPreferences::multisig())
                    .await?
            }
            CredentialSource::Hardware => self.hardware.amino_signer(&self.chain.prefix).await?,
        };

        self.state = CollectorState::Signing;

        // The multisig account's numbers, fetched fresh for this attempt;
        // every co-signer signs with the same values
        let account = self
            .sequence_provider
            .get_sequence(&self.tx.multisig_address)
            .await?;
        let signer_data = SignerData {
            account_number: account.account_number_u64()?,
            sequence: account.sequence_u64()?,
            chain_id: self.chain.chain_id.clone(),
        };
        debug!(
            sequence = signer_data.sequence,
            account_number = signer_data.account_number,
            "fetched multisig account state"
        );

        let client = SigningClient::new(&self.tx.type_urls(), &self.chain.chain_id, signer);
        let payload: SignedPayload = client
            .sign(
                &identity.address,
                &self.tx.msgs,
                &self.tx.fee,
                &self.tx.memo,
                &signer_data,
            )
            .await?;

        let signature = payload
            .signatures
            .first()
            .ok_or(CollectError::MissingSignature)?;
        let encoded_signature = general_purpose::STANDARD.encode(signature);

        // An exact signature match means this credential already signed at
        // this sequence; nothing is persisted
        if self
            .signatures
            .iter()
            .any(|existing| existing.signature == encoded_signature)
        {
            return Err(CollectError::DuplicateSignature);
        }

        self.state = CollectorState::Submitting;
        let record = SignatureRecord {
            body_bytes: general_purpose::STANDARD.encode(&payload.body_bytes),
            signature: encoded_signature,
            address: identity.address.clone(),
            account_number: account.account_number.clone(),
            sequence: account.sequence.clone(),
        };
        let stored = self.store.create(&self.transaction_id, &record).await?;

        self.signatures.push(stored.clone());
        self.state = CollectorState::Signed;
        Ok(stored)
    }

    /// Remove a signature from the pending transaction.
    ///
    /// Gated by the same membership check as signing; only member
    /// identities may delete.
    pub async fn remove_signature(
        &mut self,
        identity: &SignerIdentity,
        address: &str,
    ) -> Result<(), CollectError> {
        self.notifier.loading("deleting signature");
        let result = self.remove_inner(identity, address).await;

        self.notifier.loading_done();
        match &result {
            Ok(()) => self.notifier.success("signature deleted"),
            Err(err) => self.notifier.error(&err.to_string()),
        }
        result
    }

    async fn remove_inner(
        &mut self,
        identity: &SignerIdentity,
        address: &str,
    ) -> Result<(), CollectError> {
        if !self.multisig.is_member(&identity.address) {
            return Err(CollectError::NotComponentAccount);
        }

        self.store.delete(&self.transaction_id, address).await?;
        self.signatures.retain(|sig| sig.address != address);
        Ok(())
    }
}
