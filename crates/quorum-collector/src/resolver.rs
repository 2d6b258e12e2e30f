//! Credential resolver
//!
//! Tracks the signer identity active for the current session across two
//! independent credential sources: the wallet extension's keystore and the
//! locally persisted hardware-derived account. Session-change events
//! arrive on a channel injected at construction; dropping the resolver
//! drops the subscription.

use crate::notify::Notifier;
use quorum_client::{CredentialSource, SignerIdentity, WalletError, WalletExtension, WalletKey};
use quorum_crypto::PublicKey;
use quorum_log::{debug, warn};
use quorum_types::SignatureRecord;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// A session-change notification from the embedding environment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The extension's keystore changed (account switched, wallet locked)
    KeystoreChanged,
    /// The locally persisted account record changed
    StorageChanged,
}

#[derive(Error, Debug)]
pub enum ResolverError {
    /// The stored account record did not parse as account data
    #[error("failed to get account key")]
    MalformedLocalCredential,

    /// The extension could not report its current key
    #[error("wallet error:: {0}")]
    Wallet(#[from] WalletError),
}

/// Access to the locally persisted account record.
///
/// Local entries represent hardware-wallet-derived accounts cached client
/// side; absence is the signed-out state.
pub trait LocalAccountStore: Send + Sync {
    /// The raw persisted record, if any
    fn read(&self) -> Option<String>;
}

// The persisted record shape: {"bech32Address": ..., "pubkey": {...}}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalAccountRecord {
    bech32_address: String,
    pubkey: PublicKey,
}

/// Resolves and tracks the active signer identity.
///
/// The identity is replaced wholesale on every session change; the
/// has-signed flag is derived from the caller-supplied signature snapshot
/// and recomputed on every change, never cached across identities.
pub struct CredentialResolver {
    extension: Arc<dyn WalletExtension>,
    local: Arc<dyn LocalAccountStore>,
    notifier: Arc<dyn Notifier>,
    chain_id: String,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    signatures: Vec<SignatureRecord>,
    active: Option<SignerIdentity>,
    has_signed: bool,
}

impl CredentialResolver {
    /// Create a resolver and establish the baseline identity with a
    /// synchronous read of the local source.
    ///
    /// A malformed stored record here is surfaced as
    /// `MalformedLocalCredential`; the event-driven path later treats the
    /// same content as signed-out. Both behaviors are deliberate.
    pub fn new(
        extension: Arc<dyn WalletExtension>,
        local: Arc<dyn LocalAccountStore>,
        notifier: Arc<dyn Notifier>,
        chain_id: impl Into<String>,
        events: mpsc::UnboundedReceiver<SessionEvent>,
        current_signatures: Vec<SignatureRecord>,
    ) -> Result<Self, ResolverError> {
        let active = match local.read() {
            None => None,
            Some(raw) => {
                let record: LocalAccountRecord = serde_json::from_str(&raw)
                    .map_err(|_| ResolverError::MalformedLocalCredential)?;
                Some(SignerIdentity::new(
                    WalletKey {
                        bech32_address: record.bech32_address,
                        pubkey: record.pubkey,
                    },
                    CredentialSource::Hardware,
                ))
            }
        };

        let mut resolver = Self {
            extension,
            local,
            notifier,
            chain_id: chain_id.into(),
            events,
            signatures: current_signatures,
            active,
            has_signed: false,
        };
        resolver.recompute_has_signed();
        Ok(resolver)
    }

    /// The identity currently active, if any
    pub fn active(&self) -> Option<&SignerIdentity> {
        self.active.as_ref()
    }

    /// Whether the active identity already signed the current transaction
    pub fn has_signed(&self) -> bool {
        self.has_signed
    }

    /// Replace the signature snapshot and recompute the has-signed flag
    pub fn update_signatures(&mut self, signatures: Vec<SignatureRecord>) {
        self.signatures = signatures;
        self.recompute_has_signed();
    }

    /// Apply one session event.
    ///
    /// Keystore changes re-query the extension and propagate its failures;
    /// storage changes resolve malformed or absent content to signed-out
    /// without raising.
    pub async fn handle_event(&mut self, event: SessionEvent) -> Result<(), ResolverError> {
        match event {
            SessionEvent::KeystoreChanged => {
                let key = self.extension.get_key(&self.chain_id).await?;
                debug!(address = %key.bech32_address, "keystore changed");
                self.active = Some(SignerIdentity::new(key, CredentialSource::Extension));
            }
            SessionEvent::StorageChanged => {
                self.active = match self.local.read() {
                    None => None,
                    Some(raw) => match serde_json::from_str::<LocalAccountRecord>(&raw) {
                        Ok(record) => Some(SignerIdentity::new(
                            WalletKey {
                                bech32_address: record.bech32_address,
                                pubkey: record.pubkey,
                            },
                            CredentialSource::Hardware,
                        )),
                        Err(err) => {
                            warn!(error = %err, "stored account did not parse, signing out");
                            None
                        }
                    },
                };
            }
        }
        self.recompute_has_signed();
        Ok(())
    }

    /// Drive the subscription until it closes, surfacing event failures
    /// through the notifier.
    pub async fn run(&mut self) {
        while let Some(event) = self.events.recv().await {
            if let Err(err) = self.handle_event(event).await {
                self.notifier.error(&err.to_string());
            }
        }
    }

    fn recompute_has_signed(&mut self) {
        self.has_signed = match &self.active {
            Some(identity) => self
                .signatures
                .iter()
                .any(|sig| sig.address == identity.address),
            None => false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NullNotifier;
    use async_trait::async_trait;
    use quorum_client::{OfflineAminoSigner, SignPreferences};
    use std::sync::Mutex;

    fn test_key(scalar: u8) -> PublicKey {
        use k256::ecdsa::SigningKey;
        let signing = SigningKey::from_slice(&[scalar; 32]).unwrap();
        PublicKey::from_bytes(signing.verifying_key().to_encoded_point(true).as_bytes()).unwrap()
    }

    struct FakeExtension {
        key: Option<WalletKey>,
    }

    #[async_trait]
    impl WalletExtension for FakeExtension {
        async fn get_key(&self, _chain_id: &str) -> Result<WalletKey, WalletError> {
            self.key.clone().ok_or_else(|| {
                WalletError::CredentialUnavailable("extension locked".to_string())
            })
        }

        async fn amino_signer(
            &self,
            _chain_id: &str,
            _prefs: SignPreferences,
        ) -> Result<Box<dyn OfflineAminoSigner>, WalletError> {
            Err(WalletError::Backend("not used in resolver tests".to_string()))
        }
    }

    struct MemoryAccountStore {
        raw: Mutex<Option<String>>,
    }

    impl MemoryAccountStore {
        fn new(raw: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                raw: Mutex::new(raw.map(str::to_string)),
            })
        }

        fn set(&self, raw: Option<&str>) {
            *self.raw.lock().unwrap() = raw.map(str::to_string);
        }
    }

    impl LocalAccountStore for MemoryAccountStore {
        fn read(&self) -> Option<String> {
            self.raw.lock().unwrap().clone()
        }
    }

    fn account_json(address: &str, key: &PublicKey) -> String {
        format!(
            r#"{{"bech32Address": "{}", "pubkey": {}}}"#,
            address,
            serde_json::to_string(key).unwrap()
        )
    }

    fn record_for(address: &str) -> SignatureRecord {
        SignatureRecord {
            body_bytes: "Cg==".to_string(),
            signature: "sig".to_string(),
            address: address.to_string(),
            account_number: "1".to_string(),
            sequence: "0".to_string(),
        }
    }

    fn resolver_with(
        extension_key: Option<WalletKey>,
        store: Arc<MemoryAccountStore>,
        signatures: Vec<SignatureRecord>,
    ) -> Result<(CredentialResolver, mpsc::UnboundedSender<SessionEvent>), ResolverError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let resolver = CredentialResolver::new(
            Arc::new(FakeExtension { key: extension_key }),
            store,
            Arc::new(NullNotifier),
            "cosmoshub-4",
            receiver,
            signatures,
        )?;
        Ok((resolver, sender))
    }

    #[tokio::test]
    async fn test_mount_reads_local_account() {
        let key = test_key(1);
        let store = MemoryAccountStore::new(Some(&account_json("cosmos1hardware", &key)));
        let (resolver, _sender) = resolver_with(None, store, vec![]).unwrap();

        let identity = resolver.active().unwrap();
        assert_eq!(identity.address, "cosmos1hardware");
        assert_eq!(identity.source, CredentialSource::Hardware);
        assert!(!resolver.has_signed());
    }

    #[tokio::test]
    async fn test_mount_absent_record_is_signed_out() {
        let store = MemoryAccountStore::new(None);
        let (resolver, _sender) = resolver_with(None, store, vec![]).unwrap();
        assert!(resolver.active().is_none());
    }

    #[tokio::test]
    async fn test_mount_malformed_record_errors() {
        let store = MemoryAccountStore::new(Some("not json at all"));
        let err = match resolver_with(None, store, vec![]) {
            Err(err) => err,
            Ok(_) => panic!("expected malformed credential error"),
        };
        assert_eq!(err.to_string(), "failed to get account key");
    }

    #[tokio::test]
    async fn test_storage_event_with_malformed_record_signs_out() {
        // The same content that errors at mount resolves to signed-out on
        // the event path; the asymmetry is intentional and kept under test
        let key = test_key(1);
        let store = MemoryAccountStore::new(Some(&account_json("cosmos1hardware", &key)));
        let (mut resolver, _sender) = resolver_with(None, store.clone(), vec![]).unwrap();
        assert!(resolver.active().is_some());

        store.set(Some("not json at all"));
        resolver
            .handle_event(SessionEvent::StorageChanged)
            .await
            .unwrap();
        assert!(resolver.active().is_none());
        assert!(!resolver.has_signed());
    }

    #[tokio::test]
    async fn test_keystore_event_switches_to_extension_identity() {
        let key = test_key(2);
        let wallet_key = WalletKey {
            bech32_address: "cosmos1extension".to_string(),
            pubkey: key,
        };
        let store = MemoryAccountStore::new(None);
        let (mut resolver, _sender) =
            resolver_with(Some(wallet_key), store, vec![record_for("cosmos1extension")])
                .unwrap();
        assert!(!resolver.has_signed());

        resolver
            .handle_event(SessionEvent::KeystoreChanged)
            .await
            .unwrap();
        let identity = resolver.active().unwrap();
        assert_eq!(identity.address, "cosmos1extension");
        assert_eq!(identity.source, CredentialSource::Extension);
        assert!(resolver.has_signed());
    }

    #[tokio::test]
    async fn test_keystore_event_propagates_extension_failure() {
        let store = MemoryAccountStore::new(None);
        let (mut resolver, _sender) = resolver_with(None, store, vec![]).unwrap();

        let err = resolver
            .handle_event(SessionEvent::KeystoreChanged)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolverError::Wallet(_)));
    }

    #[tokio::test]
    async fn test_update_signatures_recomputes() {
        let key = test_key(3);
        let store = MemoryAccountStore::new(Some(&account_json("cosmos1hardware", &key)));
        let (mut resolver, _sender) = resolver_with(None, store, vec![]).unwrap();
        assert!(!resolver.has_signed());

        resolver.update_signatures(vec![record_for("cosmos1hardware")]);
        assert!(resolver.has_signed());

        resolver.update_signatures(vec![record_for("cosmos1someoneelse")]);
        assert!(!resolver.has_signed());
    }

    #[tokio::test]
    async fn test_run_stops_when_subscription_closes() {
        let key = test_key(4);
        let store = MemoryAccountStore::new(None);
        let (mut resolver, sender) = resolver_with(
            Some(WalletKey {
                bech32_address: "cosmos1extension".to_string(),
                pubkey: key,
            }),
            store,
            vec![],
        )
        .unwrap();

        sender.send(SessionEvent::KeystoreChanged).unwrap();
        drop(sender);

        resolver.run().await;
        assert_eq!(resolver.active().unwrap().address, "cosmos1extension");
    }
}

