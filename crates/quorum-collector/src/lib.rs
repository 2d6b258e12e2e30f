//! Signature collection for multisig transactions
//!
//! Two cooperating state machines: the `CredentialResolver` tracks which
//! signer identity is active for the session across its two credential
//! sources, and the `SignatureCollector` drives one identity through
//! membership gating, amino signing, deduplication, and persistence.

pub mod collector;
pub mod notify;
pub mod resolver;

pub use collector::{CollectError, CollectorState, SignatureCollector};
pub use notify::{Notifier, NullNotifier};
pub use resolver::{CredentialResolver, LocalAccountStore, ResolverError, SessionEvent};
