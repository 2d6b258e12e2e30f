//! Signature record store client
//!
//! The record store owns persisted signatures; this client exchanges them
//! over HTTP. The store's signature list is append-only from the
//! collector's perspective.

use async_trait::async_trait;
use quorum_log::{debug, info};
use quorum_types::SignatureRecord;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request error
    #[error("http request failed:: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("invalid url:: {0}")]
    Url(#[from] url::ParseError),

    /// Response missing or malformed
    #[error("invalid response:: {0}")]
    InvalidResponse(String),
}

/// The signature persistence seam
#[async_trait]
pub trait SignatureStore: Send + Sync {
    /// All signatures currently recorded for a transaction
    async fn list(&self, transaction_id: &str) -> Result<Vec<SignatureRecord>, StoreError>;

    /// Persist a new signature; the stored record is returned and replaces
    /// local state
    async fn create(
        &self,
        transaction_id: &str,
        record: &SignatureRecord,
    ) -> Result<SignatureRecord, StoreError>;

    /// Remove a signer's signature from a pending transaction
    async fn delete(&self, transaction_id: &str, address: &str) -> Result<(), StoreError>;
}

/// HTTP record store client
pub struct HttpSignatureStore {
    client: reqwest::Client,
    base: Url,
}

impl HttpSignatureStore {
    pub fn new(base: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: reqwest::Client::new(),
            base: Url::parse(base)?,
        })
    }

    fn signature_url(&self, transaction_id: &str) -> String {
        format!(
            "{}/transaction/{}/signature",
            self.base.as_str().trim_end_matches('/'),
            transaction_id
        )
    }
}

#[async_trait]
impl SignatureStore for HttpSignatureStore {
    async fn list(&self, transaction_id: &str) -> Result<Vec<SignatureRecord>, StoreError> {
        let records: Vec<SignatureRecord> = self
            .client
            .get(self.signature_url(transaction_id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            transaction_id = %transaction_id,
            count = records.len(),
            "fetched signature list"
        );
        Ok(records)
    }

    async fn create(
        &self,
        transaction_id: &str,
        record: &SignatureRecord,
    ) -> Result<SignatureRecord, StoreError> {
        let stored: SignatureRecord = self
            .client
            .post(self.signature_url(transaction_id))
            .json(record)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(
            transaction_id = %transaction_id,
            address = %stored.address,
            "signature persisted"
        );
        Ok(stored)
    }

    async fn delete(&self, transaction_id: &str, address: &str) -> Result<(), StoreError> {
        self.client
            .delete(format!(
                "{}/{}",
                self.signature_url(transaction_id),
                address
            ))
            .send()
            .await?
            .error_for_status()?;

        info!(
            transaction_id = %transaction_id,
            address = %address,
            "signature removed"
        );
        Ok(())
    }
}
