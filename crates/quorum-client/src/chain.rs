//! Chain LCD queries
//!
//! The only chain state this workspace reads is an account's number and
//! sequence. Sequence is the ordering token for multisig signing: it is
//! fetched immediately before every sign attempt and never reused.

use async_trait::async_trait;
use quorum_log::debug;
use quorum_types::AccountSequence;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ChainQueryError {
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

/// Source of fresh account numbers and sequences
#[async_trait]
pub trait SequenceProvider: Send + Sync {
    async fn get_sequence(&self, address: &str) -> Result<AccountSequence, ChainQueryError>;
}

/// LCD-backed sequence provider
pub struct HttpSequenceProvider {
    client: reqwest::Client,
    api: Url,
}

#[derive(Deserialize)]
struct AccountResponse {
    account: AccountData,
}

#[derive(Deserialize)]
struct AccountData {
    account_number: String,
    #[serde(default)]
    sequence: Option<String>,
}

impl HttpSequenceProvider {
    /// Create a provider for an LCD endpoint
    pub fn new(api: &str) -> Result<Self, ChainQueryError> {
        Ok(Self {
            client: reqwest::Client::new(),
            api: Url::parse(api)?,
        })
    }

    fn account_url(&self, address: &str) -> String {
        format!(
            "{}/cosmos/auth/v1beta1/accounts/{}",
            self.api.as_str().trim_end_matches('/'),
            address
        )
    }
}

#[async_trait]
impl SequenceProvider for HttpSequenceProvider {
    async fn get_sequence(&self, address: &str) -> Result<AccountSequence, ChainQueryError> {
        let url = self.account_url(address);
        debug!(address = %address, "querying account sequence");

        let response: AccountResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Fresh accounts may omit the sequence field entirely
        Ok(AccountSequence {
            account_number: response.account.account_number,
            sequence: response.account.sequence.unwrap_or_else(|| "0".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_url_shape() {
        let provider = HttpSequenceProvider::new("https://lcd.example.com").unwrap();
        assert_eq!(
            provider.account_url("cosmos1multisig"),
            "https://lcd.example.com/cosmos/auth/v1beta1/accounts/cosmos1multisig"
        );

        let trailing = HttpSequenceProvider::new("https://lcd.example.com/").unwrap();
        assert_eq!(
            trailing.account_url("cosmos1multisig"),
            "https://lcd.example.com/cosmos/auth/v1beta1/accounts/cosmos1multisig"
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(HttpSequenceProvider::new("not a url").is_err());
    }

    #[test]
    fn test_account_response_parsing() {
        let body = r#"{
            "account": {
                "@type": "/cosmos.auth.v1beta1.BaseAccount",
                "address": "cosmos1multisig",
                "account_number": "5213",
                "sequence": "11"
            }
        }"#;
        let parsed: AccountResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.account.account_number, "5213");
        assert_eq!(parsed.account.sequence.as_deref(), Some("11"));

        let fresh = r#"{"account": {"account_number": "0"}}"#;
        let parsed: AccountResponse = serde_json::from_str(fresh).unwrap();
        assert!(parsed.account.sequence.is_none());
    }
}
