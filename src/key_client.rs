//! Client for the per-chat key issuance endpoint.

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::{debug, error};

use crate::cipher::Crypto;
use crate::config::KeyClientConfig;
use crate::error::KeyFetchError;
use crate::metrics::measure_async;
use crate::provider::{AeadProvider, DataKey};

pub const KEY_PATH: &str = "/api/encryption/key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyQuery {
    key_version: u64,
    chat_id: i64,
}

#[derive(Debug, Clone)]
pub struct KeyClient {
    client: Client,
    endpoint: String,
}

impl KeyClient {
    pub fn new(config: &KeyClientConfig) -> Result<Self, KeyFetchError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), KEY_PATH),
        }
    }

    /// Fetches the base64 key for `chat_id` at `key_version`.
    pub async fn fetch_key(
        &self,
        key_version: u64,
        chat_id: i64,
        init_data_raw: &str,
    ) -> Result<String, KeyFetchError> {
        measure_async("fetch_key", async {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&KeyQuery { key_version, chat_id })
                .header(AUTHORIZATION, format!("tma {init_data_raw}"))
                .send()
                .await
                .inspect_err(|e| error!(error = %e, chat_id, "key request failed"))?;

            let status = response.status();
            if !status.is_success() {
                error!(%status, chat_id, key_version, "key endpoint rejected request");
                return Err(KeyFetchError::Status(status));
            }

            let key = response.text().await?;
            debug!(chat_id, key_version, "fetched data encryption key");
            Ok(key)
        })
        .await
    }

    /// Fetches and imports the key in one step.
    pub async fn fetch_data_key<P: AeadProvider>(
        &self,
        crypto: &Crypto<P>,
        key_version: u64,
        chat_id: i64,
        init_data_raw: &str,
    ) -> Result<DataKey, KeyFetchError> {
        let key = self.fetch_key(key_version, chat_id, init_data_raw).await?;
        Ok(crypto.import_key(&key)?)
    }
}
