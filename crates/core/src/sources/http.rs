use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::models::trade::Trade;
use crate::models::transaction::Transaction;
use super::traits::RecordSource;

const SOURCE_NAME: &str = "Http";

/// Reads record collections from a REST gateway in front of the document store.
///
/// - **Endpoints**: `GET {base}/accounts`, `{base}/trades`, `{base}/transactions`
/// - **Response**: a JSON array of documents in the store's camelCase shape
/// - **Auth**: optional bearer token issued by the identity provider
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRecordSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the signed-in user's token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Full URL of a collection endpoint.
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    async fn fetch_collection<T: DeserializeOwned + Send>(&self, collection: &str) -> Result<Vec<T>, CoreError> {
        let url = self.collection_url(collection);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(collection, %status, "record source rejected credentials");
            return Err(CoreError::Unauthorized(format!(
                "{collection} request returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(CoreError::Source {
                source_name: SOURCE_NAME.into(),
                message: format!("{collection} request returned {status}"),
            });
        }

        let records: Vec<T> = resp.json().await.map_err(|e| CoreError::Source {
            source_name: SOURCE_NAME.into(),
            message: format!("Failed to parse {collection} response: {e}"),
        })?;
        debug!(collection, count = records.len(), "collection fetched");
        Ok(records)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordSource for HttpRecordSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, CoreError> {
        self.fetch_collection("accounts").await
    }

    async fn fetch_trades(&self) -> Result<Vec<Trade>, CoreError> {
        self.fetch_collection("trades").await
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.fetch_collection("transactions").await
    }
}
