use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{CreatePayload, Item, UpdatePayload};

/// Client-side API error.
///
/// Display is the banner text: the server-reported `error` string when the
/// response carried one, else the transport failure description.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error text from the server's `{"message", "error"}` payload.
    #[error("{0}")]
    Server(String),

    /// Transport-level failure (connect, decode, ...).
    #[error("{0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// The five-endpoint inventory surface as the client sees it.
///
/// One implementation speaks HTTP ([`HttpApi`]); tests substitute their own.
#[async_trait::async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Item>, ApiError>;
    async fn create(&self, payload: &CreatePayload) -> Result<Item, ApiError>;
    /// Returns the pre-update snapshot, or None if no record matched.
    async fn update(&self, payload: &UpdatePayload) -> Result<Option<Item>, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// HTTP implementation against a configured base URL.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parse a response, mapping non-2xx to `ApiError::Server` with the
    /// payload's `error` text when present.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ApiError::Server(message));
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[async_trait::async_trait]
impl InventoryApi for HttpApi {
    async fn list_all(&self) -> Result<Vec<Item>, ApiError> {
        let resp = self.http.get(self.url("/inventories")).send().await?;
        Self::parse(resp).await
    }

    async fn create(&self, payload: &CreatePayload) -> Result<Item, ApiError> {
        let resp = self
            .http
            .post(self.url("/inventory"))
            .json(payload)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn update(&self, payload: &UpdatePayload) -> Result<Option<Item>, ApiError> {
        let resp = self
            .http
            .put(self.url("/inventory"))
            .json(payload)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/inventory/{id}")))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ApiError::Server(message));
        }
        Ok(())
    }
}
