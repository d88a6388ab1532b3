use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{Ack, Backend, BackendError};
use crate::app_system::ClientConfig;
use crate::domain::{ProductDraft, ProductId, ProductList};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// [`Backend`] speaking JSON over HTTP to an `/items` service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: trim_base(base_url.into()),
        }
    }

    /// Builds a backend from the loaded configuration, applying the optional
    /// request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: trim_base(config.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn items_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    fn item_url(&self, id: ProductId) -> String {
        format!("{}/items/{}", self.base_url, id)
    }
}

fn trim_base(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

/// Reads the body, turning non-2xx statuses into [`BackendError::Api`].
async fn read_body(response: reqwest::Response) -> Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        return Err(BackendError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    Ok(serde_json::from_str(body)?)
}

fn decode_ack(body: &str) -> Result<Ack, BackendError> {
    if body.trim().is_empty() {
        return Ok(Ack::default());
    }
    decode(body)
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list(&self) -> Result<Option<ProductList>, BackendError> {
        debug!("Sending request");
        let response = self.http.get(self.items_url()).send().await?;
        let body = read_body(response).await?;
        decode(&body)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn create(&self, draft: &ProductDraft) -> Result<Ack, BackendError> {
        debug!("Sending request");
        let response = self.http.post(self.items_url()).json(draft).send().await?;
        let body = read_body(response).await?;
        decode_ack(&body)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Ack, BackendError> {
        debug!("Sending request");
        let response = self.http.put(self.item_url(id)).json(draft).send().await?;
        let body = read_body(response).await?;
        decode_ack(&body)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn delete(&self, id: ProductId) -> Result<Ack, BackendError> {
        debug!("Sending request");
        let response = self.http.delete(self.item_url(id)).send().await?;
        let body = read_body(response).await?;
        decode_ack(&body)
    }
}
