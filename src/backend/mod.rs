//! The `/items` backend the catalog is synchronized with.

pub mod error;
pub mod http;

pub use self::error::*;
pub use self::http::HttpBackend;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{ProductDraft, ProductId, ProductList};

/// Body of a successful mutation response.
///
/// `POST /items` answers with the new `item_id`; `PUT` and `DELETE` answer with
/// a `message`. Unknown shapes decode to an empty acknowledgment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub item_id: Option<ProductId>,
    pub message: Option<String>,
}

/// Remote product store.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /items`. `None` when the backend answered with `null`.
    async fn list(&self) -> Result<Option<ProductList>, BackendError>;

    /// `POST /items`.
    async fn create(&self, draft: &ProductDraft) -> Result<Ack, BackendError>;

    /// `PUT /items/{id}`.
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Ack, BackendError>;

    /// `DELETE /items/{id}`.
    async fn delete(&self, id: ProductId) -> Result<Ack, BackendError>;
}
