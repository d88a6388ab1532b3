use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::backend::{Backend, BackendError};
use crate::catalog_actor::{CatalogError, CatalogHandle};
use crate::domain::{ProductDraft, ProductId, ProductList};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// What a fetch did to the in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced with `len` products at `revision`.
    Replaced { revision: u64, len: usize },
    /// The fetch failed and the previous list is still current.
    KeptStale,
}

impl FetchOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, FetchOutcome::Replaced { .. })
    }
}

/// Keeps the catalog in line with the backend.
///
/// Mutations are never applied locally. Each one is sent to the backend and
/// followed by exactly one full refetch, whatever the mutation's result.
/// Failures are logged and absorbed; callers only see the [`FetchOutcome`].
#[derive(Clone)]
pub struct CatalogSync {
    backend: Arc<dyn Backend>,
    catalog: CatalogHandle,
}

impl CatalogSync {
    pub fn new(backend: Arc<dyn Backend>, catalog: CatalogHandle) -> Self {
        Self { backend, catalog }
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Fetches the full list and replaces the catalog with it.
    ///
    /// The old list stays current until the new one has been fetched and
    /// decoded. On failure it stays current for good.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> FetchOutcome {
        match self.try_fetch_all().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Error fetching products");
                FetchOutcome::KeptStale
            }
        }
    }

    async fn try_fetch_all(&self) -> Result<FetchOutcome, SyncError> {
        debug!("Sending request");
        let products = match self.backend.list().await? {
            Some(products) => products,
            None => {
                warn!("Backend returned no product list");
                ProductList::default()
            }
        };
        let len = products.len();
        let revision = self.catalog.replace(products).await?;
        Ok(FetchOutcome::Replaced { revision, len })
    }

    /// Creates a product, then refetches.
    #[instrument(skip(self))]
    pub async fn create(&self, draft: ProductDraft) -> FetchOutcome {
        debug!("Sending request");
        match self.backend.create(&draft).await {
            Ok(ack) => info!(item_id = ?ack.item_id, "Product created"),
            Err(e) => error!(error = %e, "Create request failed"),
        }
        self.fetch_all().await
    }

    /// Replaces the name, price and description of `id`, then refetches.
    ///
    /// There is no local existence check; a missing id is the backend's call.
    #[instrument(skip(self))]
    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> FetchOutcome {
        debug!("Sending request");
        match self.backend.update(id, &draft).await {
            Ok(ack) => info!(message = ?ack.message, "Product updated"),
            Err(e) => error!(error = %e, "Update request failed"),
        }
        self.fetch_all().await
    }

    /// Deletes `id`, then refetches.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: ProductId) -> FetchOutcome {
        debug!("Sending request");
        match self.backend.delete(id).await {
            Ok(ack) => info!(message = ?ack.message, "Product deleted"),
            Err(e) => error!(error = %e, "Delete request failed"),
        }
        self.fetch_all().await
    }
}
