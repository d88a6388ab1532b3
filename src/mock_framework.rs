//! # Mock Framework
//!
//! Backends for testing the catalog without a server.
//!
//! [`create_mock_backend`] hands every backend call to the test over a channel;
//! use [`expect_list`], [`expect_create`], [`expect_update`] and
//! [`expect_delete`] to assert the request and answer it through the responder.
//! [`FakeBackend`] keeps a real in-memory `/items` store for round-trip flows.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::backend::{Ack, Backend, BackendError};
use crate::domain::{Product, ProductDraft, ProductId, ProductList};

pub type Responder<T> = oneshot::Sender<Result<T, BackendError>>;

#[derive(Debug)]
pub enum BackendRequest {
    List {
        respond_to: Responder<Option<ProductList>>,
    },
    Create {
        draft: ProductDraft,
        respond_to: Responder<Ack>,
    },
    Update {
        id: ProductId,
        draft: ProductDraft,
        respond_to: Responder<Ack>,
    },
    Delete {
        id: ProductId,
        respond_to: Responder<Ack>,
    },
}

/// Backend whose every call is answered by the test.
pub struct MockBackend {
    sender: mpsc::Sender<BackendRequest>,
}

impl MockBackend {
    async fn call<T>(
        &self,
        request: impl FnOnce(Responder<T>) -> BackendRequest,
    ) -> Result<T, BackendError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| BackendError::Unavailable("Mock closed".to_string()))?;
        response
            .await
            .map_err(|_| BackendError::Unavailable("Mock dropped".to_string()))?
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn list(&self) -> Result<Option<ProductList>, BackendError> {
        self.call(|respond_to| BackendRequest::List { respond_to }).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Ack, BackendError> {
        let draft = draft.clone();
        self.call(|respond_to| BackendRequest::Create { draft, respond_to }).await
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Ack, BackendError> {
        let draft = draft.clone();
        self.call(|respond_to| BackendRequest::Update { id, draft, respond_to }).await
    }

    async fn delete(&self, id: ProductId) -> Result<Ack, BackendError> {
        self.call(|respond_to| BackendRequest::Delete { id, respond_to }).await
    }
}

/// Creates a mock backend and the receiver its requests arrive on.
pub fn create_mock_backend(buffer_size: usize) -> (Arc<MockBackend>, mpsc::Receiver<BackendRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(MockBackend { sender }), receiver)
}

/// Helper to verify that the next request is a List
pub async fn expect_list(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<Responder<Option<ProductList>>> {
    match receiver.recv().await {
        Some(BackendRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next request is a Create
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(ProductDraft, Responder<Ack>)> {
    match receiver.recv().await {
        Some(BackendRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next request is an Update
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(ProductId, ProductDraft, Responder<Ack>)> {
    match receiver.recv().await {
        Some(BackendRequest::Update { id, draft, respond_to }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next request is a Delete
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(ProductId, Responder<Ack>)> {
    match receiver.recv().await {
        Some(BackendRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// In-memory `/items` store with the same answers as the real service.
#[derive(Default)]
pub struct FakeBackend {
    items: Mutex<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
    list_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let items: BTreeMap<_, _> = products.into_iter().map(|p| (p.id, p)).collect();
        let next_id = items.keys().next_back().map_or(0, |id| id.0);
        Self {
            items: Mutex::new(items),
            next_id: AtomicI64::new(next_id),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `GET /items` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn not_found() -> BackendError {
        BackendError::Api {
            status: 404,
            message: "Item not found or unauthorized".to_string(),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list(&self) -> Result<Option<ProductList>, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().await;
        Ok(Some(ProductList::new(items.values().cloned().collect())))
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Ack, BackendError> {
        let id = ProductId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let product = Product::new(id.0, &draft.name, &draft.price, &draft.description);
        self.items.lock().await.insert(id, product);
        Ok(Ack { item_id: Some(id), message: None })
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Ack, BackendError> {
        let mut items = self.items.lock().await;
        let item = items.get_mut(&id).ok_or_else(Self::not_found)?;
        *item = Product::new(id.0, &draft.name, &draft.price, &draft.description);
        Ok(Ack {
            item_id: None,
            message: Some("Item updated successfully".to_string()),
        })
    }

    async fn delete(&self, id: ProductId) -> Result<Ack, BackendError> {
        self.items.lock().await.remove(&id).ok_or_else(Self::not_found)?;
        Ok(Ack {
            item_id: None,
            message: Some("Item deleted successfully".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let (backend, mut receiver) = create_mock_backend(10);

        let create_task = tokio::spawn(async move {
            backend.create(&ProductDraft::new("Pen", "2.50", "Blue")).await
        });

        let (draft, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(draft.name, "Pen");
        responder
            .send(Ok(Ack { item_id: Some(ProductId(1)), message: None }))
            .unwrap();

        let ack = create_task.await.unwrap().unwrap();
        assert_eq!(ack.item_id, Some(ProductId(1)));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_unavailable() {
        let (backend, mut receiver) = create_mock_backend(10);
        let task = tokio::spawn(async move { backend.list().await });
        drop(expect_list(&mut receiver).await.unwrap());
        assert!(matches!(task.await.unwrap(), Err(BackendError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_fake_backend_assigns_ids_after_seeded_ones() {
        let backend = FakeBackend::with_products([Product::new(4, "Pen", "2.50", "Blue")]);
        let ack = backend.create(&ProductDraft::new("Pad", "1", "")).await.unwrap();
        assert_eq!(ack.item_id, Some(ProductId(5)));
        assert!(backend.update(ProductId(9), &ProductDraft::default()).await.is_err());
    }
}
