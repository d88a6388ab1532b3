//! Owner of the in-memory product list.
//!
//! The list lives inside a single actor task. Every write goes through
//! [`CatalogHandle::replace`], so concurrent fetches resolve in arrival order
//! and the last replacement wins. Readers either take a [`CatalogSnapshot`] or
//! subscribe to be told about each new revision.

pub mod error;

pub use error::*;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::domain::ProductList;

/// A revision of the catalog. Revision 0 is the empty list before any fetch.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub revision: u64,
    pub products: Arc<ProductList>,
}

pub type Response<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum CatalogRequest {
    Replace {
        products: ProductList,
        respond_to: Response<u64>,
    },
    Snapshot {
        respond_to: Response<CatalogSnapshot>,
    },
    Subscribe {
        respond_to: Response<watch::Receiver<CatalogSnapshot>>,
    },
    Shutdown {
        respond_to: Response<()>,
    },
}

pub struct CatalogActor {
    receiver: mpsc::Receiver<CatalogRequest>,
    current: watch::Sender<CatalogSnapshot>,
}

impl CatalogActor {
    pub fn new(buffer_size: usize) -> (Self, CatalogHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (current, _) = watch::channel(CatalogSnapshot::default());
        let actor = Self { receiver, current };
        (actor, CatalogHandle { sender })
    }

    /// Serves requests until a shutdown request arrives or every
    /// [`CatalogHandle`] is dropped.
    pub async fn run(mut self) {
        debug!("Catalog actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::Replace { products, respond_to } => {
                    let revision = self.current.borrow().revision + 1;
                    let len = products.len();
                    // send_replace stores the value even with no receivers alive
                    self.current.send_replace(CatalogSnapshot {
                        revision,
                        products: Arc::new(products),
                    });
                    info!(revision, products = len, "Catalog replaced");
                    let _ = respond_to.send(revision);
                }
                CatalogRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.current.borrow().clone());
                }
                CatalogRequest::Subscribe { respond_to } => {
                    let _ = respond_to.send(self.current.subscribe());
                }
                CatalogRequest::Shutdown { respond_to } => {
                    let _ = respond_to.send(());
                    break;
                }
            }
        }
        debug!("Catalog actor stopped");
    }
}

#[derive(Clone, Debug)]
pub struct CatalogHandle {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogHandle {
    /// Replaces the whole list and returns the new revision.
    pub async fn replace(&self, products: ProductList) -> Result<u64, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::Replace { products, respond_to })
            .await
            .map_err(|_| CatalogError::Closed)?;
        response.await.map_err(|_| CatalogError::Dropped)
    }

    pub async fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::Snapshot { respond_to })
            .await
            .map_err(|_| CatalogError::Closed)?;
        response.await.map_err(|_| CatalogError::Dropped)
    }

    /// Returns a receiver that observes every later replacement.
    pub async fn subscribe(&self) -> Result<watch::Receiver<CatalogSnapshot>, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::Subscribe { respond_to })
            .await
            .map_err(|_| CatalogError::Closed)?;
        response.await.map_err(|_| CatalogError::Dropped)
    }

    /// Stops the actor even while other handles are alive. Later requests on
    /// any handle fail with [`CatalogError::Closed`].
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::Shutdown { respond_to })
            .await
            .map_err(|_| CatalogError::Closed)?;
        response.await.map_err(|_| CatalogError::Dropped)
    }
}
