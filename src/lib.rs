//! Client for a small product catalog and point-of-sale page.
//!
//! The product list is fetched from an `/items` backend and owned by a single
//! catalog actor. Create, update and delete requests are always followed by a
//! full refetch, and the table is re-rendered from the new snapshot. Bills are
//! derived from the quantities entered against the rendered rows.

pub mod app_system;
pub mod backend;
pub mod catalog_actor;
pub mod clients;
pub mod domain;
pub mod view;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, CatalogApp, ClientConfig};
pub use backend::{Backend, BackendError, HttpBackend};
pub use clients::{CatalogSync, FetchOutcome};
pub use domain::{Bill, BillLine, Product, ProductDraft, ProductId, ProductList};
