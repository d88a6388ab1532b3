use thiserror::Error;

/// Errors talking to the catalog actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog actor closed")]
    Closed,
    #[error("Catalog actor dropped the request")]
    Dropped,
    #[error("Catalog actor task failed: {0}")]
    TaskFailed(String),
}
