use thiserror::Error;

use crate::domain::ProductId;

/// A view operation addressed something that is not on screen.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error("No rendered row for product {0}")]
    UnknownProduct(ProductId),
    #[error("No rendered row at index {0}")]
    UnknownRow(usize),
    #[error("{0} popup is not open")]
    NotOpen(&'static str),
}
