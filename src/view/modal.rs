use tracing::debug;

use crate::domain::{Product, ProductDraft, ProductId};

/// A confirmation popup bound to one product at a time.
///
/// `Closed → Open(target) → Closed`. Opening while already open rebinds the
/// popup to the new target; nothing from the previous opening survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal<T> {
    Closed,
    Open { target: ProductId, content: T },
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Modal::Closed
    }
}

impl<T> Modal<T> {
    /// Opens the popup for `target`, returning the target it replaced, if any.
    pub fn open(&mut self, target: ProductId, content: T) -> Option<ProductId> {
        let previous = self.target();
        if let Some(previous) = previous {
            debug!(%previous, %target, "Rebinding open popup");
        }
        *self = Modal::Open { target, content };
        previous
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }

    pub fn target(&self) -> Option<ProductId> {
        match self {
            Modal::Open { target, .. } => Some(*target),
            Modal::Closed => None,
        }
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            Modal::Open { content, .. } => Some(content),
            Modal::Closed => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        match self {
            Modal::Open { content, .. } => Some(content),
            Modal::Closed => None,
        }
    }

    /// Closes the popup and hands back what it was bound to.
    pub fn confirm(&mut self) -> Option<(ProductId, T)> {
        match std::mem::take(self) {
            Modal::Open { target, content } => Some((target, content)),
            Modal::Closed => None,
        }
    }

    /// Closes the popup, discarding its content. Returns whether it was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Modal::Closed;
        was_open
    }
}

/// Edit popup: the form, pre-populated from the product.
pub type EditModal = Modal<ProductDraft>;

/// Delete popup content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub name: String,
}

impl DeletePrompt {
    pub fn for_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
        }
    }

    pub fn message(&self) -> String {
        format!("Are you sure you want to delete {}?", self.name)
    }
}

pub type DeleteModal = Modal<DeletePrompt>;
