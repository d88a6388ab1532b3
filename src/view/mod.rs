//! Projection of the catalog onto a display surface, plus the per-row
//! quantity inputs, confirmation popups and the bill overlay.

pub mod bill_popup;
pub mod error;
pub mod modal;
pub mod quantity;
pub mod renderer;
pub mod surface;

pub use bill_popup::*;
pub use error::*;
pub use modal::*;
pub use quantity::*;
pub use renderer::*;
pub use surface::*;
