pub mod bill;
pub mod product;

pub use bill::*;
pub use product::*;
