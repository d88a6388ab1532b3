//! Application wiring: configuration, logging setup and the catalog page controller.

pub mod catalog_app;
pub mod config;
pub mod logging;

pub use self::catalog_app::*;
pub use self::config::*;
pub use self::logging::*;
