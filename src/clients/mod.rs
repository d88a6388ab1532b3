//! Clients that talk to the backend on behalf of the catalog.

pub mod catalog_client;

pub use catalog_client::*;
