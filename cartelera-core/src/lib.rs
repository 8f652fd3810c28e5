//! Catalog storage for the Cartelera movie service.
//!
//! The whole catalog lives in memory and is snapshotted to a single JSON
//! file after every mutation — load-entire-file on startup, write-entire-file
//! on change. Suitable for a personal-scale catalog, by design.

pub mod error;
mod snapshot;
pub mod store;

pub use error::{CatalogError, Result as CatalogResult};
pub use store::CatalogStore;
