//! Product catalog application core.
//!
//! Products are persisted as a single JSON list in a key-value store, while each product's photo
//! lives as its own file in the application's private data area and is re-joined as a `data:` URL
//! when the catalog is displayed.

pub mod camera;
pub mod clock;
pub mod context;
pub mod domain;
pub mod files;
pub mod storage;

#[cfg(test)]
mod test;

pub use context::{AppContext, CatalogEntry, CatalogError};
pub use domain::{photos, products};
