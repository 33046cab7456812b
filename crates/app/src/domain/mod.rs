//! Catalog Domain Concerns

pub mod photos;
pub mod products;
