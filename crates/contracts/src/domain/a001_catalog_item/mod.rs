pub mod aggregate;

pub use aggregate::{parse_catalog_items, CatalogField, CatalogItem};
