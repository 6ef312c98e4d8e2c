//! Dismantling catalog
//!
//! Reference data mapping equipment categories to dismantling configurations:
//! - Ordered categories, each owning ordered subcategories
//! - Per-subcategory subassemblies, valuable and hazardous materials
//! - Loaded once from a file or URL, then shared read-only

pub mod models;
pub mod loader;

pub use models::{Category, DismantlingCatalog, DismantlingConfig, SubCategory};
pub use loader::{
    load_or_empty, source_from_config, CatalogError, CatalogSource, FileCatalogSource,
    HttpCatalogSource, StaticCatalogSource,
};
