//! Read-only reference data: the elements, compounds and equipment a lab session draws from.
//!
//! The catalog is never mutated by the engine. A built-in catalog is compiled into the crate;
//! alternative catalogs with the same schema can be loaded from TOML files.

pub mod registry;

pub use registry::{Catalog, CatalogError};
