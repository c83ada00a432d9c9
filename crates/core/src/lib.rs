//! Domain layer of the product catalog.
//!
//! Holds the product model, pagination math, the persistence port
//! ([`store::ProductStore`]), the local image file store and the
//! [`catalog::ProductCatalog`] service that ties them together. Nothing in
//! this crate knows about HTTP or SQL.

pub mod catalog;
pub mod error;
pub mod images;
pub mod memory;
pub mod pagination;
pub mod product;
pub mod store;
pub mod types;
