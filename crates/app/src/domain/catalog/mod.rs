//! Catalog

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
