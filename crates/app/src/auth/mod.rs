//! Authentication

mod errors;
pub mod models;
pub mod password;
mod repository;
mod service;
pub mod session;

pub use errors::AuthServiceError;
pub use models::*;
pub use service::*;
