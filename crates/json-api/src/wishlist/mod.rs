//! Wishlist endpoints.

pub(crate) mod handlers;
pub(crate) mod models;
