//! Orders Handlers

pub(crate) mod confirm;
pub(crate) mod create_checkout;
pub(crate) mod get;
pub(crate) mod index;
