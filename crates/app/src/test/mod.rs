//! Shared test infrastructure.

pub(crate) mod helpers;

pub(crate) use context::{TEST_PASSWORD, TestContext};
