//! Test utilities
//!
//! In-memory port implementations and entity fixtures for service tests.
//! Repositories keep their rows in `RwLock<HashMap>` so tests can seed them
//! with `with_*` builders and inspect them afterwards.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
