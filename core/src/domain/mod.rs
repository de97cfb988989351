//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `value_objects`: Validated, immutable values (money, CPF, ...)
//! - `entities`: Aggregates representing core business concepts
//! - `ports`: Trait definitions for persistence and cryptography

pub mod entities;
pub mod ports;
pub mod value_objects;
