//! Carteira domain core
//!
//! Investors, portfolios, positions and their transaction history, savings
//! goals, price alerts and notifications. Laid out as ports and adapters:
//! `domain` holds value objects, aggregates and repository ports, `app` the
//! services that orchestrate them, and `presenters` the serializable views
//! handed to transports.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod presenters;

#[cfg(test)]
mod test_utils;
