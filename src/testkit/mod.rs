//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`gateway`] — [`MockGateway`](gateway::MockGateway), a scripted
//!   [`ChainGateway`](crate::gateway::ChainGateway), and a fixed-address
//!   test signer.
//! - [`domain`] — Builders for domain records: markets, positions,
//!   addresses.

pub mod domain;
pub mod gateway;
