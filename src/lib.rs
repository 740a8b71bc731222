//! FlowWager core - data access and consistency layer for the
//! FlowWager prediction market.
//!
//! This crate sits between a front end and the FlowWager contract on
//! Flow. It owns the canonical table of named Cadence operations, the
//! memoized dispatch over that table, the gateway boundary to the
//! chain, and the deterministic reconstruction of user-facing
//! financial state (current value, P&L, win rate) from raw contract
//! records. All state-changing business logic lives in the contract;
//! this layer mirrors its arithmetic, it never replaces it.
//!
//! # Modules
//!
//! - [`registry`] - Named operation table, opaque Cadence sources, and
//!   the memoized [`OperationCache`](registry::OperationCache)
//! - [`gateway`] - The [`ChainGateway`](gateway::ChainGateway)
//!   capability, Cadence argument encoding, settlement types, and
//!   structured remote-error classification
//! - [`domain`] - Chain records: markets, positions, profiles, and the
//!   UFix64 money format
//! - [`portfolio`] - Derived financial state: position valuation and
//!   portfolio aggregates
//! - [`client`] - Typed façade, one method per registered operation
//! - [`config`] - TOML configuration and logging setup
//! - [`error`] - Error taxonomy for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use flowwager_core::client::FlowWager;
//! use flowwager_core::config::Config;
//!
//! # async fn run() -> flowwager_core::error::Result<()> {
//! let config = Config::default();
//! let gateway = Arc::new(config.build_gateway());
//! let client = FlowWager::with_builtin(gateway, config.client.platform_fee_pct)?;
//!
//! let markets = client.active_markets().await?;
//! println!("{} markets open", markets.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod portfolio;
pub mod registry;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
