//! Chain gateway boundary.
//!
//! The core depends on, but does not itself own, access to the remote
//! chain. [`ChainGateway`] is the injected capability: read-only
//! script execution, transaction submission, and settlement waiting.
//! [`HttpGateway`] is the production adapter; the testkit provides a
//! scripted mock.

mod argument;
pub mod classify;
mod http;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Address;
use crate::error::GatewayError;

pub use argument::{encode_arguments, Argument};
pub use classify::{classify, RemoteErrorKind, RemoteFailure};
pub use http::HttpGateway;

/// A signing authorization supplied by the wallet collaborator.
///
/// This layer only needs the authorizer's address; key management and
/// the signature protocol stay outside the crate.
pub trait Signer: Send + Sync {
    /// The account that authorizes and pays for the transaction.
    fn address(&self) -> &Address;
}

/// Handle for a submitted, not-yet-settled transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    tx_id: String,
}

impl PendingTransaction {
    /// Create a handle from a transaction id.
    pub fn new(tx_id: impl Into<String>) -> Self {
        Self { tx_id: tx_id.into() }
    }

    /// The remote transaction id.
    #[must_use]
    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }
}

impl fmt::Display for PendingTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tx_id)
    }
}

/// Terminal status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SealStatus {
    /// Effects are durable; dependent reads may rely on them.
    Sealed,
    /// The remote execution rejected the transaction; no effect.
    Failed(RemoteFailure),
    /// The transaction expired before sealing; no effect.
    Expired,
}

/// An event emitted by a sealed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementEvent {
    /// Fully qualified event type, e.g. `A.xyz.FlowWager.MarketCreated`.
    pub kind: String,
    pub payload: Value,
}

/// The durable outcome of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub tx_id: String,
    pub status: SealStatus,
    pub events: Vec<SettlementEvent>,
}

impl Settlement {
    /// True when effects are durable.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        matches!(self.status, SealStatus::Sealed)
    }

    /// Convert a non-sealed terminal status into an error.
    ///
    /// Money movement is involved, so a failure must never be reported
    /// as (or mistaken for) success.
    ///
    /// # Errors
    ///
    /// [`GatewayError::RemoteRejected`] for `Failed`,
    /// [`GatewayError::Expired`] for `Expired`.
    pub fn ensure_sealed(self) -> Result<Settlement, GatewayError> {
        match &self.status {
            SealStatus::Sealed => Ok(self),
            SealStatus::Failed(failure) => Err(GatewayError::RemoteRejected(failure.clone())),
            SealStatus::Expired => Err(GatewayError::Expired { tx_id: self.tx_id }),
        }
    }
}

/// Capability for executing operations against the remote chain.
///
/// Read-your-writes is only guaranteed after [`wait_for_seal`]
/// reports [`SealStatus::Sealed`]; callers must re-fetch rather than
/// trust values read before a mutation settled.
///
/// [`wait_for_seal`]: ChainGateway::wait_for_seal
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Execute a read-only script. No signer, no side effects.
    async fn execute_script(
        &self,
        source: &str,
        arguments: &[Argument],
    ) -> Result<Value, GatewayError>;

    /// Submit a state-changing transaction. The effect is not durable
    /// until the returned handle seals.
    async fn send_transaction(
        &self,
        source: &str,
        arguments: &[Argument],
        signer: &dyn Signer,
    ) -> Result<PendingTransaction, GatewayError>;

    /// Wait for a terminal status. Blocks (asynchronously) until the
    /// remote system reports one.
    async fn wait_for_seal(
        &self,
        pending: &PendingTransaction,
    ) -> Result<Settlement, GatewayError>;
}
