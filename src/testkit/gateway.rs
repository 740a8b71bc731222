//! Scripted [`ChainGateway`] mock.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::Address;
use crate::error::GatewayError;
use crate::gateway::{
    Argument, ChainGateway, PendingTransaction, SealStatus, Settlement, SettlementEvent, Signer,
};
use crate::registry::OperationRegistry;

/// A signer with a fixed address and no real key material.
pub struct TestSigner {
    address: Address,
}

impl TestSigner {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Address::new(address),
        }
    }
}

impl Default for TestSigner {
    fn default() -> Self {
        Self::new("0x02")
    }
}

impl Signer for TestSigner {
    fn address(&self) -> &Address {
        &self.address
    }
}

/// A transaction recorded by the mock.
#[derive(Debug, Clone)]
pub struct Submission {
    pub source: String,
    pub arguments: Vec<Argument>,
    pub proposer: Address,
}

/// Scripted gateway: queued responses per script source, recorded
/// submissions, programmable seal outcomes.
///
/// Unstubbed scripts fail with a connection error so a test never
/// silently consumes missing data.
#[derive(Default)]
pub struct MockGateway {
    scripts: Mutex<HashMap<String, VecDeque<Value>>>,
    submissions: Mutex<Vec<Submission>>,
    seals: Mutex<VecDeque<(SealStatus, Vec<SettlementEvent>)>>,
    next_tx: AtomicU64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the given script source.
    pub fn stub_script(&self, source: &str, response: Value) {
        self.scripts
            .lock()
            .entry(source.to_string())
            .or_default()
            .push_back(response);
    }

    /// Queue a response for a builtin operation by name.
    ///
    /// # Panics
    ///
    /// Panics when `name` is not a builtin operation.
    pub fn stub_operation(&self, name: &str, response: Value) {
        let operation = OperationRegistry::builtin()
            .lookup(name)
            .expect("stub_operation requires a builtin operation name");
        self.stub_script(operation.source, response);
    }

    /// Queue the outcome reported by the next `wait_for_seal` call.
    /// With nothing queued, transactions seal cleanly with no events.
    pub fn queue_seal(&self, status: SealStatus, events: Vec<SettlementEvent>) {
        self.seals.lock().push_back((status, events));
    }

    /// Every transaction submitted so far.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }
}

#[async_trait]
impl ChainGateway for MockGateway {
    async fn execute_script(
        &self,
        source: &str,
        _arguments: &[Argument],
    ) -> Result<Value, GatewayError> {
        self.scripts
            .lock()
            .get_mut(source)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| GatewayError::Connection("no stubbed response for script".to_string()))
    }

    async fn send_transaction(
        &self,
        source: &str,
        arguments: &[Argument],
        signer: &dyn Signer,
    ) -> Result<PendingTransaction, GatewayError> {
        self.submissions.lock().push(Submission {
            source: source.to_string(),
            arguments: arguments.to_vec(),
            proposer: signer.address().clone(),
        });
        let id = self.next_tx.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(PendingTransaction::new(format!("tx-{id}")))
    }

    async fn wait_for_seal(
        &self,
        pending: &PendingTransaction,
    ) -> Result<Settlement, GatewayError> {
        let (status, events) = self
            .seals
            .lock()
            .pop_front()
            .unwrap_or((SealStatus::Sealed, vec![]));
        Ok(Settlement {
            tx_id: pending.tx_id().to_string(),
            status,
            events,
        })
    }
}
