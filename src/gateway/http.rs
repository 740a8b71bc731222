//! HTTP gateway adapter against a Flow access node's REST API.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use async_trait::async_trait;

use super::{
    classify, encode_arguments, Argument, ChainGateway, PendingTransaction, SealStatus,
    Settlement, SettlementEvent, Signer,
};
use crate::error::GatewayError;

/// Production [`ChainGateway`] backed by an access node's HTTP API.
///
/// Scripts execute in a single request; transactions are submitted and
/// then polled until the node reports a terminal status.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    poll_interval: Duration,
    seal_timeout: Duration,
}

impl HttpGateway {
    /// Create a gateway for the given access node.
    #[must_use]
    pub fn new(base_url: impl Into<String>, poll_interval: Duration, seal_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poll_interval,
            seal_timeout,
        }
    }

    async fn check_remote_rejection(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            // The node ran (or refused) the operation; the body carries
            // the Cadence failure text.
            let message = extract_message(&body);
            Err(GatewayError::RemoteRejected(classify(&message)))
        } else {
            Err(GatewayError::Connection(format!(
                "access node returned {status}: {body}"
            )))
        }
    }
}

/// Pull the `message` field out of an error body, falling back to the
/// raw text.
fn extract_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Deserialize)]
struct TransactionResult {
    status: String,
    #[serde(default)]
    error_message: String,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

#[async_trait]
impl ChainGateway for HttpGateway {
    async fn execute_script(
        &self,
        source: &str,
        arguments: &[Argument],
    ) -> Result<Value, GatewayError> {
        let url = format!("{}/v1/scripts", self.base_url);
        debug!(url = %url, args = arguments.len(), "executing script");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "script": source,
                "arguments": encode_arguments(arguments),
            }))
            .send()
            .await?;

        let response = Self::check_remote_rejection(response).await?;
        Ok(response.json().await?)
    }

    async fn send_transaction(
        &self,
        source: &str,
        arguments: &[Argument],
        signer: &dyn Signer,
    ) -> Result<PendingTransaction, GatewayError> {
        let url = format!("{}/v1/transactions", self.base_url);
        info!(url = %url, proposer = %signer.address(), "submitting transaction");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "script": source,
                "arguments": encode_arguments(arguments),
                "proposer": signer.address().as_str(),
            }))
            .send()
            .await?;

        let response = Self::check_remote_rejection(response).await?;
        let submitted: SubmitResponse = response.json().await?;
        info!(tx_id = %submitted.id, "transaction accepted");
        Ok(PendingTransaction::new(submitted.id))
    }

    async fn wait_for_seal(
        &self,
        pending: &PendingTransaction,
    ) -> Result<Settlement, GatewayError> {
        let url = format!("{}/v1/transaction_results/{}", self.base_url, pending.tx_id());
        let started = Instant::now();

        loop {
            let response = self.client.get(&url).send().await?;
            let response = Self::check_remote_rejection(response).await?;
            let result: TransactionResult = response.json().await?;

            match result.status.as_str() {
                "SEALED" => {
                    let status = if result.error_message.is_empty() {
                        SealStatus::Sealed
                    } else {
                        // Sealed but reverted: the chain recorded the
                        // transaction, its effects did not apply.
                        warn!(tx_id = %pending.tx_id(), "transaction sealed with error");
                        SealStatus::Failed(classify(&result.error_message))
                    };
                    return Ok(Settlement {
                        tx_id: pending.tx_id().to_string(),
                        status,
                        events: result
                            .events
                            .into_iter()
                            .map(|event| SettlementEvent {
                                kind: event.kind,
                                payload: event.payload,
                            })
                            .collect(),
                    });
                }
                "EXPIRED" => {
                    return Ok(Settlement {
                        tx_id: pending.tx_id().to_string(),
                        status: SealStatus::Expired,
                        events: vec![],
                    });
                }
                other => {
                    debug!(tx_id = %pending.tx_id(), status = other, "awaiting seal");
                }
            }

            if started.elapsed() > self.seal_timeout {
                return Err(GatewayError::SealTimeout {
                    tx_id: pending.tx_id().to_string(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
