use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::MarketId;
use crate::gateway::RemoteFailure;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Operation registry errors.
///
/// `NotFound` indicates a programming mistake (a caller asked for an
/// operation that was never registered) and is not recoverable at the
/// call site.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown operation '{name}'")]
    NotFound { name: String },

    #[error("operation '{name}' registered twice with different content")]
    Duplicate { name: &'static str },

    #[error("operation '{name}' is a {actual}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Errors crossing the chain gateway boundary.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("remote rejected: {0}")]
    RemoteRejected(RemoteFailure),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("transaction {tx_id} expired before sealing")]
    Expired { tx_id: String },

    #[error("timed out waiting for seal of transaction {tx_id}")]
    SealTimeout { tx_id: String },
}

impl GatewayError {
    /// The structured remote failure, when the remote side rejected the
    /// operation.
    #[must_use]
    pub fn remote_failure(&self) -> Option<&RemoteFailure> {
        match self {
            GatewayError::RemoteRejected(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Local precondition failures, raised before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bet amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },

    #[error("bet amount {amount} below market minimum {min}")]
    BetBelowMinimum { amount: Decimal, min: Decimal },

    #[error("bet amount {amount} above market maximum {max}")]
    BetAboveMaximum { amount: Decimal, max: Decimal },

    #[error("market {market_id} is not open for betting")]
    MarketClosed { market_id: MarketId },

    #[error("no market with id {market_id}")]
    UnknownMarket { market_id: MarketId },

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("end time {end_time} is not in the future")]
    EndTimeInPast { end_time: i64 },

    #[error("minimum bet {min} exceeds maximum bet {max}")]
    InvertedBetBounds { min: Decimal, max: Decimal },

    #[error("invalid percentage for {field}: {value}")]
    InvalidPercentage { field: &'static str, value: Decimal },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
