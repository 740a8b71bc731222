//! Cadence argument encoding.

use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::domain::{format_ufix64, Address};

/// A positional Cadence argument.
///
/// Amounts are carried as [`Decimal`] and serialized through the
/// UFix64 wire format, so no binary float ever reaches the chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Address(Address),
    UInt64(u64),
    UInt8(u8),
    UFix64(Decimal),
    String(String),
    Bool(bool),
    Optional(Option<Box<Argument>>),
}

impl Argument {
    /// Encode as Cadence-JSON: `{"type": ..., "value": ...}`.
    ///
    /// Numeric values are transmitted as strings, per the Cadence JSON
    /// interchange format.
    #[must_use]
    pub fn to_cadence_json(&self) -> Value {
        match self {
            Argument::Address(address) => json!({
                "type": "Address",
                "value": address.as_str(),
            }),
            Argument::UInt64(value) => json!({
                "type": "UInt64",
                "value": value.to_string(),
            }),
            Argument::UInt8(value) => json!({
                "type": "UInt8",
                "value": value.to_string(),
            }),
            Argument::UFix64(amount) => json!({
                "type": "UFix64",
                "value": format_ufix64(*amount),
            }),
            Argument::String(value) => json!({
                "type": "String",
                "value": value,
            }),
            Argument::Bool(value) => json!({
                "type": "Bool",
                "value": value,
            }),
            Argument::Optional(inner) => json!({
                "type": "Optional",
                "value": inner.as_ref().map(|argument| argument.to_cadence_json()),
            }),
        }
    }
}

/// Encode a full positional argument list.
#[must_use]
pub fn encode_arguments(arguments: &[Argument]) -> Vec<Value> {
    arguments
        .iter()
        .map(Argument::to_cadence_json)
        .collect()
}
