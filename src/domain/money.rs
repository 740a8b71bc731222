//! Monetary types and the UFix64 wire format.
//!
//! All amounts cross the chain boundary as fixed-point decimal strings
//! with exactly eight fractional digits (the contract's UFix64 scale).
//! Binary floats never touch money in this crate.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Monetary amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Fractional digits carried by a UFix64 value on the wire.
pub const UFIX64_SCALE: u32 = 8;

/// Error parsing a wire amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("malformed UFix64 amount '{raw}'")]
    Malformed { raw: String },

    #[error("negative amount '{raw}' where UFix64 expected")]
    Negative { raw: String },
}

/// Format an amount as a UFix64 wire string with exactly eight
/// fractional digits.
#[must_use]
pub fn format_ufix64(amount: Amount) -> String {
    format!("{:.8}", amount.round_dp(UFIX64_SCALE))
}

/// Parse a UFix64 wire string into an [`Amount`].
///
/// # Errors
///
/// Returns [`ParseAmountError`] for non-decimal input or negative values.
pub fn parse_ufix64(raw: &str) -> Result<Amount, ParseAmountError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| ParseAmountError::Malformed {
        raw: raw.to_string(),
    })?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ParseAmountError::Negative {
            raw: raw.to_string(),
        });
    }
    Ok(amount)
}

/// A wire amount after parsing, tagged with how it was obtained.
///
/// Malformed input degrades to zero for display purposes, but the
/// degradation is recorded rather than silently conflated with a real
/// zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAmount {
    /// The input parsed cleanly.
    Exact(Amount),
    /// The input could not be parsed as a non-negative decimal; the
    /// value was defaulted to zero and the raw text retained.
    Defaulted { raw: String },
}

impl ParsedAmount {
    /// Parse a wire amount, degrading malformed input to a tagged zero.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match parse_ufix64(raw) {
            Ok(amount) => ParsedAmount::Exact(amount),
            Err(_) => ParsedAmount::Defaulted {
                raw: raw.to_string(),
            },
        }
    }

    /// The usable amount: the parsed value, or zero when defaulted.
    #[must_use]
    pub fn value(&self) -> Amount {
        match self {
            ParsedAmount::Exact(amount) => *amount,
            ParsedAmount::Defaulted { .. } => Decimal::ZERO,
        }
    }

    /// True when the input failed to parse and was defaulted to zero.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParsedAmount::Defaulted { .. })
    }
}
