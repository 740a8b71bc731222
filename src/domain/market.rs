//! Market records as returned by the chain.
//!
//! The contract is authoritative for every field here; the client never
//! mutates a market, only re-fetches it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::id::{Address, MarketId};
use super::money::Amount;

/// Lifecycle status of a market.
///
/// Decoded from the contract's raw status discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum MarketStatus {
    Active,
    PendingResolution,
    Resolved,
    Cancelled,
}

impl TryFrom<u8> for MarketStatus {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(MarketStatus::Active),
            1 => Ok(MarketStatus::PendingResolution),
            2 => Ok(MarketStatus::Resolved),
            3 => Ok(MarketStatus::Cancelled),
            other => Err(format!("unknown market status discriminant {other}")),
        }
    }
}

impl MarketStatus {
    /// True once the market can no longer change outcome.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, MarketStatus::Resolved | MarketStatus::Cancelled)
    }
}

/// Resolution outcome of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum MarketOutcome {
    OptionA,
    OptionB,
    Draw,
    Cancelled,
}

impl TryFrom<u8> for MarketOutcome {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(MarketOutcome::OptionA),
            1 => Ok(MarketOutcome::OptionB),
            2 => Ok(MarketOutcome::Draw),
            3 => Ok(MarketOutcome::Cancelled),
            other => Err(format!("unknown market outcome discriminant {other}")),
        }
    }
}

impl MarketOutcome {
    /// The contract's discriminant for this outcome, used when encoding
    /// `resolveMarket` arguments.
    #[must_use]
    pub const fn selector(&self) -> u8 {
        match self {
            MarketOutcome::OptionA => 0,
            MarketOutcome::OptionB => 1,
            MarketOutcome::Draw => 2,
            MarketOutcome::Cancelled => 3,
        }
    }
}

/// A prediction market with two mutually exclusive outcome options and
/// a pool of staked funds.
#[derive(Debug, Clone)]
pub struct Market {
    pub id: MarketId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub option_a: String,
    pub option_b: String,
    pub creator: Address,
    pub status: MarketStatus,
    pub resolved: bool,
    pub outcome: Option<MarketOutcome>,
    pub total_option_a_shares: Amount,
    pub total_option_b_shares: Amount,
    pub total_pool: Amount,
    pub min_bet: Amount,
    pub max_bet: Amount,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub image_url: String,
    /// True when a wire amount on this record failed to parse and was
    /// zeroed during decode.
    pub malformed_amounts: bool,
}

impl Market {
    /// Total shares staked across both options.
    #[must_use]
    pub fn total_shares(&self) -> Amount {
        self.total_option_a_shares + self.total_option_b_shares
    }

    /// Whether bets can still be placed at the given instant.
    #[must_use]
    pub fn is_open_for_betting(&self, now: DateTime<Utc>) -> bool {
        self.status == MarketStatus::Active && !self.resolved && now < self.end_time
    }
}
