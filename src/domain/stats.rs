//! Platform-level and profile records.
//!
//! Read-only DTOs decoded from chain queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::id::Address;
use super::money::Amount;

/// Aggregate platform statistics reported by the contract.
#[derive(Debug, Clone)]
pub struct PlatformStats {
    pub total_markets: u64,
    pub active_markets: u64,
    pub total_users: u64,
    pub total_volume: Amount,
    /// Percentage of each pool retained by the platform on distribution.
    pub platform_fee_pct: Decimal,
}

/// A user's on-chain profile.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub address: Address,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub joined_at: DateTime<Utc>,
}
