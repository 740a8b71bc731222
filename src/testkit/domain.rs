//! Builders for domain records used across tests.
//!
//! Concise factories so tests focus on assertions rather than
//! construction boilerplate.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Address, Amount, Market, MarketId, MarketOutcome, MarketStatus, Position};

/// Create an [`Address`] from a string.
pub fn address(value: &str) -> Address {
    Address::new(value)
}

/// An active, unresolved market with empty pools and open-ended
/// betting bounds.
pub fn market(id: u64) -> Market {
    let now = Utc::now();
    Market {
        id: MarketId::new(id),
        title: format!("Market {id}?"),
        description: String::new(),
        category: "test".to_string(),
        option_a: "Yes".to_string(),
        option_b: "No".to_string(),
        creator: address("0x01"),
        status: MarketStatus::Active,
        resolved: false,
        outcome: None,
        total_option_a_shares: Decimal::ZERO,
        total_option_b_shares: Decimal::ZERO,
        total_pool: Decimal::ZERO,
        min_bet: dec!(1),
        max_bet: dec!(1000),
        end_time: now + Duration::days(30),
        created_at: now,
        image_url: String::new(),
        malformed_amounts: false,
    }
}

/// A market resolved in favor of option A.
pub fn resolved_market(id: u64) -> Market {
    let mut resolved = market(id);
    resolved.status = MarketStatus::Resolved;
    resolved.resolved = true;
    resolved.outcome = Some(MarketOutcome::OptionA);
    resolved
}

/// A position for the default test user (`0x02`) on the given market.
pub fn position(
    market_id: u64,
    option_a_shares: Amount,
    option_b_shares: Amount,
    total_invested: Amount,
) -> Position {
    Position {
        user: address("0x02"),
        market_id: MarketId::new(market_id),
        option_a_shares,
        option_b_shares,
        total_invested,
        claimed: false,
        malformed_amounts: false,
    }
}
