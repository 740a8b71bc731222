//! User position records.

use super::id::{Address, MarketId};
use super::money::Amount;

/// A user's accumulated stake in one market.
///
/// Keyed by (`user`, `market_id`); the contract accumulates these
/// across every bet the user placed on the market. `total_invested`
/// only ever grows from the client's point of view.
#[derive(Debug, Clone)]
pub struct Position {
    pub user: Address,
    pub market_id: MarketId,
    pub option_a_shares: Amount,
    pub option_b_shares: Amount,
    pub total_invested: Amount,
    /// True once winnings for a resolved market have been withdrawn.
    pub claimed: bool,
    /// True when a wire amount on this record failed to parse and was
    /// zeroed during decode.
    pub malformed_amounts: bool,
}

impl Position {
    /// Total shares held across both options.
    #[must_use]
    pub fn total_shares(&self) -> Amount {
        self.option_a_shares + self.option_b_shares
    }
}
