//! Derived financial state.
//!
//! Reconstructs user-facing metrics (current value, P&L, win rate)
//! from raw market and position records, mirroring the contract's
//! pool-distribution arithmetic so the UI never shows a number the
//! contract would not also produce.
//!
//! Everything here is recomputed from fresh records on every fetch and
//! never cached across a refresh boundary: the underlying chain state
//! can change between reads.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{Amount, Market, MarketId, Position};
use crate::error::ValidationError;

/// How a position's current value was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuationSource {
    /// Contract-reported claimable amount; authoritative, never
    /// overridden by recomputation.
    Claimable,
    /// Share-ratio over the fee-adjusted pool.
    PoolShare,
    /// Market had no shares to price against; value equals the stake.
    UnpricedInvested,
    /// The position holds no shares.
    Empty,
}

/// Computed view over one position. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionView {
    pub market_id: MarketId,
    pub total_invested: Amount,
    pub current_value: Amount,
    /// Signed: `current_value - total_invested`.
    pub pnl: Amount,
    /// Percentage of invested capital; zero when nothing was invested.
    pub pnl_percentage: Decimal,
    pub source: ValuationSource,
    /// True when any underlying wire amount failed to parse and was
    /// zeroed during decode.
    pub malformed_input: bool,
    /// True once the market has resolved; only resolved positions
    /// contribute to realized aggregates.
    pub resolved: bool,
}

/// Values positions against their markets using the contract's
/// distribution rules.
#[derive(Debug, Clone)]
pub struct Valuer {
    platform_fee_pct: Decimal,
}

impl Valuer {
    /// Create a valuer with the platform's fee percentage (0..=100).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPercentage`] for fees outside
    /// the 0..=100 range.
    pub fn new(platform_fee_pct: Decimal) -> Result<Self, ValidationError> {
        if platform_fee_pct < Decimal::ZERO || platform_fee_pct > Decimal::ONE_HUNDRED {
            return Err(ValidationError::InvalidPercentage {
                field: "platform_fee_pct",
                value: platform_fee_pct,
            });
        }
        Ok(Self { platform_fee_pct })
    }

    /// The pool fraction left for winners after the platform fee.
    fn distributable(&self, total_pool: Amount) -> Amount {
        total_pool * (Decimal::ONE - self.platform_fee_pct / Decimal::ONE_HUNDRED)
    }

    /// Value one position against its market.
    ///
    /// `claimable` is the contract-reported payout for this market, if
    /// present in the batch claimable-winnings lookup. For a resolved
    /// market it is authoritative and wins over any recomputation (the
    /// contract may apply resolution rules, such as cancelled-market
    /// refunds, that the share-ratio formula does not model).
    ///
    /// Never panics and never divides by zero; malformed inputs arrive
    /// pre-degraded to tagged zeros from the decode layer.
    #[must_use]
    pub fn value(
        &self,
        market: &Market,
        position: &Position,
        claimable: Option<Amount>,
    ) -> PositionView {
        let malformed_input = market.malformed_amounts || position.malformed_amounts;
        let invested = position.total_invested;
        let user_shares = position.total_shares();
        let market_shares = market.total_shares();

        let (current_value, source) = if user_shares.is_zero() {
            (Decimal::ZERO, ValuationSource::Empty)
        } else if market.resolved {
            match claimable {
                Some(amount) => (amount, ValuationSource::Claimable),
                // No claimable entry for a resolved market: fall back
                // to the share-ratio estimate and tag it as such.
                None => self.pool_share(invested, user_shares, market_shares, market.total_pool),
            }
        } else {
            self.pool_share(invested, user_shares, market_shares, market.total_pool)
        };

        let pnl = current_value - invested;
        let pnl_percentage = if invested > Decimal::ZERO {
            pnl / invested * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        PositionView {
            market_id: market.id,
            total_invested: invested,
            current_value,
            pnl,
            pnl_percentage,
            source,
            malformed_input,
            resolved: market.resolved,
        }
    }

    fn pool_share(
        &self,
        invested: Amount,
        user_shares: Amount,
        market_shares: Amount,
        total_pool: Amount,
    ) -> (Amount, ValuationSource) {
        if market_shares.is_zero() {
            // No market signal to re-price against.
            (invested, ValuationSource::UnpricedInvested)
        } else {
            let value = self.distributable(total_pool) * user_shares / market_shares;
            (value, ValuationSource::PoolShare)
        }
    }
}

/// Aggregates over a user's matched positions.
///
/// Realized figures sum only over resolved markets; unresolved
/// positions contribute zero to realized P&L and are excluded from the
/// win/loss denominator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioSummary {
    pub total_invested: Amount,
    pub current_value: Amount,
    pub realized_pnl: Amount,
    pub wins: u32,
    pub losses: u32,
    pub resolved_count: u32,
    /// Positions dropped because no matching market record was
    /// supplied. Excluded from every aggregate, not counted as zero.
    pub unmatched: u32,
}

impl PortfolioSummary {
    /// Win rate as a percentage of decided (non-break-even) resolved
    /// positions; `None` when nothing has resolved.
    #[must_use]
    pub fn win_rate(&self) -> Option<Decimal> {
        let decided = self.wins + self.losses;
        if decided == 0 {
            None
        } else {
            Some(Decimal::from(self.wins) / Decimal::from(decided) * Decimal::ONE_HUNDRED)
        }
    }
}

/// A user's positions with their derived views and aggregates.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub views: Vec<PositionView>,
    pub summary: PortfolioSummary,
}

/// Build a portfolio from raw records.
///
/// Every position needs a matching market in `markets`; positions
/// without one are excluded from the aggregates (and counted in
/// [`PortfolioSummary::unmatched`]) rather than valued at zero — the
/// two are different signals.
#[must_use]
pub fn build(
    valuer: &Valuer,
    positions: &[Position],
    markets: &HashMap<MarketId, Market>,
    claimables: &HashMap<MarketId, Amount>,
) -> Portfolio {
    let mut views = Vec::with_capacity(positions.len());
    let mut summary = PortfolioSummary::default();

    for position in positions {
        let Some(market) = markets.get(&position.market_id) else {
            warn!(
                market_id = position.market_id.value(),
                user = %position.user,
                "no market record for position; excluding from aggregates"
            );
            summary.unmatched += 1;
            continue;
        };

        let view = valuer.value(market, position, claimables.get(&market.id).copied());

        summary.total_invested += view.total_invested;
        summary.current_value += view.current_value;
        if view.resolved {
            summary.resolved_count += 1;
            summary.realized_pnl += view.pnl;
            if view.pnl > Decimal::ZERO {
                summary.wins += 1;
            } else if view.pnl < Decimal::ZERO {
                summary.losses += 1;
            }
        }

        views.push(view);
    }

    Portfolio { views, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{market, position, resolved_market};
    use rust_decimal_macros::dec;

    fn valuer() -> Valuer {
        Valuer::new(dec!(2.5)).unwrap()
    }

    fn weighted_market() -> Market {
        let mut m = market(1);
        m.total_option_a_shares = dec!(300);
        m.total_option_b_shares = dec!(700);
        m.total_pool = dec!(1000);
        m
    }

    #[test]
    fn valuer_rejects_out_of_range_fee() {
        assert!(Valuer::new(dec!(-1)).is_err());
        assert!(Valuer::new(dec!(101)).is_err());
        assert!(Valuer::new(dec!(0)).is_ok());
        assert!(Valuer::new(dec!(100)).is_ok());
    }

    #[test]
    fn unresolved_market_values_by_fee_adjusted_share_ratio() {
        let view = valuer().value(
            &weighted_market(),
            &position(1, dec!(150), dec!(0), dec!(150)),
            None,
        );

        // distributable = 1000 * 0.975 = 975; ratio = 150/1000
        assert_eq!(view.current_value, dec!(146.25));
        assert_eq!(view.pnl, dec!(-3.75));
        assert_eq!(view.pnl_percentage, dec!(-2.5));
        assert_eq!(view.source, ValuationSource::PoolShare);
    }

    #[test]
    fn empty_position_is_zero_valued_without_dividing() {
        let view = valuer().value(
            &weighted_market(),
            &position(1, dec!(0), dec!(0), dec!(0)),
            None,
        );

        assert_eq!(view.current_value, dec!(0));
        assert_eq!(view.pnl, dec!(0));
        assert_eq!(view.pnl_percentage, dec!(0));
        assert_eq!(view.source, ValuationSource::Empty);
    }

    #[test]
    fn zero_share_market_values_position_at_stake() {
        let mut m = market(1);
        m.total_option_a_shares = dec!(0);
        m.total_option_b_shares = dec!(0);
        m.total_pool = dec!(0);

        let view = valuer().value(&m, &position(1, dec!(50), dec!(0), dec!(50)), None);

        assert_eq!(view.current_value, dec!(50));
        assert_eq!(view.pnl, dec!(0));
        assert_eq!(view.source, ValuationSource::UnpricedInvested);
    }

    #[test]
    fn claimable_amount_overrides_recomputation_on_resolved_markets() {
        let mut m = resolved_market(1);
        // Naive share-ratio over this pool would give 468, not 500.
        m.total_option_a_shares = dec!(500);
        m.total_option_b_shares = dec!(500);
        m.total_pool = dec!(960);

        let view = valuer().value(
            &m,
            &position(1, dec!(500), dec!(0), dec!(450)),
            Some(dec!(500)),
        );

        assert_eq!(view.current_value, dec!(500));
        assert_eq!(view.source, ValuationSource::Claimable);
    }

    #[test]
    fn resolved_market_without_claimable_falls_back_to_pool_share() {
        let mut m = resolved_market(1);
        m.total_option_a_shares = dec!(300);
        m.total_option_b_shares = dec!(700);
        m.total_pool = dec!(1000);

        let view = valuer().value(&m, &position(1, dec!(150), dec!(0), dec!(150)), None);

        assert_eq!(view.current_value, dec!(146.25));
        assert_eq!(view.source, ValuationSource::PoolShare);
    }

    #[test]
    fn pnl_is_exactly_value_minus_invested() {
        let view = valuer().value(
            &weighted_market(),
            &position(1, dec!(100), dec!(25), dec!(110)),
            None,
        );
        assert_eq!(view.pnl, view.current_value - view.total_invested);
    }

    #[test]
    fn malformed_amounts_propagate_into_the_view() {
        let mut m = weighted_market();
        m.malformed_amounts = true;
        let view = valuer().value(&m, &position(1, dec!(10), dec!(0), dec!(10)), None);
        assert!(view.malformed_input);
    }

    #[test]
    fn summary_only_realizes_resolved_positions() {
        let mut resolved = resolved_market(1);
        resolved.total_option_a_shares = dec!(100);
        resolved.total_option_b_shares = dec!(100);
        resolved.total_pool = dec!(200);

        let mut open = weighted_market();
        open.id = MarketId::new(2);

        let markets: HashMap<_, _> = [(resolved.id, resolved), (open.id, open)].into();
        let claimables: HashMap<_, _> = [(MarketId::new(1), dec!(120))].into();

        let positions = vec![
            position(1, dec!(60), dec!(0), dec!(100)), // realized pnl +20
            position(2, dec!(150), dec!(0), dec!(150)), // unrealized
        ];

        let portfolio = build(&valuer(), &positions, &markets, &claimables);

        assert_eq!(portfolio.summary.resolved_count, 1);
        assert_eq!(portfolio.summary.realized_pnl, dec!(20));
        assert_eq!(portfolio.summary.wins, 1);
        assert_eq!(portfolio.summary.losses, 0);
        assert_eq!(portfolio.summary.win_rate(), Some(dec!(100)));
    }

    #[test]
    fn unmatched_positions_are_excluded_not_zeroed() {
        let markets = HashMap::new();
        let claimables = HashMap::new();
        let positions = vec![position(9, dec!(10), dec!(0), dec!(10))];

        let portfolio = build(&valuer(), &positions, &markets, &claimables);

        assert!(portfolio.views.is_empty());
        assert_eq!(portfolio.summary.unmatched, 1);
        assert_eq!(portfolio.summary.total_invested, dec!(0));
        assert_eq!(portfolio.summary.win_rate(), None);
    }

    #[test]
    fn win_rate_is_none_with_no_decided_positions() {
        assert_eq!(PortfolioSummary::default().win_rate(), None);
    }
}
