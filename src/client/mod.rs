//! Typed client façade over the registry, gateway, and valuer.
//!
//! One method per registered operation. Query methods resolve the
//! operation through the memo cache, encode arguments, execute, and
//! decode. Mutation methods run local precondition checks before any
//! network call, then submit and wait for the seal: success is only
//! reported after the chain confirms the effect durable.

mod decode;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use crate::domain::{
    Address, Amount, Market, MarketId, MarketOutcome, PlatformStats, Position, UserProfile,
};
use crate::error::{Error, RegistryError, Result, ValidationError};
use crate::gateway::{Argument, ChainGateway, Settlement, Signer};
use crate::portfolio::{self, Portfolio, Valuer};
use crate::registry::{ops, OperationCache, OperationKind, OperationRegistry};

/// Which outcome option a bet backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetSide {
    OptionA,
    OptionB,
}

impl BetSide {
    /// The contract's option discriminant.
    #[must_use]
    pub const fn selector(&self) -> u8 {
        match self {
            BetSide::OptionA => 0,
            BetSide::OptionB => 1,
        }
    }
}

/// Inputs for `createMarket`.
#[derive(Debug, Clone)]
pub struct MarketDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub option_a: String,
    pub option_b: String,
    pub end_time: chrono::DateTime<Utc>,
    pub min_bet: Amount,
    pub max_bet: Amount,
    pub image_url: String,
}

/// Inputs for `createUserAccount`.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
}

/// A user's raw positions together with their derived views.
///
/// Rebuilt from fresh chain records on every call; nothing here is a
/// source of truth.
#[derive(Debug, Clone)]
pub struct PositionsReport {
    pub positions: Vec<Position>,
    pub portfolio: Portfolio,
}

/// Client for the FlowWager contract.
pub struct FlowWager {
    cache: OperationCache,
    gateway: Arc<dyn ChainGateway>,
    valuer: Valuer,
}

impl FlowWager {
    /// Create a client over an explicit registry and gateway.
    ///
    /// # Errors
    ///
    /// Rejects a platform fee outside 0..=100.
    pub fn new(
        registry: OperationRegistry,
        gateway: Arc<dyn ChainGateway>,
        platform_fee_pct: Decimal,
    ) -> Result<Self> {
        Ok(Self {
            cache: OperationCache::new(Arc::new(registry)),
            gateway,
            valuer: Valuer::new(platform_fee_pct)?,
        })
    }

    /// Create a client with the builtin operation table.
    ///
    /// # Errors
    ///
    /// Rejects a platform fee outside 0..=100.
    pub fn with_builtin(
        gateway: Arc<dyn ChainGateway>,
        platform_fee_pct: Decimal,
    ) -> Result<Self> {
        Self::new(OperationRegistry::builtin(), gateway, platform_fee_pct)
    }

    /// The operation cache (test/dev hook for forcing re-resolution).
    #[must_use]
    pub fn operation_cache(&self) -> &OperationCache {
        &self.cache
    }

    async fn run_query(&self, name: &str, arguments: &[Argument]) -> Result<Value> {
        let operation = self.cache.get(name)?;
        if operation.kind != OperationKind::Query {
            return Err(Error::Registry(RegistryError::WrongKind {
                name: name.to_string(),
                expected: OperationKind::Query.as_str(),
                actual: operation.kind.as_str(),
            }));
        }
        Ok(self.gateway.execute_script(operation.source, arguments).await?)
    }

    async fn run_transaction(
        &self,
        name: &str,
        arguments: &[Argument],
        signer: &dyn Signer,
    ) -> Result<Settlement> {
        let operation = self.cache.get(name)?;
        if operation.kind != OperationKind::Transaction {
            return Err(Error::Registry(RegistryError::WrongKind {
                name: name.to_string(),
                expected: OperationKind::Transaction.as_str(),
                actual: operation.kind.as_str(),
            }));
        }

        let pending = self
            .gateway
            .send_transaction(operation.source, arguments, signer)
            .await?;
        let settlement = self.gateway.wait_for_seal(&pending).await?;
        // Money movement: a non-sealed terminal must surface as an
        // error, never as silent success.
        let settlement = settlement.ensure_sealed()?;
        info!(operation = name, tx_id = %settlement.tx_id, "transaction sealed");
        Ok(settlement)
    }

    // --- Queries ---

    /// Markets currently open for betting.
    pub async fn active_markets(&self) -> Result<Vec<Market>> {
        let value = self.run_query(ops::GET_ACTIVE_MARKETS, &[]).await?;
        Ok(decode::decode_markets(value)?)
    }

    /// Every market the contract knows about.
    pub async fn all_markets(&self) -> Result<Vec<Market>> {
        let value = self.run_query(ops::GET_ALL_MARKETS, &[]).await?;
        Ok(decode::decode_markets(value)?)
    }

    /// One market by id, or `None` when it does not exist.
    pub async fn market(&self, market_id: MarketId) -> Result<Option<Market>> {
        let value = self
            .run_query(ops::GET_MARKET_BY_ID, &[Argument::UInt64(market_id.value())])
            .await?;
        Ok(decode::decode_optional_market(value)?)
    }

    /// A user's on-chain profile, or `None` before account setup.
    pub async fn user_profile(&self, user: &Address) -> Result<Option<UserProfile>> {
        let value = self
            .run_query(ops::GET_USER_PROFILE, &[Argument::Address(user.clone())])
            .await?;
        Ok(decode::decode_optional_profile(value)?)
    }

    /// Aggregate platform statistics.
    pub async fn platform_stats(&self) -> Result<PlatformStats> {
        let value = self.run_query(ops::GET_PLATFORM_STATS, &[]).await?;
        Ok(decode::decode_platform_stats(value)?)
    }

    /// Contract-computed claimable winnings per resolved market.
    pub async fn claimable_winnings(&self, user: &Address) -> Result<HashMap<MarketId, Amount>> {
        let value = self
            .run_query(
                ops::GET_CLAIMABLE_WINNINGS,
                &[Argument::Address(user.clone())],
            )
            .await?;
        Ok(decode::decode_claimables(value)?)
    }

    /// A user's positions with freshly derived financial views.
    ///
    /// Fetches positions, the market set, and the claimable batch, then
    /// recomputes every derived value. Positions whose market record is
    /// missing are excluded from aggregates rather than zero-valued.
    pub async fn user_positions(&self, user: &Address) -> Result<PositionsReport> {
        let value = self
            .run_query(ops::GET_USER_POSITIONS, &[Argument::Address(user.clone())])
            .await?;
        let positions = decode::decode_positions(value, user)?;

        let markets: HashMap<MarketId, Market> = self
            .all_markets()
            .await?
            .into_iter()
            .map(|market| (market.id, market))
            .collect();
        let claimables = self.claimable_winnings(user).await?;

        let portfolio = portfolio::build(&self.valuer, &positions, &markets, &claimables);
        Ok(PositionsReport {
            positions,
            portfolio,
        })
    }

    // --- Transactions ---

    /// Set up the signer's FlowWager account.
    pub async fn create_account(
        &self,
        signer: &dyn Signer,
        profile: NewProfile,
    ) -> Result<Settlement> {
        if profile.username.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "username" }.into());
        }

        self.run_transaction(
            ops::CREATE_USER_ACCOUNT,
            &[
                Argument::String(profile.username),
                Argument::String(profile.display_name),
                Argument::String(profile.bio),
                Argument::String(profile.avatar_url),
            ],
            signer,
        )
        .await
    }

    /// Create a market from a validated draft.
    pub async fn create_market(
        &self,
        signer: &dyn Signer,
        draft: MarketDraft,
    ) -> Result<Settlement> {
        validate_draft(&draft)?;

        self.run_transaction(
            ops::CREATE_MARKET,
            &[
                Argument::String(draft.title),
                Argument::String(draft.description),
                Argument::String(draft.category),
                Argument::String(draft.option_a),
                Argument::String(draft.option_b),
                Argument::UFix64(Decimal::from(draft.end_time.timestamp())),
                Argument::UFix64(draft.min_bet),
                Argument::UFix64(draft.max_bet),
                Argument::String(draft.image_url),
            ],
            signer,
        )
        .await
    }

    /// Place a bet on one side of a market.
    ///
    /// Re-fetches the market first so the precondition checks run
    /// against current chain state, then validates locally before any
    /// mutation is submitted.
    pub async fn place_bet(
        &self,
        signer: &dyn Signer,
        market_id: MarketId,
        side: BetSide,
        amount: Amount,
    ) -> Result<Settlement> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount { amount }.into());
        }

        let market = self
            .market(market_id)
            .await?
            .ok_or(ValidationError::UnknownMarket { market_id })?;

        if !market.is_open_for_betting(Utc::now()) {
            return Err(ValidationError::MarketClosed { market_id }.into());
        }
        if amount < market.min_bet {
            return Err(ValidationError::BetBelowMinimum {
                amount,
                min: market.min_bet,
            }
            .into());
        }
        if amount > market.max_bet {
            return Err(ValidationError::BetAboveMaximum {
                amount,
                max: market.max_bet,
            }
            .into());
        }

        self.run_transaction(
            ops::PLACE_BET,
            &[
                Argument::UInt64(market_id.value()),
                Argument::UInt8(side.selector()),
                Argument::UFix64(amount),
            ],
            signer,
        )
        .await
    }

    /// Resolve a market (admin capability required on-chain).
    pub async fn resolve_market(
        &self,
        signer: &dyn Signer,
        market_id: MarketId,
        outcome: MarketOutcome,
        justification: String,
    ) -> Result<Settlement> {
        if justification.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "justification",
            }
            .into());
        }

        self.run_transaction(
            ops::RESOLVE_MARKET,
            &[
                Argument::UInt64(market_id.value()),
                Argument::UInt8(outcome.selector()),
                Argument::String(justification),
            ],
            signer,
        )
        .await
    }

    /// Withdraw winnings for a resolved market.
    pub async fn claim_winnings(
        &self,
        signer: &dyn Signer,
        market_id: MarketId,
    ) -> Result<Settlement> {
        self.run_transaction(
            ops::CLAIM_WINNINGS,
            &[Argument::UInt64(market_id.value())],
            signer,
        )
        .await
    }
}

fn validate_draft(draft: &MarketDraft) -> std::result::Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "title" });
    }
    if draft.option_a.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "option_a" });
    }
    if draft.option_b.trim().is_empty() {
        return Err(ValidationError::MissingField { field: "option_b" });
    }
    if draft.min_bet <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount {
            amount: draft.min_bet,
        });
    }
    if draft.min_bet > draft.max_bet {
        return Err(ValidationError::InvertedBetBounds {
            min: draft.min_bet,
            max: draft.max_bet,
        });
    }
    if draft.end_time <= Utc::now() {
        return Err(ValidationError::EndTimeInPast {
            end_time: draft.end_time.timestamp(),
        });
    }
    Ok(())
}

/// The identity of a market created by a sealed `createMarket`
/// transaction, extracted from its `MarketCreated` event.
#[must_use]
pub fn created_market_id(settlement: &Settlement) -> Option<MarketId> {
    settlement
        .events
        .iter()
        .find(|event| event.kind.ends_with("MarketCreated"))
        .and_then(|event| event.payload.get("marketId"))
        .and_then(Value::as_u64)
        .map(MarketId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SealStatus;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn draft() -> MarketDraft {
        MarketDraft {
            title: "Will it ship this quarter?".to_string(),
            description: String::new(),
            category: "tech".to_string(),
            option_a: "Yes".to_string(),
            option_b: "No".to_string(),
            end_time: Utc::now() + Duration::days(7),
            min_bet: dec!(1),
            max_bet: dec!(500),
            image_url: String::new(),
        }
    }

    #[test]
    fn bet_side_selectors() {
        assert_eq!(BetSide::OptionA.selector(), 0);
        assert_eq!(BetSide::OptionB.selector(), 1);
    }

    #[test]
    fn draft_validation_accepts_well_formed_input() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn draft_validation_rejects_empty_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert_eq!(
            validate_draft(&d),
            Err(ValidationError::MissingField { field: "title" })
        );
    }

    #[test]
    fn draft_validation_rejects_inverted_bounds() {
        let mut d = draft();
        d.min_bet = dec!(100);
        d.max_bet = dec!(10);
        assert!(matches!(
            validate_draft(&d),
            Err(ValidationError::InvertedBetBounds { .. })
        ));
    }

    #[test]
    fn draft_validation_rejects_past_end_time() {
        let mut d = draft();
        d.end_time = Utc::now() - Duration::hours(1);
        assert!(matches!(
            validate_draft(&d),
            Err(ValidationError::EndTimeInPast { .. })
        ));
    }

    #[test]
    fn created_market_id_reads_the_market_created_event() {
        use crate::gateway::{SealStatus, SettlementEvent};

        let settlement = Settlement {
            tx_id: "tx-1".to_string(),
            status: SealStatus::Sealed,
            events: vec![SettlementEvent {
                kind: "A.0xFlowWager.FlowWager.MarketCreated".to_string(),
                payload: serde_json::json!({"marketId": 17}),
            }],
        };

        assert_eq!(created_market_id(&settlement), Some(MarketId::new(17)));
    }

    #[test]
    fn created_market_id_is_none_without_the_event() {
        let settlement = Settlement {
            tx_id: "tx-1".to_string(),
            status: SealStatus::Sealed,
            events: vec![],
        };
        assert_eq!(created_market_id(&settlement), None);
    }
}
