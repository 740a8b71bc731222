//! Decoding of raw chain query results into domain records.
//!
//! Wire amounts are decimal strings; they are parsed through
//! [`ParsedAmount`] so a malformed field degrades to a tagged zero
//! instead of failing the whole fetch. Structural problems (missing
//! fields, wrong types) are still hard decode errors.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{
    Address, Amount, Market, MarketId, MarketOutcome, MarketStatus, ParsedAmount, PlatformStats,
    Position, UserProfile,
};
use crate::error::GatewayError;

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMarket {
    id: u64,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    option_a: String,
    option_b: String,
    creator: String,
    status: MarketStatus,
    resolved: bool,
    #[serde(default)]
    outcome: Option<MarketOutcome>,
    total_option_a_shares: String,
    total_option_b_shares: String,
    total_pool: String,
    min_bet: String,
    max_bet: String,
    end_time: i64,
    created_at: i64,
    #[serde(default)]
    image_url: String,
}

impl RawMarket {
    fn into_market(self) -> Market {
        let total_a = ParsedAmount::parse(&self.total_option_a_shares);
        let total_b = ParsedAmount::parse(&self.total_option_b_shares);
        let pool = ParsedAmount::parse(&self.total_pool);
        let min_bet = ParsedAmount::parse(&self.min_bet);
        let max_bet = ParsedAmount::parse(&self.max_bet);
        let malformed = [&total_a, &total_b, &pool, &min_bet, &max_bet]
            .iter()
            .any(|parsed| parsed.is_malformed());
        if malformed {
            warn!(market_id = self.id, "market record carried malformed amounts; zeroed");
        }

        Market {
            id: MarketId::new(self.id),
            title: self.title,
            description: self.description,
            category: self.category,
            option_a: self.option_a,
            option_b: self.option_b,
            creator: Address::new(self.creator),
            status: self.status,
            resolved: self.resolved,
            outcome: self.outcome,
            total_option_a_shares: total_a.value(),
            total_option_b_shares: total_b.value(),
            total_pool: pool.value(),
            min_bet: min_bet.value(),
            max_bet: max_bet.value(),
            end_time: timestamp(self.end_time),
            created_at: timestamp(self.created_at),
            image_url: self.image_url,
            malformed_amounts: malformed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPosition {
    option_a_shares: String,
    option_b_shares: String,
    total_invested: String,
    #[serde(default)]
    claimed: bool,
}

impl RawPosition {
    fn into_position(self, user: &Address, market_id: MarketId) -> Position {
        let a_shares = ParsedAmount::parse(&self.option_a_shares);
        let b_shares = ParsedAmount::parse(&self.option_b_shares);
        let invested = ParsedAmount::parse(&self.total_invested);
        let malformed = [&a_shares, &b_shares, &invested]
            .iter()
            .any(|parsed| parsed.is_malformed());
        if malformed {
            warn!(
                market_id = market_id.value(),
                "position record carried malformed amounts; zeroed"
            );
        }

        Position {
            user: user.clone(),
            market_id,
            option_a_shares: a_shares.value(),
            option_b_shares: b_shares.value(),
            total_invested: invested.value(),
            claimed: self.claimed,
            malformed_amounts: malformed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlatformStats {
    total_markets: u64,
    active_markets: u64,
    total_users: u64,
    total_volume: String,
    platform_fee_pct: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUserProfile {
    address: String,
    username: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    avatar_url: String,
    joined_at: i64,
}

fn market_key(key: &str) -> Result<MarketId, GatewayError> {
    key.parse::<u64>().map(MarketId::new).map_err(|_| {
        GatewayError::Decode(serde_json::Error::custom(format!(
            "non-numeric market id key '{key}'"
        )))
    })
}

pub(crate) fn decode_markets(value: Value) -> Result<Vec<Market>, GatewayError> {
    let raw: Vec<RawMarket> = serde_json::from_value(value)?;
    Ok(raw.into_iter().map(RawMarket::into_market).collect())
}

pub(crate) fn decode_optional_market(value: Value) -> Result<Option<Market>, GatewayError> {
    let raw: Option<RawMarket> = serde_json::from_value(value)?;
    Ok(raw.map(RawMarket::into_market))
}

pub(crate) fn decode_positions(
    value: Value,
    user: &Address,
) -> Result<Vec<Position>, GatewayError> {
    let raw: HashMap<String, RawPosition> = serde_json::from_value(value)?;
    let mut positions = Vec::with_capacity(raw.len());
    for (key, position) in raw {
        positions.push(position.into_position(user, market_key(&key)?));
    }
    positions.sort_by_key(|position| position.market_id);
    Ok(positions)
}

pub(crate) fn decode_claimables(value: Value) -> Result<HashMap<MarketId, Amount>, GatewayError> {
    let raw: HashMap<String, String> = serde_json::from_value(value)?;
    let mut claimables = HashMap::with_capacity(raw.len());
    for (key, amount) in raw {
        let market_id = market_key(&key)?;
        let parsed = ParsedAmount::parse(&amount);
        if parsed.is_malformed() {
            // An unusable claimable entry is dropped, not zeroed: the
            // valuer then falls back to its share-ratio estimate.
            warn!(
                market_id = market_id.value(),
                raw = %amount,
                "dropping malformed claimable amount"
            );
            continue;
        }
        claimables.insert(market_id, parsed.value());
    }
    Ok(claimables)
}

pub(crate) fn decode_platform_stats(value: Value) -> Result<PlatformStats, GatewayError> {
    let raw: RawPlatformStats = serde_json::from_value(value)?;
    Ok(PlatformStats {
        total_markets: raw.total_markets,
        active_markets: raw.active_markets,
        total_users: raw.total_users,
        total_volume: ParsedAmount::parse(&raw.total_volume).value(),
        platform_fee_pct: ParsedAmount::parse(&raw.platform_fee_pct).value(),
    })
}

pub(crate) fn decode_optional_profile(value: Value) -> Result<Option<UserProfile>, GatewayError> {
    let raw: Option<RawUserProfile> = serde_json::from_value(value)?;
    Ok(raw.map(|profile| UserProfile {
        address: Address::new(profile.address),
        username: profile.username,
        display_name: profile.display_name,
        bio: profile.bio,
        avatar_url: profile.avatar_url,
        joined_at: timestamp(profile.joined_at),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn market_json(id: u64) -> Value {
        json!({
            "id": id,
            "title": "Will FLOW close above $1?",
            "description": "Price market",
            "category": "crypto",
            "optionA": "Yes",
            "optionB": "No",
            "creator": "0x01",
            "status": 0,
            "resolved": false,
            "outcome": null,
            "totalOptionAShares": "300.00000000",
            "totalOptionBShares": "700.00000000",
            "totalPool": "1000.00000000",
            "minBet": "1.00000000",
            "maxBet": "500.00000000",
            "endTime": 1_735_689_600,
            "createdAt": 1_704_067_200,
            "imageUrl": ""
        })
    }

    #[test]
    fn decodes_market_list() {
        let markets = decode_markets(json!([market_json(1), market_json(2)])).unwrap();
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[0].id, MarketId::new(1));
        assert_eq!(markets[0].total_pool, dec!(1000));
        assert_eq!(markets[0].status, MarketStatus::Active);
        assert!(!markets[0].malformed_amounts);
    }

    #[test]
    fn malformed_amount_degrades_to_flagged_zero() {
        let mut raw = market_json(1);
        raw["totalPool"] = json!("banana");
        let market = decode_optional_market(raw).unwrap().unwrap();
        assert_eq!(market.total_pool, dec!(0));
        assert!(market.malformed_amounts);
    }

    #[test]
    fn unknown_status_discriminant_is_a_hard_decode_error() {
        let mut raw = market_json(1);
        raw["status"] = json!(9);
        assert!(decode_optional_market(raw).is_err());
    }

    #[test]
    fn null_market_decodes_to_none() {
        assert!(decode_optional_market(json!(null)).unwrap().is_none());
    }

    #[test]
    fn decodes_positions_keyed_by_market_id() {
        let user = Address::new("0x02");
        let positions = decode_positions(
            json!({
                "3": {
                    "optionAShares": "150.00000000",
                    "optionBShares": "0.00000000",
                    "totalInvested": "150.00000000",
                    "claimed": false
                }
            }),
            &user,
        )
        .unwrap();

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].market_id, MarketId::new(3));
        assert_eq!(positions[0].option_a_shares, dec!(150));
        assert_eq!(positions[0].user, user);
    }

    #[test]
    fn non_numeric_position_key_is_a_decode_error() {
        let result = decode_positions(
            json!({"not-a-number": {
                "optionAShares": "0",
                "optionBShares": "0",
                "totalInvested": "0"
            }}),
            &Address::new("0x02"),
        );
        assert!(matches!(result, Err(GatewayError::Decode(_))));
    }

    #[test]
    fn malformed_claimable_entries_are_dropped() {
        let claimables = decode_claimables(json!({
            "1": "500.00000000",
            "2": "garbage"
        }))
        .unwrap();

        assert_eq!(claimables.get(&MarketId::new(1)), Some(&dec!(500)));
        assert!(!claimables.contains_key(&MarketId::new(2)));
    }

    #[test]
    fn decodes_platform_stats() {
        let stats = decode_platform_stats(json!({
            "totalMarkets": 12,
            "activeMarkets": 4,
            "totalUsers": 100,
            "totalVolume": "25000.00000000",
            "platformFeePct": "2.50000000"
        }))
        .unwrap();

        assert_eq!(stats.total_markets, 12);
        assert_eq!(stats.platform_fee_pct, dec!(2.5));
    }

    #[test]
    fn decodes_optional_profile() {
        let profile = decode_optional_profile(json!({
            "address": "0x02",
            "username": "alice",
            "displayName": "Alice",
            "bio": "",
            "avatarUrl": "",
            "joinedAt": 1_704_067_200
        }))
        .unwrap()
        .unwrap();

        assert_eq!(profile.username, "alice");
        assert_eq!(profile.address.as_str(), "0x02");
    }
}
