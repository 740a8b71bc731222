//! Builtin operation table.
//!
//! Cadence source bodies are embedded as opaque string assets; nothing
//! in this crate parses them. Argument shapes document the positional
//! order the contract expects and are enforced by the gateway encoder.

use super::{ArgType, OperationDefinition, OperationKind};

/// Stable operation names used by all callers.
pub mod ops {
    pub const GET_ACTIVE_MARKETS: &str = "getActiveMarkets";
    pub const GET_ALL_MARKETS: &str = "getAllMarkets";
    pub const GET_MARKET_BY_ID: &str = "getMarketById";
    pub const GET_USER_PROFILE: &str = "getUserProfile";
    pub const GET_PLATFORM_STATS: &str = "getPlatformStats";
    pub const GET_USER_POSITIONS: &str = "getUserPositions";
    pub const GET_CLAIMABLE_WINNINGS: &str = "getClaimableWinnings";
    pub const CREATE_USER_ACCOUNT: &str = "createUserAccount";
    pub const CREATE_MARKET: &str = "createMarket";
    pub const PLACE_BET: &str = "placeBet";
    pub const RESOLVE_MARKET: &str = "resolveMarket";
    pub const CLAIM_WINNINGS: &str = "claimWinnings";
}

const GET_ACTIVE_MARKETS_SRC: &str = r#"
import FlowWager from 0xFlowWager

access(all) fun main(): [FlowWager.Market] {
    return FlowWager.getActiveMarkets()
}
"#;

const GET_ALL_MARKETS_SRC: &str = r#"
import FlowWager from 0xFlowWager

access(all) fun main(): [FlowWager.Market] {
    return FlowWager.getAllMarkets()
}
"#;

const GET_MARKET_BY_ID_SRC: &str = r#"
import FlowWager from 0xFlowWager

access(all) fun main(marketId: UInt64): FlowWager.Market? {
    return FlowWager.getMarketById(marketId: marketId)
}
"#;

const GET_USER_PROFILE_SRC: &str = r#"
import FlowWager from 0xFlowWager

access(all) fun main(user: Address): FlowWager.UserProfile? {
    return FlowWager.getUserProfile(user: user)
}
"#;

const GET_PLATFORM_STATS_SRC: &str = r#"
import FlowWager from 0xFlowWager

access(all) fun main(): FlowWager.PlatformStats {
    return FlowWager.getPlatformStats()
}
"#;

const GET_USER_POSITIONS_SRC: &str = r#"
import FlowWager from 0xFlowWager

access(all) fun main(user: Address): {UInt64: FlowWager.UserPosition} {
    return FlowWager.getUserPositions(user: user)
}
"#;

const GET_CLAIMABLE_WINNINGS_SRC: &str = r#"
import FlowWager from 0xFlowWager

access(all) fun main(user: Address): {UInt64: UFix64} {
    return FlowWager.getClaimableWinnings(user: user)
}
"#;

const CREATE_USER_ACCOUNT_SRC: &str = r#"
import FlowWager from 0xFlowWager

transaction(username: String, displayName: String, bio: String, avatarUrl: String) {
    prepare(signer: auth(SaveValue, IssueStorageCapabilityController, PublishCapability) &Account) {
        FlowWager.createUserAccount(
            account: signer,
            username: username,
            displayName: displayName,
            bio: bio,
            avatarUrl: avatarUrl
        )
    }
}
"#;

const CREATE_MARKET_SRC: &str = r#"
import FlowWager from 0xFlowWager

transaction(
    title: String,
    description: String,
    category: String,
    optionA: String,
    optionB: String,
    endTime: UFix64,
    minBet: UFix64,
    maxBet: UFix64,
    imageUrl: String
) {
    prepare(signer: auth(BorrowValue) &Account) {
        let creatorRef = signer.storage.borrow<&FlowWager.UserAccount>(
            from: FlowWager.UserAccountStoragePath
        ) ?? panic("Account not initialized: run createUserAccount first")

        creatorRef.createMarket(
            title: title,
            description: description,
            category: category,
            optionA: optionA,
            optionB: optionB,
            endTime: endTime,
            minBet: minBet,
            maxBet: maxBet,
            imageUrl: imageUrl
        )
    }
}
"#;

const PLACE_BET_SRC: &str = r#"
import FlowWager from 0xFlowWager
import FungibleToken from 0xFungibleToken
import FlowToken from 0xFlowToken

transaction(marketId: UInt64, option: UInt8, amount: UFix64) {
    let payment: @{FungibleToken.Vault}
    let bettor: &FlowWager.UserAccount

    prepare(signer: auth(BorrowValue) &Account) {
        let vaultRef = signer.storage.borrow<auth(FungibleToken.Withdraw) &FlowToken.Vault>(
            from: /storage/flowTokenVault
        ) ?? panic("Insufficient funds: could not borrow FlowToken vault")
        self.payment <- vaultRef.withdraw(amount: amount)

        self.bettor = signer.storage.borrow<&FlowWager.UserAccount>(
            from: FlowWager.UserAccountStoragePath
        ) ?? panic("Account not initialized: run createUserAccount first")
    }

    execute {
        self.bettor.placeBet(marketId: marketId, option: option, payment: <-self.payment)
    }
}
"#;

const RESOLVE_MARKET_SRC: &str = r#"
import FlowWager from 0xFlowWager

transaction(marketId: UInt64, outcome: UInt8, justification: String) {
    prepare(signer: auth(BorrowValue) &Account) {
        let adminRef = signer.storage.borrow<&FlowWager.Admin>(
            from: FlowWager.AdminStoragePath
        ) ?? panic("Unauthorized: only the platform admin can resolve markets")

        adminRef.resolveMarket(
            marketId: marketId,
            outcome: outcome,
            justification: justification
        )
    }
}
"#;

const CLAIM_WINNINGS_SRC: &str = r#"
import FlowWager from 0xFlowWager

transaction(marketId: UInt64) {
    prepare(signer: auth(BorrowValue) &Account) {
        let accountRef = signer.storage.borrow<&FlowWager.UserAccount>(
            from: FlowWager.UserAccountStoragePath
        ) ?? panic("Account not initialized: run createUserAccount first")

        accountRef.claimWinnings(marketId: marketId)
    }
}
"#;

/// The full builtin operation table, one entry per named operation.
pub(crate) fn builtin() -> Vec<OperationDefinition> {
    use ArgType::{Address, String, UFix64, UInt64, UInt8};

    vec![
        OperationDefinition {
            name: ops::GET_ACTIVE_MARKETS,
            kind: OperationKind::Query,
            source: GET_ACTIVE_MARKETS_SRC,
            args: &[],
        },
        OperationDefinition {
            name: ops::GET_ALL_MARKETS,
            kind: OperationKind::Query,
            source: GET_ALL_MARKETS_SRC,
            args: &[],
        },
        OperationDefinition {
            name: ops::GET_MARKET_BY_ID,
            kind: OperationKind::Query,
            source: GET_MARKET_BY_ID_SRC,
            args: &[UInt64],
        },
        OperationDefinition {
            name: ops::GET_USER_PROFILE,
            kind: OperationKind::Query,
            source: GET_USER_PROFILE_SRC,
            args: &[Address],
        },
        OperationDefinition {
            name: ops::GET_PLATFORM_STATS,
            kind: OperationKind::Query,
            source: GET_PLATFORM_STATS_SRC,
            args: &[],
        },
        OperationDefinition {
            name: ops::GET_USER_POSITIONS,
            kind: OperationKind::Query,
            source: GET_USER_POSITIONS_SRC,
            args: &[Address],
        },
        OperationDefinition {
            name: ops::GET_CLAIMABLE_WINNINGS,
            kind: OperationKind::Query,
            source: GET_CLAIMABLE_WINNINGS_SRC,
            args: &[Address],
        },
        OperationDefinition {
            name: ops::CREATE_USER_ACCOUNT,
            kind: OperationKind::Transaction,
            source: CREATE_USER_ACCOUNT_SRC,
            args: &[String, String, String, String],
        },
        OperationDefinition {
            name: ops::CREATE_MARKET,
            kind: OperationKind::Transaction,
            source: CREATE_MARKET_SRC,
            args: &[
                String, String, String, String, String, UFix64, UFix64, UFix64, String,
            ],
        },
        OperationDefinition {
            name: ops::PLACE_BET,
            kind: OperationKind::Transaction,
            source: PLACE_BET_SRC,
            args: &[UInt64, UInt8, UFix64],
        },
        OperationDefinition {
            name: ops::RESOLVE_MARKET,
            kind: OperationKind::Transaction,
            source: RESOLVE_MARKET_SRC,
            args: &[UInt64, UInt8, String],
        },
        OperationDefinition {
            name: ops::CLAIM_WINNINGS,
            kind: OperationKind::Transaction,
            source: CLAIM_WINNINGS_SRC,
            args: &[UInt64],
        },
    ]
}
