//! Chain-record domain types.

mod id;
mod market;
mod money;
mod position;
mod stats;

// Core domain types
pub use id::{Address, MarketId};
pub use market::{Market, MarketOutcome, MarketStatus};
pub use money::{
    format_ufix64, parse_ufix64, Amount, ParseAmountError, ParsedAmount, UFIX64_SCALE,
};
pub use position::Position;
pub use stats::{PlatformStats, UserProfile};
