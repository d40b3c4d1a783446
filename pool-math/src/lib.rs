//! Pari-mutuel pool odds, payout previews and settlement payouts.
//!
//! Everything here is plain arithmetic over caller-supplied numbers: no I/O,
//! no shared state. Degenerate or invalid input yields `None` (or a
//! [`SettlementError`] for settlement), never NaN or a panic.

pub mod calculations;
pub mod error;
pub mod types;

pub use calculations::pool_odds::{
    distributable_pool, format_multiple, format_multiple_default, post_odds_multiple,
    pre_odds_multiple, total_pool_after,
};
pub use calculations::preview::payout_preview;
pub use calculations::quote::{build_stake_quote, derive_fee_bps, existing_position_for_quote};
pub use calculations::settlement::{calculate_payouts, calculate_rail_payouts};
pub use calculations::{round2, round_to};
pub use error::SettlementError;
pub use types::*;
