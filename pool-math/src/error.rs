use thiserror::Error;

/// Malformed settlement input. The odds functions never error; they return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("entry for user {user_id} has invalid amount {amount}")]
    InvalidAmount { user_id: String, amount: f64 },

    #[error("{name} must be within 0..=10000 bps, got {bps}")]
    InvalidFeeBps { name: &'static str, bps: f64 },

    #[error("combined fee of {total_bps} bps exceeds 10000")]
    FeeExceedsPool { total_bps: f64 },
}
