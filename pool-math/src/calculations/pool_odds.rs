// Pari-mutuel odds from pool totals

use crate::types::{PoolInput, BPS_DENOMINATOR};

fn is_valid_amount(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

pub(crate) fn is_valid_fee_bps(bps: f64) -> bool {
    bps.is_finite() && (0.0..=BPS_DENOMINATOR).contains(&bps)
}

/// Validated pool totals after the candidate stake has been added
struct PostBetPool {
    total_after: f64,
    option_after: f64,
    distributable: f64,
}

fn post_bet_pool(input: &PoolInput) -> Option<PostBetPool> {
    let PoolInput {
        total_pool,
        option_pool,
        stake,
        fee_bps,
    } = *input;

    if !is_valid_amount(total_pool) || !is_valid_amount(option_pool) || !is_valid_amount(stake) {
        return None;
    }
    if !is_valid_fee_bps(fee_bps) || option_pool > total_pool {
        return None;
    }

    let total_after = total_pool + stake;
    let option_after = option_pool + stake;
    if option_after <= 0.0 || !total_after.is_finite() {
        return None;
    }

    // Fee comes out of the losing side only; winners always get their own stake back
    let losing_after = total_after - option_after;
    let distributable = option_after + losing_after * (1.0 - fee_bps / BPS_DENOMINATOR);

    Some(PostBetPool {
        total_after,
        option_after,
        distributable,
    })
}

/// Current payout multiple for an option before any new stake: total / option.
///
/// Returns None if:
/// - Either pool is negative or non-finite
/// - The option has no stakes yet (no meaningful odds)
///
/// An empty total pool yields 0.
pub fn pre_odds_multiple(total_pool: f64, option_pool: f64) -> Option<f64> {
    if !is_valid_amount(total_pool) || !is_valid_amount(option_pool) {
        return None;
    }
    if option_pool <= 0.0 {
        return None;
    }
    if total_pool == 0.0 {
        return Some(0.0);
    }

    let multiple = total_pool / option_pool;
    multiple.is_finite().then_some(multiple)
}

/// Payout multiple for an option once `stake` has been added to it.
///
/// With T' = total + stake and W' = option + stake:
/// Formula: (W' + (T' - W') * (1 - fee_bps / 10000)) / W'
///
/// This is the multiple a bettor placing `stake` now would receive. The pre-bet
/// multiple overstates it because it ignores the bettor's own contribution to W'.
/// Returns None on invalid input or when W' is zero.
pub fn post_odds_multiple(input: &PoolInput) -> Option<f64> {
    let pool = post_bet_pool(input)?;
    let multiple = pool.distributable / pool.option_after;
    multiple.is_finite().then_some(multiple)
}

/// Amount available to winners after fees, once `stake` has been added
pub fn distributable_pool(input: &PoolInput) -> Option<f64> {
    post_bet_pool(input).map(|pool| pool.distributable)
}

/// Total pool after the candidate stake is added
pub fn total_pool_after(input: &PoolInput) -> Option<f64> {
    post_bet_pool(input).map(|pool| pool.total_after)
}

/// Display helper; the calculator itself never rounds.
pub fn format_multiple(multiple: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, multiple)
}

pub fn format_multiple_default(multiple: f64) -> String {
    format_multiple(multiple, 2)
}
