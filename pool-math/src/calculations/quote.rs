use super::pool_odds::post_odds_multiple;
use super::{round2, round_to};
use crate::types::{
    Entry, ExistingPosition, PoolInput, QuoteSide, QuoteSnapshot, StakeMode, StakeQuote,
    DEFAULT_CREATOR_FEE_BPS, DEFAULT_PLATFORM_FEE_BPS,
};

pub const DEFAULT_PRICING_MODEL: &str = "pool_parimutuel";
pub const QUOTE_DISCLAIMER: &str = "Estimated; final payout depends on final pools at close.";

/// Non-finite becomes 0, negatives clamp to 0
fn sanitize(x: f64) -> f64 {
    if x.is_finite() {
        x.max(0.0)
    } else {
        0.0
    }
}

/// Combined fee in bps from percentage settings (2.5 -> 250).
/// Missing or non-finite values fall back to 250 platform + 100 creator.
pub fn derive_fee_bps(platform_fee_pct: Option<f64>, creator_fee_pct: Option<f64>) -> f64 {
    let to_bps = |pct: Option<f64>, default: f64| match pct {
        Some(p) if p.is_finite() => (p * 100.0).round(),
        _ => default,
    };
    to_bps(platform_fee_pct, DEFAULT_PLATFORM_FEE_BPS)
        + to_bps(creator_fee_pct, DEFAULT_CREATOR_FEE_BPS)
}

/// Pick out what the user already holds on the market for the given mode
pub fn existing_position_for_quote(
    entries: &[Entry],
    outcome_id: &str,
    mode: StakeMode,
) -> ExistingPosition {
    let relevant: Vec<&Entry> = entries
        .iter()
        .filter(|e| mode.includes_provider(e.provider.as_deref()))
        .collect();

    let same_outcome: Vec<&Entry> = relevant
        .iter()
        .copied()
        .filter(|e| e.option_id == outcome_id)
        .collect();

    let same_outcome_stake: f64 = same_outcome.iter().map(|e| sanitize(e.amount)).sum();

    ExistingPosition {
        same_outcome_entry: same_outcome.first().map(|e| (*e).clone()),
        same_outcome_stake: round2(same_outcome_stake),
        other_outcome_entry: relevant
            .iter()
            .find(|e| e.option_id != outcome_id)
            .map(|e| (*e).clone()),
    }
}

/// "Current vs after" quote for adding `amount` to an existing position.
///
/// `current` prices the pool as it stands (stake 0), `after` includes the new
/// amount. Money is rounded to cents and multiples to 6 dp for display.
pub fn build_stake_quote(snapshot: &QuoteSnapshot) -> StakeQuote {
    let total = sanitize(snapshot.total_pool);
    let selected = sanitize(snapshot.option_pool);
    let existing = sanitize(snapshot.existing_position_stake);
    let amount = sanitize(snapshot.amount);

    let pool = PoolInput::new(total, selected, 0.0, snapshot.fee_bps);
    let current_multiple = post_odds_multiple(&pool);
    let after_multiple = post_odds_multiple(&pool.with_stake(amount));

    let after_stake_total = existing + amount;
    let est_payout = |stake: f64, multiple: Option<f64>| {
        multiple.map(|m| round2(stake * m)).unwrap_or(0.0)
    };

    StakeQuote {
        market_id: snapshot.market_id.clone(),
        outcome_id: snapshot.outcome_id.clone(),
        amount: round2(amount),
        pricing_model: snapshot
            .pricing_model
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_PRICING_MODEL.to_string()),
        current: QuoteSide {
            user_stake: round2(existing),
            odds_or_price: current_multiple.map(|m| round_to(m, 6)),
            est_payout: est_payout(existing, current_multiple),
        },
        after: QuoteSide {
            user_stake: round2(after_stake_total),
            odds_or_price: after_multiple.map(|m| round_to(m, 6)),
            est_payout: est_payout(after_stake_total, after_multiple),
        },
        disclaimer: QUOTE_DISCLAIMER.to_string(),
    }
}
