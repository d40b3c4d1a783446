// Settlement payouts for a single rail.
// Fees are charged on LOSING stakes only, never on the total pot.

use super::pool_odds::is_valid_fee_bps;
use super::round2;
use crate::error::SettlementError;
use crate::types::{Entry, FeeConfig, Rail, SettlementResult, BPS_DENOMINATOR};
use std::collections::BTreeMap;
use tracing::warn;

/// Slack allowed between the payout sum and the distributable pot
const PAYOUT_TOLERANCE: f64 = 0.01;

struct CentAllocation {
    user_id: String,
    cents: i64,
    remainder: f64, // Fractional cents dropped by the floor
}

fn validate(entries: &[&Entry], fee_config: &FeeConfig) -> Result<(), SettlementError> {
    for (name, bps) in [
        ("platform fee", fee_config.platform_fee_bps),
        ("creator fee", fee_config.creator_fee_bps),
    ] {
        if !is_valid_fee_bps(bps) {
            return Err(SettlementError::InvalidFeeBps { name, bps });
        }
    }
    if fee_config.total_bps() > BPS_DENOMINATOR {
        return Err(SettlementError::FeeExceedsPool {
            total_bps: fee_config.total_bps(),
        });
    }

    if let Some(bad) = entries
        .iter()
        .find(|e| !e.amount.is_finite() || e.amount < 0.0)
    {
        return Err(SettlementError::InvalidAmount {
            user_id: bad.user_id.clone(),
            amount: bad.amount,
        });
    }
    Ok(())
}

/// Calculate fees and per-user payouts for one rail of a resolved market.
///
/// `provider_match` selects the entries that belong to the rail. Winners split
/// the distributable pot proportionally to their stake, in whole cents; the
/// cents lost to flooring go one at a time to the largest remainders, ties
/// broken by user id, so the outcome is identical across runs.
pub fn calculate_payouts<F>(
    entries: &[Entry],
    winning_option_id: &str,
    fee_config: &FeeConfig,
    rail: Rail,
    provider_match: F,
) -> Result<SettlementResult, SettlementError>
where
    F: Fn(&str) -> bool,
{
    let rail_entries: Vec<&Entry> = entries
        .iter()
        .filter(|e| provider_match(e.provider()))
        .collect();

    validate(&rail_entries, fee_config)?;

    if rail_entries.is_empty() {
        return Ok(SettlementResult::empty(rail));
    }

    let total_pot: f64 = rail_entries.iter().map(|e| e.amount).sum();
    let (winners, losers): (Vec<&Entry>, Vec<&Entry>) = rail_entries
        .iter()
        .copied()
        .partition(|e| e.option_id == winning_option_id);

    let winners_stake_total: f64 = winners.iter().map(|e| e.amount).sum();
    let losers_stake_total: f64 = losers.iter().map(|e| e.amount).sum();

    let platform_fee = round2(losers_stake_total * fee_config.platform_fee_bps / BPS_DENOMINATOR);
    let creator_fee = round2(losers_stake_total * fee_config.creator_fee_bps / BPS_DENOMINATOR);

    // Nobody backed the winning option: fees still reported, nothing to distribute
    if winners_stake_total <= 0.0 {
        return Ok(SettlementResult {
            rail,
            total_pot,
            winners_stake_total: 0.0,
            losers_stake_total,
            platform_fee,
            creator_fee,
            distributable_pot: 0.0,
            payouts_by_user_id: BTreeMap::new(),
            winner_stakes_by_user_id: BTreeMap::new(),
        });
    }

    let prize_pool = (losers_stake_total - platform_fee - creator_fee).max(0.0);
    let distributable_pot = round2(winners_stake_total + prize_pool);

    // A user may hold several entries on the winning option
    let mut winner_stakes_by_user_id: BTreeMap<String, f64> = BTreeMap::new();
    for winner in &winners {
        *winner_stakes_by_user_id
            .entry(winner.user_id.clone())
            .or_insert(0.0) += winner.amount;
    }

    let mut allocations: Vec<CentAllocation> = Vec::with_capacity(winner_stakes_by_user_id.len());
    let mut allocated_cents: i64 = 0;
    for (user_id, stake) in &winner_stakes_by_user_id {
        let share = stake / winners_stake_total;
        let payout_cents = share * distributable_pot * 100.0;
        let cents = payout_cents.floor() as i64;
        allocated_cents += cents;
        allocations.push(CentAllocation {
            user_id: user_id.clone(),
            cents,
            remainder: payout_cents.fract(),
        });
    }

    // Pot is already at 2 dp
    let distributable_cents = (distributable_pot * 100.0).round() as i64;
    let mut remainder_cents = distributable_cents - allocated_cents;

    allocations.sort_by(|a, b| {
        b.remainder
            .total_cmp(&a.remainder)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    for allocation in allocations.iter_mut() {
        if remainder_cents <= 0 {
            break;
        }
        allocation.cents += 1;
        remainder_cents -= 1;
    }

    let payouts_by_user_id: BTreeMap<String, f64> = allocations
        .into_iter()
        .map(|a| (a.user_id, round2(a.cents as f64 / 100.0)))
        .collect();

    let total_payouts: f64 = payouts_by_user_id.values().sum();
    if total_payouts > distributable_pot + PAYOUT_TOLERANCE {
        warn!(
            "Payout sum ({}) exceeds distributable pot ({}) on {:?} rail",
            total_payouts, distributable_pot, rail
        );
    }

    Ok(SettlementResult {
        rail,
        total_pot,
        winners_stake_total,
        losers_stake_total,
        platform_fee,
        creator_fee,
        distributable_pot,
        payouts_by_user_id,
        winner_stakes_by_user_id,
    })
}

/// Settle a rail using its own provider matching
pub fn calculate_rail_payouts(
    entries: &[Entry],
    winning_option_id: &str,
    fee_config: &FeeConfig,
    rail: Rail,
) -> Result<SettlementResult, SettlementError> {
    calculate_payouts(entries, winning_option_id, fee_config, rail, |p| {
        rail.matches_provider(p)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEMO_PROVIDER;

    #[test]
    fn test_no_entries_on_rail() {
        let entries = vec![Entry::new("user1", "a", 10.0, DEMO_PROVIDER)];
        let result =
            calculate_rail_payouts(&entries, "a", &FeeConfig::default(), Rail::Crypto).unwrap();
        assert_eq!(result, SettlementResult::empty(Rail::Crypto));
    }

    #[test]
    fn test_rejects_negative_amount() {
        let entries = vec![Entry::new("user1", "a", -10.0, DEMO_PROVIDER)];
        let err = calculate_rail_payouts(&entries, "a", &FeeConfig::default(), Rail::Demo)
            .unwrap_err();
        assert!(matches!(err, SettlementError::InvalidAmount { .. }));
    }

    #[test]
    fn test_bad_entries_on_other_rails_are_ignored() {
        let entries = vec![
            Entry::new("user1", "a", 10.0, DEMO_PROVIDER),
            Entry::new("user2", "a", f64::NAN, "crypto-base-usdc"),
        ];
        assert!(calculate_rail_payouts(&entries, "a", &FeeConfig::default(), Rail::Demo).is_ok());
    }

    #[test]
    fn test_rejects_fee_config() {
        let entries = vec![Entry::new("user1", "a", 10.0, DEMO_PROVIDER)];
        let too_high = FeeConfig {
            platform_fee_bps: 8_000.0,
            creator_fee_bps: 3_000.0,
        };
        assert!(matches!(
            calculate_rail_payouts(&entries, "a", &too_high, Rail::Demo),
            Err(SettlementError::FeeExceedsPool { .. })
        ));

        let negative = FeeConfig {
            platform_fee_bps: -1.0,
            creator_fee_bps: 0.0,
        };
        assert!(matches!(
            calculate_rail_payouts(&entries, "a", &negative, Rail::Demo),
            Err(SettlementError::InvalidFeeBps { name: "platform fee", .. })
        ));
    }

    #[test]
    fn test_fee_config_is_valid() {
        assert!(FeeConfig::default().is_valid());
        let cases = [
            (f64::NAN, 100.0),
            (-1.0, 100.0),
            (9_000.0, 2_000.0),
            (250.0, f64::INFINITY),
        ];
        for (platform_fee_bps, creator_fee_bps) in cases {
            let fees = FeeConfig {
                platform_fee_bps,
                creator_fee_bps,
            };
            assert!(!fees.is_valid(), "{:?} should be rejected", fees);
        }
    }

    #[test]
    fn test_multiple_entries_same_user_aggregate() {
        let entries = vec![
            Entry::new("user1", "a", 10.0, DEMO_PROVIDER),
            Entry::new("user1", "a", 15.0, DEMO_PROVIDER),
            Entry::new("user2", "b", 25.0, DEMO_PROVIDER),
        ];
        let result =
            calculate_rail_payouts(&entries, "a", &FeeConfig::default(), Rail::Demo).unwrap();
        assert_eq!(result.winner_stakes_by_user_id.get("user1"), Some(&25.0));
        assert_eq!(result.payouts_by_user_id.len(), 1);
        assert!((result.payouts_by_user_id["user1"] - result.distributable_pot).abs() < 1e-9);
    }

    #[test]
    fn test_leftover_cents_follow_remainder_then_user_id() {
        // 10.00 split three ways: 333.33... cents each, one leftover cent
        let entries = vec![
            Entry::new("carol", "a", 1.0, DEMO_PROVIDER),
            Entry::new("alice", "a", 1.0, DEMO_PROVIDER),
            Entry::new("bob", "a", 1.0, DEMO_PROVIDER),
            Entry::new("dave", "b", 7.0, DEMO_PROVIDER),
        ];
        let no_fee = FeeConfig {
            platform_fee_bps: 0.0,
            creator_fee_bps: 0.0,
        };
        let result = calculate_rail_payouts(&entries, "a", &no_fee, Rail::Demo).unwrap();
        assert_eq!(result.distributable_pot, 10.0);
        assert_eq!(result.payouts_by_user_id["alice"], 3.34);
        assert_eq!(result.payouts_by_user_id["bob"], 3.33);
        assert_eq!(result.payouts_by_user_id["carol"], 3.33);
    }
}
