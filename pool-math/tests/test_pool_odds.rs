use pool_math::{
    distributable_pool, payout_preview, post_odds_multiple, pre_odds_multiple, PoolInput,
};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}

#[test]
fn test_post_bet_payout_regression() {
    // Promising stake * pre-bet odds paid 1500 on a pool that only supports ~538
    let input = PoolInput::new(450.0, 75.0, 250.0, 0.0);
    let preview = payout_preview(&input).expect("preview");

    assert_eq!(preview.multiple_pre, Some(6.0));
    assert_close(preview.multiple_post.unwrap(), 700.0 / 325.0, 1e-9);
    assert_close(preview.multiple_post.unwrap(), 2.1538, 1e-4);
    assert_close(preview.expected_return, 538.46, 0.01);

    let naive = input.stake * preview.multiple_pre.unwrap();
    assert_eq!(naive, 1500.0);
    assert!(preview.expected_return != naive);
    assert!(preview.expected_return < 600.0);
    assert_close(preview.distributable_pool, 700.0, 1e-9);
}

#[test]
fn test_first_mover_on_empty_option() {
    let preview = payout_preview(&PoolInput::new(100.0, 0.0, 50.0, 0.0)).expect("preview");

    assert_eq!(preview.multiple_pre, None);
    assert_close(preview.multiple_post.unwrap(), 3.0, 1e-9);
    assert_close(preview.expected_return, 150.0, 1e-9);
    assert_close(preview.profit, 100.0, 1e-9);
}

#[test]
fn test_nothing_to_preview() {
    assert_eq!(payout_preview(&PoolInput::new(100.0, 0.0, 0.0, 0.0)), None);
    assert_eq!(payout_preview(&PoolInput::new(0.0, 0.0, 0.0, 0.0)), None);
}

#[test]
fn test_fee_lowers_post_odds() {
    let no_fee = PoolInput::new(450.0, 75.0, 250.0, 0.0);
    let with_fee = PoolInput { fee_bps: 350.0, ..no_fee };

    assert!(post_odds_multiple(&with_fee).unwrap() < post_odds_multiple(&no_fee).unwrap());
    assert!(distributable_pool(&with_fee).unwrap() < distributable_pool(&no_fee).unwrap());

    let a = payout_preview(&no_fee).unwrap();
    let b = payout_preview(&with_fee).unwrap();
    assert!(b.expected_return < a.expected_return);
    assert!(b.distributable_pool < a.distributable_pool);
}

#[test]
fn test_pre_odds_division_by_zero() {
    for total in [0.0, 1.0, 450.0, 1e12] {
        assert_eq!(pre_odds_multiple(total, 0.0), None);
    }
    assert_eq!(pre_odds_multiple(0.0, 0.0), None);
}

#[test]
fn test_fee_taken_from_losing_side_only() {
    // 37500 on the other side, first 100 on this one, 3.5% fee:
    // 100 + 37500 * 0.965 = 36287.5 -> 362.875x
    let m = post_odds_multiple(&PoolInput::new(37_500.0, 0.0, 100.0, 350.0)).unwrap();
    assert_close(m, 362.875, 1e-9);
}

#[test]
fn test_dominant_side_multiple_near_one() {
    let m = post_odds_multiple(&PoolInput::new(10_000.0, 9_000.0, 100.0, 350.0)).unwrap();
    assert!(m >= 1.0);
    assert!(m < 1.5);
}

proptest! {
    #[test]
    fn winner_never_receives_less_than_stake(
        option_pool in 0.0f64..1_000_000.0,
        extra in 0.0f64..1_000_000.0,
        stake in 0.01f64..100_000.0,
        fee_bps in 0.0f64..=10_000.0,
    ) {
        let input = PoolInput::new(option_pool + extra, option_pool, stake, fee_bps);
        let preview = payout_preview(&input).expect("valid input must preview");

        prop_assert!(preview.multiple_post.unwrap().is_finite());
        prop_assert!(preview.expected_return >= stake * (1.0 - 1e-12));
        prop_assert!(preview.profit >= -stake * 1e-12);
        // Promised returns fit inside the pool the stake joins
        prop_assert!(preview.expected_return <= preview.distributable_pool * (1.0 + 1e-12));
    }

    #[test]
    fn fee_is_monotone(
        option_pool in 0.0f64..100_000.0,
        extra in 1.0f64..100_000.0,
        stake in 0.01f64..10_000.0,
        low in 0.0f64..5_000.0,
        delta in 1.0f64..5_000.0,
    ) {
        let base = PoolInput::new(option_pool + extra, option_pool, stake, low);
        let higher = PoolInput { fee_bps: low + delta, ..base };
        prop_assert!(post_odds_multiple(&higher).unwrap() < post_odds_multiple(&base).unwrap());
    }

    #[test]
    fn invalid_numbers_never_leak(
        total in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(-1.0), 0.0f64..1000.0],
        option in prop_oneof![Just(f64::NAN), Just(f64::NEG_INFINITY), Just(-1.0), 0.0f64..1000.0],
        stake in prop_oneof![Just(f64::NAN), Just(-5.0), 0.0f64..1000.0],
        fee_bps in prop_oneof![Just(f64::NAN), Just(10_001.0), Just(-1.0), 0.0f64..=10_000.0],
    ) {
        let input = PoolInput::new(total, option, stake, fee_bps);
        if let Some(m) = pre_odds_multiple(total, option) {
            prop_assert!(m.is_finite() && m >= 0.0);
        }
        if let Some(preview) = payout_preview(&input) {
            prop_assert!(preview.expected_return.is_finite());
            prop_assert!(preview.profit.is_finite());
            prop_assert!(preview.distributable_pool.is_finite());
            prop_assert!(preview.multiple_post.map_or(false, |m| m.is_finite()));
        }
    }
}
