use super::pool_odds::{distributable_pool, post_odds_multiple, pre_odds_multiple};
use crate::types::{PayoutPreview, PoolInput};

/// Pre-bet odds, post-bet odds and what the stake would return if the option wins.
///
/// Returns None when there is nothing to preview (no stake and no pool on the
/// option) or the input is invalid. A first bettor on an empty option gets a
/// regular preview.
pub fn payout_preview(input: &PoolInput) -> Option<PayoutPreview> {
    let multiple_pre = pre_odds_multiple(input.total_pool, input.option_pool);
    let multiple_post = post_odds_multiple(input)?;
    let distributable_pool = distributable_pool(input)?;

    // Promise is based on post-bet odds, never stake * multiple_pre
    let expected_return = input.stake * multiple_post;
    let profit = expected_return - input.stake;

    Some(PayoutPreview {
        multiple_pre,
        multiple_post: Some(multiple_post),
        expected_return,
        profit,
        distributable_pool,
    })
}
