pub mod pool_odds;
pub mod preview;
pub mod quote;
pub mod settlement;

/// Round to 2 decimal places (cents)
pub fn round2(n: f64) -> f64 {
    round_to(n, 2)
}

pub fn round_to(n: f64, decimals: i32) -> f64 {
    if !n.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (n * factor).round() / factor
}
