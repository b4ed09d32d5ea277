//! Checked fixed-point arithmetic.
//!
//! Every helper returns `None` instead of wrapping or saturating so callers
//! can reject the operation with their own overflow error.

/// Fixed-point scale for reward rates and reward-per-token values (1e18).
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Basis-point denominator (100% = 10 000 bps).
pub const BPS_DENOMINATOR: i128 = 10_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// `a * b / denominator`, rounding toward zero.
///
/// Returns `None` on overflow of the intermediate product or when
/// `denominator` is zero.
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(denominator)
}

/// Widens a timestamp delta into the amount domain.
pub fn seconds(delta: u64) -> i128 {
    i128::from(delta)
}
