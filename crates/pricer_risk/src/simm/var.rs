//! Historical Value-at-Risk.

/// Absorbs rounding noise in `n * (1 - level)` so that e.g. 100 scenarios
/// at 95% select exactly the 5th worst outcome.
const RANK_TOLERANCE: f64 = 1e-9;

/// Historical VaR of a P&L sample at confidence `level`.
///
/// Positive P&L values are profits and negative values are losses; the
/// result is a loss-positive number. With `n` scenarios the P&L sample is
/// sorted ascending and the `k`-th worst outcome is taken, where
/// `k = ceil(n * (1 - level))` clamped to `[1, n]`. The result is not
/// floored at zero: a sample with no losses yields a negative VaR.
///
/// Returns `0.0` for an empty sample.
///
/// # Examples
/// ```rust
/// use pricer_risk::simm::historical_var;
///
/// let pnl = [-2.0, -1.0, 0.5, 1.0, -0.2];
/// assert_eq!(historical_var(&pnl, 0.99), 2.0);
/// assert_eq!(historical_var(&pnl, 0.5), 0.2);
/// ```
pub fn historical_var(pnl: &[f64], level: f64) -> f64 {
    let n = pnl.len();
    if n == 0 {
        return 0.0;
    }
    let mut sorted = pnl.to_vec();
    sorted.sort_by(f64::total_cmp);

    let k = ((n as f64) * (1.0 - level) - RANK_TOLERANCE).ceil() as usize;
    let k = k.clamp(1, n);
    -sorted[k - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_worst_loss_at_high_confidence() {
        let pnl = [10.0, -50.0, 3.0, -7.0];
        assert_eq!(historical_var(&pnl, 0.99), 50.0);
    }

    #[test]
    fn test_quantile_rank() {
        // 100 scenarios: -1..=-100 losses; 95% picks the 5th worst
        let pnl: Vec<f64> = (1..=100).map(|i| -(i as f64)).collect();
        assert_eq!(historical_var(&pnl, 0.95), 96.0);
        assert_eq!(historical_var(&pnl, 0.99), 100.0);
    }

    #[test]
    fn test_no_losses_gives_negative_var() {
        let pnl = [1.0, 2.0, 3.0];
        assert_eq!(historical_var(&pnl, 0.99), -1.0);
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(historical_var(&[], 0.99), 0.0);
    }

    #[test]
    fn test_input_order_irrelevant() {
        let a = [5.0, -3.0, 1.0, -8.0, 2.0];
        let b = [-8.0, 2.0, 5.0, 1.0, -3.0];
        assert_eq!(historical_var(&a, 0.8), historical_var(&b, 0.8));
    }

    proptest! {
        #[test]
        fn prop_var_monotone_in_level(
            pnl in proptest::collection::vec(-1e6f64..1e6, 1..200),
            low in 0.5f64..0.9,
            bump in 0.0f64..0.09,
        ) {
            prop_assert!(historical_var(&pnl, low + bump) >= historical_var(&pnl, low));
        }

        #[test]
        fn prop_var_is_a_sample_loss(pnl in proptest::collection::vec(-1e6f64..1e6, 1..200)) {
            let var = historical_var(&pnl, 0.99);
            prop_assert!(pnl.iter().any(|&x| -x == var));
        }
    }
}
