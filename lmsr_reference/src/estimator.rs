//! Share estimator: how many shares of an outcome a token payment buys.
//!
//! Inverting C(q + x e_o) - C(q) = tokens for x gives
//!
//! x = b * ln(sum_i e^((q_i + tokens)/b) - sum_{i != o} e^(q_i/b)) - q_o
//!
//! The payment scales the whole potential sum_i e^(q_i/b) by e^(tokens/b);
//! everything above the untouched outcomes is attributed to outcome `o`.

use crate::cost::{max_exponent, shifted_exp_sum};
use crate::error::{LmsrError, Result};
use crate::market::{validate_amount, validate_market};

/// Shares of `outcome` bought by paying `tokens`, evaluated with the
/// exponents shifted by their maximum.
///
/// The inner difference is rewritten as
/// `sum_{i != o} e^(q_i/b - m) * (e^(tokens/b) - 1) + e^((q_o + tokens)/b - m)`
/// so that no two nearly equal sums are subtracted.
pub fn calc_shares(tokens: f64, outcome: usize, share_distribution: &[f64], b: f64) -> Result<f64> {
    validate_market(share_distribution, outcome, b)?;
    validate_amount(tokens)?;

    let max = max_exponent(share_distribution, b);
    let shift = tokens / b;

    let others = shifted_exp_sum(share_distribution, b, max, Some(outcome));
    let own = (share_distribution[outcome] / b - max + shift).exp();
    let inner = others * shift.exp_m1() + own;

    let shares = b * (max + inner.ln()) - share_distribution[outcome];
    if !shares.is_finite() {
        return Err(LmsrError::NumericOverflow("calc_shares"));
    }
    Ok(shares)
}

/// Literal evaluation of the estimator formula without exponent shifting.
///
/// Fails with [`LmsrError::NumericOverflow`] as soon as any e^(q_i/b)
/// leaves the f64 range; kept to cross-check [`calc_shares`].
pub fn calc_shares_unguarded(
    tokens: f64,
    outcome: usize,
    share_distribution: &[f64],
    b: f64,
) -> Result<f64> {
    validate_market(share_distribution, outcome, b)?;
    validate_amount(tokens)?;

    let after: f64 = share_distribution
        .iter()
        .map(|count| (count / b + tokens / b).exp())
        .sum();
    let untouched: f64 = share_distribution
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != outcome)
        .map(|(_, count)| (count / b).exp())
        .sum();

    if !after.is_finite() || !untouched.is_finite() {
        return Err(LmsrError::NumericOverflow("calc_shares_unguarded"));
    }

    let shares = b * (after - untouched).ln() - share_distribution[outcome];
    if !shares.is_finite() {
        return Err(LmsrError::NumericOverflow("calc_shares_unguarded"));
    }
    Ok(shares)
}
