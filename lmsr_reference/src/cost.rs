//! Floating-point LMSR cost model.
//!
//! - Liquidity: b = funding / ln(n)
//! - Cost function: C(q) = b * ln(sum_i e^(q_i/b))
//! - Price: P(i) = e^(q_i/b) / sum_j e^(q_j/b)
//!
//! Trade costs are written relative to the current price so that no two
//! large potentials are subtracted:
//! C(q + x e_i) - C(q) = b * ln(1 + P(i) * (e^(x/b) - 1))

use crate::error::{LmsrError, Result};
use crate::market::{validate_amount, validate_distribution, validate_liquidity, validate_market};

/// b = funding / ln(outcome_count)
pub fn liquidity_param(funding: f64, outcome_count: usize) -> Result<f64> {
    if outcome_count < 2 {
        return Err(LmsrError::TooFewOutcomes(outcome_count));
    }
    validate_liquidity(funding)?;
    Ok(funding / (outcome_count as f64).ln())
}

/// Largest q_i / b.
pub(crate) fn max_exponent(share_distribution: &[f64], b: f64) -> f64 {
    share_distribution
        .iter()
        .map(|count| count / b)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// sum_i e^(q_i/b - max), skipping `excluded`.
pub(crate) fn shifted_exp_sum(
    share_distribution: &[f64],
    b: f64,
    max: f64,
    excluded: Option<usize>,
) -> f64 {
    share_distribution
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != excluded)
        .map(|(_, count)| (count / b - max).exp())
        .sum()
}

fn finite(value: f64, context: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LmsrError::NumericOverflow(context))
    }
}

/// C(q) = b * ln(sum_i e^(q_i/b)), evaluated with log-sum-exp.
pub fn cost(share_distribution: &[f64], b: f64) -> Result<f64> {
    validate_distribution(share_distribution)?;
    validate_liquidity(b)?;

    let max = max_exponent(share_distribution, b);
    let sum = shifted_exp_sum(share_distribution, b, max, None);
    finite(b * (max + sum.ln()), "cost")
}

/// P(outcome) = e^(q_outcome/b) / sum_j e^(q_j/b)
pub fn marginal_price(share_distribution: &[f64], outcome: usize, b: f64) -> Result<f64> {
    validate_market(share_distribution, outcome, b)?;

    let max = max_exponent(share_distribution, b);
    let sum = shifted_exp_sum(share_distribution, b, max, None);
    let numerator = (share_distribution[outcome] / b - max).exp();
    finite(numerator / sum, "marginal_price")
}

/// Tokens needed to buy `shares` of `outcome`: C(q + shares e_outcome) - C(q).
pub fn costs_buying(share_distribution: &[f64], outcome: usize, shares: f64, b: f64) -> Result<f64> {
    validate_amount(shares)?;
    let price = marginal_price(share_distribution, outcome, b)?;

    let growth = (shares / b).exp_m1();
    finite(b * (price * growth).ln_1p(), "costs_buying")
}

/// Tokens received for selling `shares` of `outcome`: C(q) - C(q - shares e_outcome).
pub fn earnings_selling(share_distribution: &[f64], outcome: usize, shares: f64, b: f64) -> Result<f64> {
    validate_amount(shares)?;
    let price = marginal_price(share_distribution, outcome, b)?;

    let outstanding = share_distribution[outcome];
    if shares > outstanding {
        return Err(LmsrError::InsufficientShares {
            outcome,
            requested: shares,
            outstanding,
        });
    }

    let shrink = (-shares / b).exp_m1();
    finite(-b * (price * shrink).ln_1p(), "earnings_selling")
}
