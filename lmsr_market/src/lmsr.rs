//! LMSR (Logarithmic Market Scoring Rule) pricing implementation.
//!
//! Reference: https://gnosis-pm-js.readthedocs.io/en/v1.3.0/lmsr-primer.html
//!
//! Share counts and costs are integer base units. Exponents, logarithms and
//! prices use fixed-point arithmetic with PRECISION (10^18); prices are
//! returned scaled by SCALE_FACTOR (10^7).
//!
//! Formulas, for a share distribution q over n outcomes:
//! - Liquidity: b = funding / ln(n)
//! - Cost function: C(q) = b * ln(sum_i e^(q_i/b))
//! - Price: P(i) = e^(q_i/b) / sum_j e^(q_j/b)
//! - Buy cost: C(q + amount * e_i) - C(q) = b * ln(1 + P(i) * (e^(amount/b) - 1))
//! - Sell return: C(q) - C(q - amount * e_i) = -b * ln(1 + P(i) * (e^(-amount/b) - 1))
//!
//! Trade costs are evaluated from the current price rather than as a
//! difference of two rounded potentials, so small trades keep their precision.

use soroban_sdk::Vec;

use crate::constants::{E_INV_PRECISE, E_PRECISE, LN2_PRECISE, MAX_EXP_INPUT, PRECISION, SCALE_FACTOR};
use crate::error::MarketError;

/// Maximum iterations for the exp Taylor series on the fractional part.
/// The argument is reduced to (-1, 1), where 30 terms exceed PRECISION.
const EXP_ITERATIONS: i128 = 30;

/// Maximum iterations for the atanh series used by `ln_precise`.
const LN_ITERATIONS: i128 = 40;

/// a * b / PRECISION, splitting `a` so the intermediate product stays in range.
fn mul_precise(a: i128, b: i128) -> Result<i128, MarketError> {
    let whole = (a / PRECISION).checked_mul(b).ok_or(MarketError::Overflow)?;
    let rest = (a % PRECISION).checked_mul(b).ok_or(MarketError::Overflow)? / PRECISION;
    whole.checked_add(rest).ok_or(MarketError::Overflow)
}

/// numerator * PRECISION / denominator, for a positive denominator.
fn div_precise(numerator: i128, denominator: i128) -> Result<i128, MarketError> {
    if denominator <= 0 {
        return Err(MarketError::Overflow);
    }

    // The remainder times PRECISION must fit in an i128
    let limit = i128::MAX / PRECISION;
    let (numerator, denominator) = if denominator > limit {
        let k = denominator / limit + 1;
        (numerator / k, denominator / k)
    } else {
        (numerator, denominator)
    };

    let whole = (numerator / denominator)
        .checked_mul(PRECISION)
        .ok_or(MarketError::Overflow)?;
    let rest = (numerator % denominator)
        .checked_mul(PRECISION)
        .ok_or(MarketError::Overflow)?
        / denominator;
    whole.checked_add(rest).ok_or(MarketError::Overflow)
}

/// e^x - 1, scaled by PRECISION.
///
/// Summed from the first Taylor term so that small arguments keep their
/// full relative precision.
pub(crate) fn expm1_precise(x: i128) -> Result<i128, MarketError> {
    if x.abs() > PRECISION {
        return exp_precise(x)?
            .checked_sub(PRECISION)
            .ok_or(MarketError::Overflow);
    }

    // Taylor series: e^x - 1 = sum(x^n / n!), n >= 1
    let mut sum = x;
    let mut term = x;

    for n in 2..=EXP_ITERATIONS {
        term = mul_precise(term, x)? / n;
        if term == 0 {
            break;
        }
        sum = sum.checked_add(term).ok_or(MarketError::Overflow)?;
    }

    Ok(sum)
}

/// e^x, scaled by PRECISION.
///
/// The argument is split into an integer part k and a fraction f with
/// |f| < 1; e^f comes from the Taylor series and is then multiplied by
/// e^k one factor at a time.
pub(crate) fn exp_precise(x: i128) -> Result<i128, MarketError> {
    // Below one unit of precision
    if x < -MAX_EXP_INPUT {
        return Ok(0);
    }

    let whole = x / PRECISION;
    let fraction = x - whole * PRECISION;

    let mut result = PRECISION
        .checked_add(expm1_precise(fraction)?)
        .ok_or(MarketError::Overflow)?;

    let factor = if whole >= 0 { E_PRECISE } else { E_INV_PRECISE };
    for _ in 0..whole.abs() {
        result = mul_precise(result, factor)?;
    }

    Ok(result.max(0))
}

/// Natural logarithm.
/// Input and output are scaled by PRECISION.
/// Returns Overflow error if x <= 0.
pub(crate) fn ln_precise(x: i128) -> Result<i128, MarketError> {
    if x <= 0 {
        return Err(MarketError::Overflow);
    }

    if x == PRECISION {
        return Ok(0);
    }

    // Normalize x to [1/2, 2]: ln(x * 2^n) = ln(x) + n * ln(2)
    let mut normalized = x;
    let mut n: i128 = 0;

    while normalized > 2 * PRECISION {
        normalized /= 2;
        n += 1;
    }

    while normalized < PRECISION / 2 {
        normalized = normalized.checked_mul(2).ok_or(MarketError::Overflow)?;
        n -= 1;
    }

    // ln(x) = 2 * atanh(z) with z = (x-1)/(x+1), |z| <= 1/3
    // atanh(z) = z + z³/3 + z⁵/5 + ...
    let z = div_precise(normalized - PRECISION, normalized + PRECISION)?;
    let z_squared = mul_precise(z, z)?;

    let mut series: i128 = 0;
    let mut z_power = z;

    for k in 0..LN_ITERATIONS {
        series = series
            .checked_add(z_power / (2 * k + 1))
            .ok_or(MarketError::Overflow)?;

        z_power = mul_precise(z_power, z_squared)?;

        if z_power == 0 {
            break;
        }
    }

    let adjustment = n.checked_mul(LN2_PRECISE).ok_or(MarketError::Overflow)?;
    (2 * series)
        .checked_add(adjustment)
        .ok_or(MarketError::Overflow)
}

/// Liquidity parameter for a market funded with `funding` over `outcome_count` outcomes:
/// b = funding / ln(outcome_count)
pub fn liquidity_param(funding: i128, outcome_count: u32) -> Result<i128, MarketError> {
    if funding <= 0 {
        return Err(MarketError::InvalidFunding);
    }
    if outcome_count < 2 {
        return Err(MarketError::InvalidOutcomeCount);
    }

    let ln_n = ln_precise(
        (outcome_count as i128)
            .checked_mul(PRECISION)
            .ok_or(MarketError::Overflow)?,
    )?;

    div_precise(funding, ln_n)
}

/// Check the distribution has at least two outcomes, none negative,
/// and that `outcome` indexes into it.
pub fn validate_market(q: &Vec<i128>, outcome: u32) -> Result<(), MarketError> {
    if q.len() < 2 {
        return Err(MarketError::InvalidOutcomeCount);
    }
    if outcome >= q.len() {
        return Err(MarketError::InvalidOutcome);
    }
    if q.iter().any(|count| count < 0) {
        return Err(MarketError::InvalidAmount);
    }
    Ok(())
}

/// Largest scaled exponent q_i / b.
fn max_exponent(q: &Vec<i128>, b: i128) -> Result<i128, MarketError> {
    let mut max = i128::MIN;
    for q_i in q.iter() {
        max = max.max(div_precise(q_i, b)?);
    }
    Ok(max)
}

/// sum_i e^(q_i/b - max), scaled.
fn shifted_exp_sum(q: &Vec<i128>, b: i128, max: i128) -> Result<i128, MarketError> {
    let mut sum: i128 = 0;
    for q_i in q.iter() {
        let x = div_precise(q_i, b)?;
        let term = exp_precise(x.checked_sub(max).ok_or(MarketError::Overflow)?)?;
        sum = sum.checked_add(term).ok_or(MarketError::Overflow)?;
    }
    Ok(sum)
}

/// Price of `outcome` scaled by PRECISION.
fn price_precise(q: &Vec<i128>, outcome: u32, b: i128) -> Result<i128, MarketError> {
    if b <= 0 {
        return Err(MarketError::InvalidFunding);
    }

    let max = max_exponent(q, b)?;
    let sum = shifted_exp_sum(q, b, max)?;
    if sum == 0 {
        return Err(MarketError::Overflow);
    }

    let q_outcome = q.get(outcome).ok_or(MarketError::InvalidOutcome)?;
    let x = div_precise(q_outcome, b)?;
    let numerator = exp_precise(x.checked_sub(max).ok_or(MarketError::Overflow)?)?;

    div_precise(numerator, sum)
}

/// A trade worth nothing at this precision is refused rather than priced at zero.
fn positive(tokens: i128) -> Result<i128, MarketError> {
    if tokens <= 0 {
        return Err(MarketError::InvalidAmount);
    }
    Ok(tokens)
}

/// Calculate the LMSR cost function: C(q) = b * ln(sum_i e^(q_i/b))
pub fn cost(q: &Vec<i128>, b: i128) -> Result<i128, MarketError> {
    if b <= 0 {
        return Err(MarketError::InvalidFunding);
    }

    // Log-sum-exp: ln(sum e^x_i) = max + ln(sum e^(x_i - max))
    let max = max_exponent(q, b)?;
    let sum = shifted_exp_sum(q, b, max)?;
    let inside = max.checked_add(ln_precise(sum)?).ok_or(MarketError::Overflow)?;

    mul_precise(b, inside)
}

/// Calculate the cost to buy `amount` shares of `outcome`:
/// C(q + amount * e_outcome) - C(q) = b * ln(1 + P(outcome) * (e^(amount/b) - 1))
pub fn calculate_buy_cost(
    q: &Vec<i128>,
    outcome: u32,
    amount: i128,
    b: i128,
) -> Result<i128, MarketError> {
    validate_market(q, outcome)?;
    if amount <= 0 {
        return Err(MarketError::InvalidAmount);
    }

    let price = price_precise(q, outcome, b)?;
    let x = div_precise(amount, b)?;

    let exponent = if x <= PRECISION {
        let growth = mul_precise(price, expm1_precise(x)?)?;
        ln_precise(PRECISION.checked_add(growth).ok_or(MarketError::Overflow)?)?
    } else {
        // Same value as x + ln(p + (1 - p) * e^-x), which keeps e^x out of range
        let decay = mul_precise(PRECISION - price, exp_precise(-x)?)?;
        x.checked_add(ln_precise(price + decay)?)
            .ok_or(MarketError::Overflow)?
    };

    positive(mul_precise(b, exponent)?)
}

/// Calculate the return from selling `amount` shares of `outcome`:
/// C(q) - C(q - amount * e_outcome) = -b * ln(1 + P(outcome) * (e^(-amount/b) - 1))
pub fn calculate_sell_return(
    q: &Vec<i128>,
    outcome: u32,
    amount: i128,
    b: i128,
) -> Result<i128, MarketError> {
    validate_market(q, outcome)?;
    if amount <= 0 {
        return Err(MarketError::InvalidAmount);
    }

    let outstanding = q.get(outcome).ok_or(MarketError::InvalidOutcome)?;
    if outstanding < amount {
        return Err(MarketError::InsufficientBalance);
    }

    let price = price_precise(q, outcome, b)?;
    let x = div_precise(amount, b)?;

    // (1 - p) + p * e^-x
    let remaining = if x <= PRECISION {
        PRECISION
            .checked_add(mul_precise(price, expm1_precise(-x)?)?)
            .ok_or(MarketError::Overflow)?
    } else {
        (PRECISION - price)
            .checked_add(mul_precise(price, exp_precise(-x)?)?)
            .ok_or(MarketError::Overflow)?
    };

    positive(mul_precise(b, -ln_precise(remaining)?)?)
}

/// Calculate the current price (probability) of an outcome.
/// Returns price scaled by SCALE_FACTOR (0 to SCALE_FACTOR represents 0 to 1).
pub fn calculate_price(q: &Vec<i128>, outcome: u32, b: i128) -> Result<i128, MarketError> {
    validate_market(q, outcome)?;
    Ok(price_precise(q, outcome, b)? / (PRECISION / SCALE_FACTOR))
}
