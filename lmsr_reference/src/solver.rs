//! Numerical inverse of the buying cost.
//!
//! Solves `costs_buying(q, o, x, b) = tokens` for `x` by bisection. It makes
//! no assumption about the shape of the distribution, so it serves as an
//! independent check of the closed form in [`crate::estimator`].

use tracing::debug;

use crate::cost::costs_buying;
use crate::error::{LmsrError, Result};
use crate::market::{validate_amount, validate_market};

/// Relative width of the final bracket.
pub const TOLERANCE: f64 = 1e-12;

/// Bisection steps before giving up.
pub const MAX_ITERATIONS: u32 = 200;

/// Bracket doublings before giving up.
const MAX_EXPANSIONS: u32 = 64;

/// Shares of `outcome` bought by paying `tokens`, found by bisection.
pub fn solve_shares(tokens: f64, outcome: usize, share_distribution: &[f64], b: f64) -> Result<f64> {
    validate_market(share_distribution, outcome, b)?;
    validate_amount(tokens)?;

    if tokens == 0.0 {
        return Ok(0.0);
    }

    let cost_of = |shares: f64| costs_buying(share_distribution, outcome, shares, b);

    // Prices never exceed one, so `tokens` buys at least `tokens` shares.
    let mut low = tokens;
    let mut high = 2.0 * tokens;
    let mut expansions = 0;
    while cost_of(high)? < tokens {
        low = high;
        high *= 2.0;
        expansions += 1;
        if expansions > MAX_EXPANSIONS {
            return Err(LmsrError::NoConvergence(expansions));
        }
    }

    for iteration in 1..=MAX_ITERATIONS {
        let mid = low + (high - low) / 2.0;
        if cost_of(mid)? < tokens {
            low = mid;
        } else {
            high = mid;
        }

        if high - low <= TOLERANCE * high {
            debug!(iteration, shares = high, "bisection converged");
            return Ok(low + (high - low) / 2.0);
        }
    }

    Err(LmsrError::NoConvergence(MAX_ITERATIONS))
}
