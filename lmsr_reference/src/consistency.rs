//! Cross-check of an integer LMSR cost implementation against the
//! floating-point estimator.
//!
//! The check asks a [`CostOracle`] (typically a deployed market maker
//! contract) what `number_of_shares` of one outcome cost in a uniform
//! market, feeds that price back through [`calc_shares`], and compares the
//! recovered share count with the one requested.

use tracing::{debug, info};

use crate::error::{LmsrError, Result};
use crate::estimator::calc_shares;
use crate::market::MarketState;

/// Minimum market balance: one whole token in 18-decimal base units.
pub const MIN_MARKET_BALANCE: i128 = 1_000_000_000_000_000_000;

/// Anything that can quote the cost of buying shares.
pub trait CostOracle {
    /// Tokens required to buy `number_of_shares` of `outcome`.
    fn calc_costs_buying(
        &self,
        market_id: &[u8; 32],
        funding: i128,
        share_distribution: &[i128],
        outcome: u32,
        number_of_shares: i128,
    ) -> i128;
}

/// Market scenario of a consistency check.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyConfig {
    pub market_id: [u8; 32],
    /// Funding of the market; also the share count of every outcome.
    pub initial_funding: i128,
    pub outcome_count: usize,
    pub outcome: u32,
    pub number_of_shares: i128,
    /// Decimal places `number_of_shares / estimate` must agree with 1.
    pub decimal_places: u32,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            market_id: [0u8; 32],
            initial_funding: MIN_MARKET_BALANCE,
            outcome_count: 2,
            outcome: 1,
            number_of_shares: 5 * MIN_MARKET_BALANCE,
            decimal_places: 3,
        }
    }
}

/// Outcome of a consistency check.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyReport {
    /// Cost quoted by the oracle.
    pub tokens: i128,
    /// Shares the estimator attributes to `tokens`.
    pub estimated_shares: f64,
    /// `number_of_shares / estimated_shares`.
    pub ratio: f64,
    pub decimal_places: u32,
}

impl ConsistencyReport {
    /// Whether the ratio rounds to 1 at the configured decimal places.
    pub fn is_consistent(&self) -> bool {
        almost_equal(self.ratio, 1.0, self.decimal_places)
    }

    pub fn relative_error(&self) -> f64 {
        (self.ratio - 1.0).abs()
    }
}

/// `round(a - b, places) == 0`
pub fn almost_equal(a: f64, b: f64, places: u32) -> bool {
    let scale = 10f64.powi(places as i32);
    ((a - b) * scale).round() == 0.0
}

/// Run one consistency check against `oracle`.
pub fn run<O: CostOracle>(config: &ConsistencyConfig, oracle: &O) -> Result<ConsistencyReport> {
    let outcome = config.outcome as usize;
    if outcome >= config.outcome_count {
        return Err(LmsrError::OutcomeOutOfRange {
            outcome,
            outcome_count: config.outcome_count,
        });
    }

    let market = MarketState::uniform(config.initial_funding as f64, config.outcome_count)?;
    let share_distribution = vec![config.initial_funding; config.outcome_count];

    let tokens = oracle.calc_costs_buying(
        &config.market_id,
        config.initial_funding,
        &share_distribution,
        config.outcome,
        config.number_of_shares,
    );
    debug!(tokens, b = market.b, "oracle quoted buying cost");

    let estimated_shares = calc_shares(tokens as f64, outcome, &market.share_distribution, market.b)?;
    let ratio = config.number_of_shares as f64 / estimated_shares;

    let report = ConsistencyReport {
        tokens,
        estimated_shares,
        ratio,
        decimal_places: config.decimal_places,
    };
    info!(
        tokens,
        estimated_shares,
        ratio,
        consistent = report.is_consistent(),
        "consistency check finished"
    );
    Ok(report)
}
