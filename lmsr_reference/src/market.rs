//! Market state validation shared by the cost model, estimator and solver.

use crate::cost::liquidity_param;
use crate::error::{LmsrError, Result};

/// Outstanding shares per outcome plus the liquidity parameter `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketState {
    pub share_distribution: Vec<f64>,
    pub b: f64,
}

impl MarketState {
    /// Validated market state.
    pub fn new(share_distribution: Vec<f64>, b: f64) -> Result<Self> {
        validate_distribution(&share_distribution)?;
        validate_liquidity(b)?;
        Ok(Self { share_distribution, b })
    }

    /// Market where every outcome holds `funding` shares and
    /// `b = funding / ln(outcome_count)`.
    pub fn uniform(funding: f64, outcome_count: usize) -> Result<Self> {
        let b = liquidity_param(funding, outcome_count)?;
        Self::new(vec![funding; outcome_count], b)
    }

    pub fn outcome_count(&self) -> usize {
        self.share_distribution.len()
    }
}

pub(crate) fn validate_liquidity(b: f64) -> Result<()> {
    if !b.is_finite() || b <= 0.0 {
        return Err(LmsrError::InvalidLiquidity(b));
    }
    Ok(())
}

pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LmsrError::InvalidAmount(amount));
    }
    Ok(())
}

pub(crate) fn validate_distribution(share_distribution: &[f64]) -> Result<()> {
    if share_distribution.len() < 2 {
        return Err(LmsrError::TooFewOutcomes(share_distribution.len()));
    }
    share_distribution.iter().try_for_each(|&count| validate_amount(count))
}

/// Full check of a (distribution, outcome, b) triple.
pub(crate) fn validate_market(share_distribution: &[f64], outcome: usize, b: f64) -> Result<()> {
    validate_distribution(share_distribution)?;
    if outcome >= share_distribution.len() {
        return Err(LmsrError::OutcomeOutOfRange {
            outcome,
            outcome_count: share_distribution.len(),
        });
    }
    validate_liquidity(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_market_uses_ln_outcome_count() {
        let market = MarketState::uniform(100.0, 2).unwrap();
        assert_eq!(market.share_distribution, vec![100.0, 100.0]);
        assert!((market.b - 100.0 / std::f64::consts::LN_2).abs() < 1e-9);
        assert_eq!(market.outcome_count(), 2);
    }

    #[test]
    fn rejects_single_outcome() {
        assert_eq!(
            MarketState::new(vec![1.0], 1.0),
            Err(LmsrError::TooFewOutcomes(1))
        );
    }

    #[test]
    fn rejects_negative_share_count() {
        assert_eq!(
            MarketState::new(vec![1.0, -2.0], 1.0),
            Err(LmsrError::InvalidAmount(-2.0))
        );
    }

    #[test]
    fn rejects_bad_liquidity() {
        assert!(matches!(
            validate_market(&[1.0, 1.0], 0, 0.0),
            Err(LmsrError::InvalidLiquidity(_))
        ));
        assert!(matches!(
            validate_market(&[1.0, 1.0], 0, f64::NAN),
            Err(LmsrError::InvalidLiquidity(_))
        ));
    }

    #[test]
    fn rejects_outcome_out_of_range() {
        assert_eq!(
            validate_market(&[1.0, 1.0], 2, 1.0),
            Err(LmsrError::OutcomeOutOfRange {
                outcome: 2,
                outcome_count: 2
            })
        );
    }
}
