use thiserror::Error;

/// Errors raised by the floating-point LMSR reference model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LmsrError {
    /// A market needs at least two outcomes
    #[error("market needs at least two outcomes, got {0}")]
    TooFewOutcomes(usize),

    /// Outcome index is outside the share distribution
    #[error("outcome {outcome} out of range for {outcome_count} outcomes")]
    OutcomeOutOfRange { outcome: usize, outcome_count: usize },

    /// Liquidity parameter (or the funding it is derived from) must be positive and finite
    #[error("liquidity parameter must be positive and finite, got {0}")]
    InvalidLiquidity(f64),

    /// Share counts, token amounts and share requests must be non-negative and finite
    #[error("amount must be non-negative and finite, got {0}")]
    InvalidAmount(f64),

    /// Cannot sell more shares than are outstanding
    #[error("cannot sell {requested} shares of outcome {outcome}, only {outstanding} outstanding")]
    InsufficientShares {
        outcome: usize,
        requested: f64,
        outstanding: f64,
    },

    /// An intermediate or final value left the range of f64
    #[error("numeric overflow in {0}")]
    NumericOverflow(&'static str),

    /// The root finder could not bracket or pin down a solution
    #[error("root finder did not converge after {0} iterations")]
    NoConvergence(u32),
}

pub type Result<T> = std::result::Result<T, LmsrError>;
