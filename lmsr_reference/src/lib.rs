//! Floating-point reference model of the LMSR market maker.
//!
//! Used to validate the fixed-point `lmsr_market` contract:
//! - [`cost`]: cost function, prices and trade costs
//! - [`estimator`]: closed-form shares bought for a token payment
//! - [`solver`]: the same inverse by bisection
//! - [`consistency`]: contract-versus-model cross-check

pub mod consistency;
pub mod cost;
pub mod error;
pub mod estimator;
pub mod market;
pub mod solver;

pub use consistency::{ConsistencyConfig, ConsistencyReport, CostOracle};
pub use error::{LmsrError, Result};
pub use estimator::{calc_shares, calc_shares_unguarded};
pub use market::MarketState;
pub use solver::solve_shares;
