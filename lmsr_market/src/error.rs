use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarketError {
    /// Outcome index is outside the share distribution
    InvalidOutcome = 1,
    /// Share amount must be positive and share counts non-negative
    InvalidAmount = 2,
    /// Funding must be positive
    InvalidFunding = 3,
    /// A market needs at least two outcomes
    InvalidOutcomeCount = 4,
    /// Cannot sell more shares than are outstanding
    InsufficientBalance = 5,
    /// Arithmetic overflow
    Overflow = 6,
}
