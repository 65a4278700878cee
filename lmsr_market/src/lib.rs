#![no_std]

mod constants;
mod error;
mod lmsr;

pub use constants::SCALE_FACTOR;
pub use error::MarketError;

use soroban_sdk::{contract, contractimpl, BytesN, Env, Vec};

/// LMSR Market Maker Contract
///
/// Stateless calculator for a Logarithmic Market Scoring Rule (LMSR)
/// automated market maker over any number of outcomes.
///
/// Every entry point receives the full market state:
/// - `funding` - initial funding of the market; b = funding / ln(n)
/// - `share_distribution` - outstanding shares per outcome (n >= 2)
///
/// The market id is accepted for interface compatibility with callers that
/// key markets by a 32-byte hash; it does not affect the result.
#[contract]
pub struct LmsrMarketMaker;

#[contractimpl]
impl LmsrMarketMaker {
    /// Cost of buying shares.
    ///
    /// # Arguments
    /// * `_market_id` - 32-byte market identifier
    /// * `funding` - Initial funding of the market
    /// * `share_distribution` - Outstanding shares per outcome
    /// * `outcome` - Index of the outcome being bought
    /// * `number_of_shares` - Shares requested
    ///
    /// # Returns
    /// Tokens to pay: C(q + shares * e_outcome) - C(q)
    pub fn calc_costs_buying(
        _env: Env,
        _market_id: BytesN<32>,
        funding: i128,
        share_distribution: Vec<i128>,
        outcome: u32,
        number_of_shares: i128,
    ) -> Result<i128, MarketError> {
        let b = lmsr::liquidity_param(funding, share_distribution.len())?;
        lmsr::calculate_buy_cost(&share_distribution, outcome, number_of_shares, b)
    }

    /// Earnings from selling shares.
    ///
    /// # Returns
    /// Tokens received: C(q) - C(q - shares * e_outcome)
    pub fn calc_earnings_selling(
        _env: Env,
        _market_id: BytesN<32>,
        funding: i128,
        share_distribution: Vec<i128>,
        outcome: u32,
        number_of_shares: i128,
    ) -> Result<i128, MarketError> {
        let b = lmsr::liquidity_param(funding, share_distribution.len())?;
        lmsr::calculate_sell_return(&share_distribution, outcome, number_of_shares, b)
    }

    /// Current marginal price of an outcome.
    ///
    /// # Returns
    /// Price scaled by 10^7 (5_000_000 = 0.5 = 50%)
    pub fn calc_marginal_price(
        _env: Env,
        _market_id: BytesN<32>,
        funding: i128,
        share_distribution: Vec<i128>,
        outcome: u32,
    ) -> Result<i128, MarketError> {
        let b = lmsr::liquidity_param(funding, share_distribution.len())?;
        lmsr::calculate_price(&share_distribution, outcome, b)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{vec, Env};

    const FUNDING: i128 = 100 * SCALE_FACTOR;

    fn setup_test() -> (Env, LmsrMarketMakerClient<'static>) {
        let env = Env::default();
        let contract_id = env.register(LmsrMarketMaker, ());
        let client = LmsrMarketMakerClient::new(&env, &contract_id);
        (env, client)
    }

    fn market_id(env: &Env) -> BytesN<32> {
        BytesN::from_array(env, &[0u8; 32])
    }

    #[test]
    fn test_buy_cost_positive() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];

        let cost = client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &(10 * SCALE_FACTOR));
        assert!(cost > 0);
        // At equal prices the cost lies between half and the full share count
        assert!(cost > 5 * SCALE_FACTOR && cost < 10 * SCALE_FACTOR, "cost = {}", cost);
    }

    #[test]
    fn test_buy_cost_ignores_market_id() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, 2 * FUNDING];
        let other_id = BytesN::from_array(&env, &[7u8; 32]);

        let a = client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &1, &SCALE_FACTOR);
        let b = client.calc_costs_buying(&other_id, &FUNDING, &distribution, &1, &SCALE_FACTOR);
        assert_eq!(a, b);
    }

    #[test]
    fn test_buy_cost_symmetric_outcomes() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];

        let yes = client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &(3 * SCALE_FACTOR));
        let no = client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &1, &(3 * SCALE_FACTOR));
        assert_eq!(yes, no);
    }

    #[test]
    fn test_cheaper_outcome_costs_less() {
        let (env, client) = setup_test();
        // Outcome 0 is favored, so outcome 1 is cheaper
        let distribution = vec![&env, 3 * FUNDING, FUNDING];

        let favored = client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &SCALE_FACTOR);
        let unfavored = client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &1, &SCALE_FACTOR);
        assert!(unfavored < favored, "favored = {}, unfavored = {}", favored, unfavored);
    }

    #[test]
    fn test_sell_after_buy_round_trip() {
        let (env, client) = setup_test();
        let amount = 20 * SCALE_FACTOR;
        let before = vec![&env, FUNDING, FUNDING, FUNDING];
        let after = vec![&env, FUNDING, FUNDING + amount, FUNDING];

        let cost = client.calc_costs_buying(&market_id(&env), &FUNDING, &before, &1, &amount);
        let earnings = client.calc_earnings_selling(&market_id(&env), &FUNDING, &after, &1, &amount);
        assert!((cost - earnings).abs() <= 1, "cost = {}, earnings = {}", cost, earnings);
    }

    #[test]
    fn test_small_buys_cost_something() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];

        let mut previous = 0;
        for shares in [10i128, 1_000, 100_000, 10_000_000] {
            let cost = client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &1, &shares);
            // Roughly half the share count at a price of 0.5
            assert!(cost > previous, "shares = {}, cost = {}", shares, cost);
            assert!((cost - shares / 2).abs() <= shares / 100 + 1, "shares = {}, cost = {}", shares, cost);
            previous = cost;
        }
    }

    #[test]
    fn test_price_at_equilibrium() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];

        let price_yes = client.calc_marginal_price(&market_id(&env), &FUNDING, &distribution, &0);
        let price_no = client.calc_marginal_price(&market_id(&env), &FUNDING, &distribution, &1);

        assert_eq!(price_yes, 5_000_000);
        assert_eq!(price_no, 5_000_000);
    }

    #[test]
    fn test_price_rises_after_buy() {
        let (env, client) = setup_test();
        let before = vec![&env, FUNDING, FUNDING, FUNDING, FUNDING];
        let after = vec![&env, FUNDING, FUNDING, FUNDING + FUNDING, FUNDING];

        let price_before = client.calc_marginal_price(&market_id(&env), &FUNDING, &before, &2);
        let price_after = client.calc_marginal_price(&market_id(&env), &FUNDING, &after, &2);

        assert!((price_before - 2_500_000).abs() < 10, "price_before = {}", price_before);
        assert!(price_after > price_before);
    }

    // --- Validation tests ---

    #[test]
    #[should_panic(expected = "Error(Contract, #1)")] // InvalidOutcome = 1
    fn test_buy_invalid_outcome() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];
        client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &2, &SCALE_FACTOR);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #2)")] // InvalidAmount = 2
    fn test_buy_zero_amount() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];
        client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &0);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #2)")] // InvalidAmount = 2
    fn test_buy_negative_share_count() {
        let (env, client) = setup_test();
        let distribution = vec![&env, -FUNDING, FUNDING];
        client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &SCALE_FACTOR);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #2)")] // InvalidAmount = 2
    fn test_buy_below_precision() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];
        // Costs half a base unit
        client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &1);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #3)")] // InvalidFunding = 3
    fn test_buy_zero_funding() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];
        client.calc_costs_buying(&market_id(&env), &0, &distribution, &0, &SCALE_FACTOR);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")] // InvalidOutcomeCount = 4
    fn test_buy_single_outcome() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING];
        client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &SCALE_FACTOR);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #5)")] // InsufficientBalance = 5
    fn test_sell_more_than_outstanding() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];
        client.calc_earnings_selling(&market_id(&env), &FUNDING, &distribution, &0, &(2 * FUNDING));
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #6)")] // Overflow = 6
    fn test_buy_overflowing_share_count() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];
        // shares / b no longer fits the fixed-point range
        client.calc_costs_buying(&market_id(&env), &FUNDING, &distribution, &0, &(i128::MAX / 2));
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1)")] // InvalidOutcome = 1
    fn test_price_invalid_outcome() {
        let (env, client) = setup_test();
        let distribution = vec![&env, FUNDING, FUNDING];
        client.calc_marginal_price(&market_id(&env), &FUNDING, &distribution, &5);
    }
}
