//! Property tests for the share estimator.

use lmsr_reference::cost::{costs_buying, liquidity_param};
use lmsr_reference::{calc_shares, solve_shares};
use proptest::prelude::*;

fn distribution() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1.0e4, 2..6)
}

proptest! {
    /// Paying more always buys more shares.
    #[test]
    fn prop_estimator_strictly_increasing(
        shares in distribution(),
        b in 1.0e2f64..1.0e4,
        tokens in 0.0f64..1.0e4,
        extra in 1.0f64..1.0e3,
        pick in any::<prop::sample::Index>(),
    ) {
        let outcome = pick.index(shares.len());
        let fewer = calc_shares(tokens, outcome, &shares, b).unwrap();
        let more = calc_shares(tokens + extra, outcome, &shares, b).unwrap();
        prop_assert!(more > fewer, "more = {}, fewer = {}", more, fewer);
    }

    /// Paying nothing buys nothing.
    #[test]
    fn prop_zero_payment_buys_zero(
        shares in distribution(),
        b in 1.0e2f64..1.0e4,
        pick in any::<prop::sample::Index>(),
    ) {
        let outcome = pick.index(shares.len());
        let bought = calc_shares(0.0, outcome, &shares, b).unwrap();
        prop_assert!(bought.abs() < 1.0e-8, "bought = {}", bought);
    }

    /// Either outcome of a balanced binary market is priced the same.
    #[test]
    fn prop_balanced_binary_market_symmetric(
        level in 0.0f64..1.0e6,
        funding in 1.0f64..1.0e6,
        spend in 0.0f64..10.0,
    ) {
        let b = liquidity_param(funding, 2).unwrap();
        let tokens = spend * funding;
        let shares = [level, level];
        let first = calc_shares(tokens, 0, &shares, b).unwrap();
        let second = calc_shares(tokens, 1, &shares, b).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The estimator undoes the buying cost.
    #[test]
    fn prop_estimator_inverts_buying_cost(
        shares in distribution(),
        b in 1.0e2f64..1.0e4,
        requested in 1.0f64..1.0e4,
        pick in any::<prop::sample::Index>(),
    ) {
        let outcome = pick.index(shares.len());
        let tokens = costs_buying(&shares, outcome, requested, b).unwrap();
        let recovered = calc_shares(tokens, outcome, &shares, b).unwrap();
        prop_assert!(((recovered - requested) / requested).abs() < 1.0e-8,
            "requested = {}, recovered = {}", requested, recovered);
    }

    /// Closed form and bisection agree on arbitrary distributions.
    #[test]
    fn prop_closed_form_matches_bisection(
        shares in distribution(),
        b in 1.0e2f64..1.0e4,
        tokens in 1.0f64..1.0e4,
        pick in any::<prop::sample::Index>(),
    ) {
        let outcome = pick.index(shares.len());
        let closed = calc_shares(tokens, outcome, &shares, b).unwrap();
        let bisected = solve_shares(tokens, outcome, &shares, b).unwrap();
        prop_assert!(((closed - bisected) / bisected).abs() < 1.0e-8,
            "closed = {}, bisected = {}", closed, bisected);
    }
}
