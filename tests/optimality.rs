use approx::assert_abs_diff_eq;
use auction::{auction, AuctionSettings};
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rstest::*;

mod common;
use common::brute_force_optimum;

fn settings() -> AuctionSettings {
    AuctionSettings::default().with_max_iterations(100_000)
}

// With integer costs and epsilon below 1 / n the auction is exactly optimal.
#[rstest]
#[case::basic_two(2, &[
    1., 2.,
    2., 1.,
], 2.)]
#[case::basic_two_rev(2, &[
    1., 2.,
    2., 100.,
], 4.)]
#[case::basic_four(4, &[
    82., 83., 69., 92.,
    77., 37., 49., 92.,
    11., 69.,  5., 86.,
     8.,  9., 98., 23.,
], 140.)]
#[case::basic_five(5, &[
    10.,  5., 13., 15., 16.,
     3.,  9., 18., 13.,  6.,
    10.,  7.,  2.,  2.,  2.,
     7., 11.,  9.,  7., 12.,
     7.,  9., 10.,  4., 12.,
], 23.)]
#[case::basic_five_2(5, &[
    20., 15., 18., 20., 25.,
    18., 20., 12., 14., 15.,
    21., 23., 25., 27., 25.,
    17., 18., 21., 23., 20.,
    18., 18., 16., 19., 20.,
], 86.)]
fn integer_costs_are_optimal(#[case] n: usize, #[case] values: &[f64], #[case] expected: f64) {
    let costs = DMatrix::from_row_slice(n, n, values);
    let outcome = auction(&costs, DVector::zeros(n), &settings()).unwrap();

    assert!(outcome.is_converged());
    assert!(outcome.is_bijection());
    assert_abs_diff_eq!(outcome.total_cost(&costs), expected);
    assert_abs_diff_eq!(brute_force_optimum(&costs), expected);
}

#[rstest]
#[case::scaled_four(4, &[
    82., 83., 69., 92.,
    77., 37., 49., 92.,
    11., 69.,  5., 86.,
     8.,  9., 98., 23.,
], 140.)]
#[case::scaled_five(5, &[
    20., 15., 18., 20., 25.,
    18., 20., 12., 14., 15.,
    21., 23., 25., 27., 25.,
    17., 18., 21., 23., 20.,
    18., 18., 16., 19., 20.,
], 86.)]
fn epsilon_scaling_reaches_optimum(
    #[case] n: usize,
    #[case] values: &[f64],
    #[case] expected: f64,
) {
    let costs = DMatrix::from_row_slice(n, n, values);
    let outcome = auction(
        &costs,
        DVector::zeros(n),
        &settings().with_scaling(25., 5.),
    )
    .unwrap();

    assert!(outcome.is_converged());
    assert_eq!(outcome.phases, 6);
    assert!(outcome.is_bijection());
    assert_abs_diff_eq!(outcome.total_cost(&costs), expected);
}

#[rstest]
fn random_costs_within_bound(
    #[values(1, 2, 3, 4, 5, 6)] n: usize,
    #[values(0.01, 0.1, 0.5)] epsilon: f64,
) {
    let mut rng = StdRng::seed_from_u64(n as u64);
    for _ in 0..20 {
        let costs = DMatrix::<f64>::from_fn(n, n, |_, _| rng.random());
        let outcome = auction(&costs, DVector::zeros(n), &settings().with_epsilon(epsilon)).unwrap();

        assert!(outcome.is_converged(), "costs: {costs}");
        assert!(outcome.is_bijection(), "costs: {costs}");
        let optimum = brute_force_optimum(&costs);
        let total = outcome.total_cost(&costs);
        assert!(total >= optimum - 1e-9, "costs: {costs}");
        assert!(
            total <= optimum + n as f64 * epsilon + 1e-9,
            "costs: {costs}"
        );
    }
}

#[rstest]
fn nonzero_initial_prices() {
    #[rustfmt::skip]
    let costs = DMatrix::from_row_slice(3, 3, &[
        4., 1., 3.,
        2., 0., 5.,
        3., 2., 2.,
    ]);
    let prices = DVector::from_vec(vec![7., -3., 0.5]);
    let outcome = auction(&costs, prices, &settings()).unwrap();

    assert!(outcome.is_converged());
    assert_abs_diff_eq!(outcome.total_cost(&costs), 5.);
}
