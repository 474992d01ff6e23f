use auction::{auction, AuctionSettings};
use nalgebra::DVector;

const ASSIGNMENT_SIZE: usize = 64;
const N: usize = 100;

fn main() {
    let settings = AuctionSettings::default()
        .with_max_iterations(1_000_000)
        .with_scaling(1., 4.);
    let mut total_cost = 0.;
    let mut total_iterations = 0;
    for _ in 0..N {
        let costs = nalgebra::DMatrix::<f64>::new_random(ASSIGNMENT_SIZE, ASSIGNMENT_SIZE);
        let outcome = match auction(&costs, DVector::zeros(ASSIGNMENT_SIZE), &settings) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("{err}");
                return;
            }
        };
        if let Some(warning) = outcome.convergence_warning() {
            eprintln!("skipping: {warning}");
            continue;
        }
        total_cost += outcome.pairs().map(|a| costs[a]).sum::<f64>();
        total_iterations += outcome.iterations;
    }

    println!("total: {total_cost}, iterations: {total_iterations}");
}
