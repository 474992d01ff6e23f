use auction::{auction, AuctionSettings};
use nalgebra::DVector;

fn main() {
    #[rustfmt::skip]
    let costs = nalgebra::Matrix4::from_row_slice(
        &[
            82., 83., 69., 92.,
            77., 37., 49., 92.,
            11., 69.,  5., 86.,
             8.,  9., 98., 23.,
        ]
    );
    let settings = AuctionSettings::default().with_max_iterations(10_000);

    match auction(&costs, DVector::zeros(4), &settings) {
        Ok(outcome) => {
            for (bidder, good) in outcome.pairs() {
                println!(
                    "bidder {bidder} -> good {good} at price {:.2}",
                    outcome.prices[good]
                );
            }
            if let Some(warning) = outcome.convergence_warning() {
                println!("warning: {warning}");
            }
            println!("total: {}", outcome.total_cost(&costs));
        }
        Err(err) => eprintln!("{err}"),
    }
}
