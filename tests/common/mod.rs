use nalgebra::DMatrix;

/// Exhaustive optimum over all permutations; only for tiny instances.
pub fn brute_force_optimum(costs: &DMatrix<f64>) -> f64 {
    fn search(costs: &DMatrix<f64>, bidder: usize, taken: &mut [bool], acc: f64, best: &mut f64) {
        if bidder == costs.nrows() {
            *best = best.min(acc);
            return;
        }
        for good in 0..costs.ncols() {
            if taken[good] {
                continue;
            }
            taken[good] = true;
            search(costs, bidder + 1, taken, acc + costs[(bidder, good)], best);
            taken[good] = false;
        }
    }

    let mut best = f64::INFINITY;
    search(costs, 0, &mut vec![false; costs.ncols()], 0., &mut best);
    best
}
