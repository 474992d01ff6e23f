use crate::ConvergenceWarning;
use nalgebra::{DVector, Dim, Matrix, RawStorage};

/// Why the bidding loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Every bidder holds exactly one good
    Converged,
    /// The iteration budget ran out with bidders still unassigned
    IterationLimit,
    /// The round observer asked to stop
    Interrupted,
}

/// Result of a solve: who holds what, at which prices.
#[derive(Debug, Clone)]
pub struct AuctionOutcome<T> {
    /// Indexed by good, the bidder currently holding it
    pub assignment: Vec<Option<usize>>,
    /// Final price of each good
    pub prices: DVector<T>,
    /// Bidding rounds performed, across all phases
    pub iterations: usize,
    /// Epsilon-scaling phases entered (1 without scaling)
    pub phases: usize,
    pub termination: Termination,
    /// Bidders left without a good, ascending
    pub unassigned: Vec<usize>,
}

impl<T> AuctionOutcome<T> {
    pub fn is_converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn convergence_warning(&self) -> Option<ConvergenceWarning> {
        match self.termination {
            Termination::IterationLimit => Some(ConvergenceWarning {
                iterations: self.iterations,
                unassigned: self.unassigned.clone(),
            }),
            Termination::Converged | Termination::Interrupted => None,
        }
    }

    pub fn bidder_for(&self, good: usize) -> Option<usize> {
        self.assignment.get(good).copied().flatten()
    }

    pub fn good_for(&self, bidder: usize) -> Option<usize> {
        self.assignment.iter().position(|&b| b == Some(bidder))
    }

    /// Assigned `(bidder, good)` pairs in good order, usable directly as cost
    /// matrix indices.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(good, bidder)| bidder.map(|bidder| (bidder, good)))
    }

    /// Every good has a bidder and no bidder holds two goods.
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.assignment.len()];
        for bidder in self.assignment.iter() {
            match bidder {
                Some(b) if *b < seen.len() && !seen[*b] => seen[*b] = true,
                _ => return false,
            }
        }
        true
    }

    /// Sum of the costs of the assigned pairs.
    pub fn total_cost<R, C, S>(&self, costs: &Matrix<T, R, C, S>) -> T
    where
        T: num_traits::Float + nalgebra::Scalar,
        R: Dim,
        C: Dim,
        S: RawStorage<T, R, C>,
    {
        self.pairs()
            .filter_map(|pair| costs.get(pair).copied())
            .fold(T::zero(), |acc, c| acc + c)
    }
}
