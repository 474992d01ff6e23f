use std::ops::ControlFlow;

use nalgebra::{DVector, Dim, Matrix, RawStorage, Scalar};
use num_traits::Float;
use tracing::{debug, trace, warn};

use crate::{AuctionError, AuctionOutcome, AuctionSettings, Termination};

/// Snapshot of the market handed to the observer after each clearing step.
#[derive(Debug)]
pub struct Round<'a, T> {
    /// 1-based, counted across all phases
    pub iteration: usize,
    /// 0-based epsilon-scaling phase
    pub phase: usize,
    pub epsilon: T,
    pub prices: &'a DVector<T>,
    pub assignment: &'a [Option<usize>],
    pub unassigned: &'a [usize],
}

#[derive(Debug, Clone, Copy)]
struct Bid<T> {
    bidder: usize,
    price: T,
}

struct Market<'c, T, R: Dim, C: Dim, S> {
    costs: &'c Matrix<T, R, C, S>,
    prices: DVector<T>,
    assignment: Vec<Option<usize>>,
    unassigned: Vec<usize>,
    bids: Vec<Option<Bid<T>>>,
}

impl<'c, T, R, C, S> Market<'c, T, R, C, S>
where
    T: Float + Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    fn new(costs: &'c Matrix<T, R, C, S>, prices: DVector<T>) -> Self {
        let goods = costs.ncols();
        Self {
            costs,
            prices,
            assignment: vec![None; goods],
            unassigned: (0..costs.nrows()).collect(),
            bids: vec![None; goods],
        }
    }

    /// Releases every good while keeping the prices, to start a new phase.
    fn reopen(&mut self) {
        self.assignment.fill(None);
        self.unassigned = (0..self.costs.nrows()).collect();
    }

    /// The good a bidder wants most, and the price it offers for it.
    fn bid(&self, bidder: usize, epsilon: T) -> Option<(usize, T)> {
        let mut best: Option<(usize, T)> = None;
        let mut second = T::neg_infinity();

        // ascending scan with strict comparison keeps the lowest index on ties
        for good in 0..self.prices.len() {
            let value = self.prices[good] - self.costs[(bidder, good)];
            match best {
                Some((_, top)) if value <= top => second = second.max(value),
                Some((_, top)) => {
                    second = top;
                    best = Some((good, value));
                }
                None => best = Some((good, value)),
            }
        }

        let (good, top) = best?;
        // a lone good has no alternative to outbid
        let increment = if second.is_finite() {
            top - second
        } else {
            T::zero()
        };
        let price = self.prices[good];
        let mut offer = price - increment - epsilon;
        // epsilon can vanish against a large price; force a strictly lower bid
        if offer >= price {
            offer = price - (price.abs() * T::epsilon()).max(T::min_positive_value());
        }
        Some((good, offer))
    }

    /// One bidding round: every unassigned bidder bids, then each good clears
    /// to its lowest bid.
    fn round(&mut self, epsilon: T) {
        let mut snapshot = std::mem::take(&mut self.unassigned);
        snapshot.sort_unstable();

        // bidding reads prices only
        self.bids.fill(None);
        let mut targets = Vec::with_capacity(snapshot.len());
        for &bidder in snapshot.iter() {
            let Some((good, price)) = self.bid(bidder, epsilon) else {
                continue;
            };
            targets.push((bidder, good));
            let outbids = self.bids[good].is_none_or(|current| price < current.price);
            if outbids {
                self.bids[good] = Some(Bid { bidder, price });
            }
        }

        // clearing writes prices and the assignment, one decision per good
        let mut unassigned = Vec::new();
        for (good, bid) in self.bids.iter().enumerate() {
            let Some(Bid { bidder, price }) = *bid else {
                continue;
            };
            self.prices[good] = price;
            let previous = self.assignment[good];
            match previous {
                Some(holder) if holder == bidder => {}
                _ => {
                    if let Some(displaced) = previous {
                        unassigned.push(displaced);
                    }
                    self.assignment[good] = Some(bidder);
                    debug!(good, bidder, "good has new bidder");
                }
            }
        }

        unassigned.extend(targets.into_iter().filter_map(|(bidder, good)| {
            match self.bids[good] {
                Some(winner) if winner.bidder == bidder => None,
                _ => Some(bidder),
            }
        }));
        unassigned.sort_unstable();
        self.unassigned = unassigned;
    }

    fn into_outcome(
        mut self,
        iterations: usize,
        phases: usize,
        termination: Termination,
    ) -> AuctionOutcome<T> {
        self.unassigned.sort_unstable();
        AuctionOutcome {
            assignment: self.assignment,
            prices: self.prices,
            iterations,
            phases,
            termination,
            unassigned: self.unassigned,
        }
    }
}

fn validate<T, R, C, S>(
    costs: &Matrix<T, R, C, S>,
    prices: &DVector<T>,
    settings: &AuctionSettings,
) -> Result<Vec<T>, AuctionError>
where
    T: Float + Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    let AuctionSettings {
        epsilon,
        max_iterations,
        scaling,
    } = settings;

    if !epsilon.is_finite() || *epsilon <= 0. {
        return Err(AuctionError::Configuration(format!(
            "epsilon must be positive and finite, got {epsilon}"
        )));
    }
    if *max_iterations == 0 {
        return Err(AuctionError::Configuration(
            "max_iterations must be positive".to_string(),
        ));
    }
    if prices.len() != costs.ncols() {
        return Err(AuctionError::Configuration(format!(
            "{} prices given for {} goods",
            prices.len(),
            costs.ncols()
        )));
    }
    if !costs.iter().all(|&c| c.is_finite()) {
        return Err(AuctionError::Configuration(
            "costs must be finite".to_string(),
        ));
    }
    if !prices.iter().all(|&p| p.is_finite()) {
        return Err(AuctionError::Configuration(
            "prices must be finite".to_string(),
        ));
    }
    if costs.nrows() != costs.ncols() {
        return Err(AuctionError::Dimension {
            bidders: costs.nrows(),
            goods: costs.ncols(),
        });
    }
    if let Some(scaling) = scaling {
        if !scaling.initial_epsilon.is_finite() || scaling.initial_epsilon < *epsilon {
            return Err(AuctionError::Configuration(format!(
                "initial epsilon {} must be finite and at least {epsilon}",
                scaling.initial_epsilon
            )));
        }
        if !scaling.factor.is_finite() || scaling.factor <= 1. {
            return Err(AuctionError::Configuration(format!(
                "scaling factor must be finite and greater than 1, got {}",
                scaling.factor
            )));
        }
    }

    settings
        .schedule()
        .into_iter()
        .map(|eps| {
            num_traits::cast::<f64, T>(eps).ok_or_else(|| {
                AuctionError::Configuration(format!("epsilon {eps} is not representable"))
            })
        })
        .collect()
}

/// Assigns bidders (rows of `costs`) to goods (columns) minimizing total cost.
///
/// `prices` seeds the price of each good and is returned, updated, in the
/// outcome. A converged outcome is within `bidders * epsilon` of the optimal
/// total cost. Running out of iterations is not an error: the partial
/// assignment is returned with [`Termination::IterationLimit`].
pub fn auction<T, R, C, S>(
    costs: &Matrix<T, R, C, S>,
    prices: DVector<T>,
    settings: &AuctionSettings,
) -> Result<AuctionOutcome<T>, AuctionError>
where
    T: Float + Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
{
    auction_with(costs, prices, settings, |_| ControlFlow::Continue(()))
}

/// Like [`auction`], calling `observer` after every round. Returning
/// [`ControlFlow::Break`] stops the solve with [`Termination::Interrupted`].
pub fn auction_with<T, R, C, S, F>(
    costs: &Matrix<T, R, C, S>,
    prices: DVector<T>,
    settings: &AuctionSettings,
    mut observer: F,
) -> Result<AuctionOutcome<T>, AuctionError>
where
    T: Float + Scalar,
    R: Dim,
    C: Dim,
    S: RawStorage<T, R, C>,
    F: FnMut(&Round<'_, T>) -> ControlFlow<()>,
{
    let schedule = validate(costs, &prices, settings)?;
    let last_phase = schedule.len() - 1;

    let mut market = Market::new(costs, prices);
    let mut iterations = 0;
    let mut phases = 0;

    for (phase, &epsilon) in schedule.iter().enumerate() {
        phases += 1;
        if phase > 0 {
            market.reopen();
        }
        debug!(phase, epsilon = ?epsilon, "starting auction phase");

        while !market.unassigned.is_empty() {
            if iterations >= settings.max_iterations {
                warn!(
                    iterations,
                    unassigned = market.unassigned.len(),
                    "max iteration reached in auction"
                );
                return Ok(market.into_outcome(iterations, phases, Termination::IterationLimit));
            }

            iterations += 1;
            market.round(epsilon);
            trace!(
                iteration = iterations,
                unassigned = market.unassigned.len(),
                "auction round cleared"
            );

            let flow = observer(&Round {
                iteration: iterations,
                phase,
                epsilon,
                prices: &market.prices,
                assignment: &market.assignment,
                unassigned: &market.unassigned,
            });
            if flow.is_break() {
                let termination = if phase == last_phase && market.unassigned.is_empty() {
                    Termination::Converged
                } else {
                    Termination::Interrupted
                };
                debug!(iterations, "auction interrupted by observer");
                return Ok(market.into_outcome(iterations, phases, termination));
            }
        }
    }

    Ok(market.into_outcome(iterations, phases, Termination::Converged))
}
