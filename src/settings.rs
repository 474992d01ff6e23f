/// Tuning parameters for a single solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionSettings {
    /// Minimum bid decrement. The converged total cost is within
    /// `bidders * epsilon` of the optimum.
    pub epsilon: f64,
    /// Total number of bidding rounds allowed, shared across scaling phases.
    pub max_iterations: usize,
    /// Optional epsilon-scaling schedule ending at `epsilon`.
    pub scaling: Option<Scaling>,
}

impl AuctionSettings {
    pub const DEFAULT_EPSILON: f64 = 0.01;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_scaling(mut self, initial_epsilon: f64, factor: f64) -> Self {
        self.scaling = Some(Scaling {
            initial_epsilon,
            factor,
        });
        self
    }

    /// The epsilon used by each phase, coarsest first. Always ends at `epsilon`.
    ///
    /// Every phase costs at least one round, so coarse phases are truncated to
    /// fit within `max_iterations` phases in total.
    pub(crate) fn schedule(&self) -> Vec<f64> {
        let Some(Scaling {
            initial_epsilon,
            factor,
        }) = self.scaling
        else {
            return vec![self.epsilon];
        };

        let mut schedule = Vec::new();
        let mut current = initial_epsilon;
        while current > self.epsilon && schedule.len() + 1 < self.max_iterations {
            schedule.push(current);
            current /= factor;
        }
        schedule.push(self.epsilon);
        schedule
    }
}

impl Default for AuctionSettings {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            scaling: None,
        }
    }
}

/// Geometric epsilon schedule: start at `initial_epsilon`, divide by `factor`
/// each phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scaling {
    pub initial_epsilon: f64,
    pub factor: f64,
}
