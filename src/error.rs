use thiserror::Error;

/// Ways in which a solve can be rejected before any bidding happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuctionError {
    /// Malformed inputs: epsilon, iteration cap, price vector or non-finite values
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A complete bijection needs as many bidders as goods
    #[error("cannot assign {bidders} bidders to {goods} goods")]
    Dimension { bidders: usize, goods: usize },
}

/// Raised (non-fatally) when the iteration budget runs out while some bidders
/// still hold no good.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("auction stopped after {iterations} iterations with {} unassigned bidders", unassigned.len())]
pub struct ConvergenceWarning {
    pub iterations: usize,
    pub unassigned: Vec<usize>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            AuctionError::Dimension {
                bidders: 3,
                goods: 2
            }
            .to_string(),
            "cannot assign 3 bidders to 2 goods"
        );
        assert_eq!(
            ConvergenceWarning {
                iterations: 1,
                unassigned: vec![1, 2]
            }
            .to_string(),
            "auction stopped after 1 iterations with 2 unassigned bidders"
        );
    }
}
