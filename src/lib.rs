//! Epsilon-optimal assignment of bidders to goods by price bidding.
//!
//! Each unassigned bidder bids for the good with the best value
//! `price - cost`, lowering its price by the gap to its second-best option
//! plus `epsilon`. Each good clears to its lowest bid, displacing any previous
//! holder, until every bidder holds a good.

mod auction;
pub use auction::{auction, auction_with, Round};

mod error;
pub use error::{AuctionError, ConvergenceWarning};

mod outcome;
pub use outcome::{AuctionOutcome, Termination};

mod settings;
pub use settings::{AuctionSettings, Scaling};
