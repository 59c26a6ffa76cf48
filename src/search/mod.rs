//! Budgeted expectimax search.
//!
//! - [`Sizing`] / [`Odds`]: Discretise the bet space into pot-fraction sizes
//! - [`Candidate`]: An action paired with its estimated probability
//! - [`Expander`]: Sample candidates into weighted, deduplicated branches
//! - [`Equity`] / [`Samples`]: Monte Carlo showdown payouts
//! - [`Node`]: Decision, chance and terminal tree nodes
//! - [`Search`]: Expand a root under a token budget and pick an action
mod candidate;
mod equity;
mod expander;
mod node;
mod odds;
mod samples;
mod search;
mod sizing;

pub use candidate::*;
pub use equity::*;
pub use expander::*;
pub use node::*;
pub use odds::*;
pub use samples::*;
pub use search::*;
pub use sizing::*;
