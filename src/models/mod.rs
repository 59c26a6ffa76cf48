//! Opponent action models.
//!
//! - [`OpponentModel`]: Probability of an opponent taking an action
//! - [`Uniform`]: Equal mass over every candidate
//! - [`Tendency`]: Fold / passive / aggressive frequencies learned from play
//! - [`Registry`]: Shared, concurrently readable map of models by player
mod model;
mod registry;
mod tendency;
mod uniform;

pub use model::*;
pub use registry::*;
pub use tendency::*;
pub use uniform::*;
