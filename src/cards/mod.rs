//! Card representation and hand evaluation.
//!
//! All representations favour bijective encodings and cheap bitwise operations.
//!
//! ## Core Types
//!
//! - [`Card`]: A single card as a `(Rank, Suit)` tuple encoded in one byte
//! - [`Hand`]: An unordered set of cards as a 64-bit bitmask
//! - [`Hole`]: A player's two private cards
//! - [`Board`]: The community cards (flop, turn, river)
//! - [`Deck`]: A shrinking pool of unseen cards for sampling
//!
//! ## Evaluation
//!
//! - [`Evaluator`]: Lazy bitwise hand evaluator
//! - [`Strength`]: Evaluated hand ranking with kicker resolution
//! - [`Ranking`]: Hand category (high card through straight flush)
//! - [`Ranker`]: The hand-rank oracle consumed by the showdown estimator
mod board;
mod card;
mod deck;
mod evaluator;
mod hand;
mod hole;
mod kicks;
mod rank;
mod ranker;
mod ranking;
mod street;
mod strength;
mod suit;

pub use board::*;
pub use card::*;
pub use deck::*;
pub use evaluator::*;
pub use hand::*;
pub use hole::*;
pub use kicks::*;
pub use rank::*;
pub use ranker::*;
pub use ranking::*;
pub use street::*;
pub use strength::*;
pub use suit::*;
