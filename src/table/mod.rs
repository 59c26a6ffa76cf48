//! Persistent table state.
//!
//! A hand is a [`Snapshot`] at the root of a chain of single-event deltas.
//! [`State`] is a cheap, cloneable handle to one link of that chain: applying
//! an [`Event`] returns a new handle layered on top and leaves the receiver
//! untouched, so hypothetical futures share their common prefix.
//!
//! - [`PlayerId`]: Stable identity of a seated player
//! - [`Seat`] / [`Status`]: Per-player chips, cards and betting status
//! - [`Event`]: One observed or hypothesised change to the table
//! - [`Action`]: What a player may choose; expands into events via [`State::play`]
mod action;
mod event;
mod player;
mod rules;
mod seat;
mod snapshot;
mod state;

pub use action::*;
pub use event::*;
pub use player::*;
pub use seat::*;
pub use snapshot::*;
pub use state::*;
