use super::model::OpponentModel;
use crate::Probability;
use crate::table::Action;
use crate::table::PlayerId;
use crate::table::State;

/// Every candidate equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl OpponentModel for Uniform {
    fn probability(&self, _: PlayerId, action: &Action, _: &State, candidates: &[Action]) -> anyhow::Result<Probability> {
        anyhow::ensure!(!candidates.is_empty(), "no candidates to choose from");
        match candidates.contains(action) {
            true => Ok(1.0 / candidates.len() as Probability),
            false => Ok(0.0),
        }
    }
}
