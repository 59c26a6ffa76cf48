use crate::Probability;
use crate::table::Action;
use crate::table::Event;
use crate::table::PlayerId;
use crate::table::State;

/// Supplies the likelihood of an opponent choosing an action.
///
/// Called once per candidate action at every chance node, with the full
/// candidate set the search is considering there. The values over
/// `candidates` should sum to one; the [`super::Registry`] renormalizes
/// small drift and replaces failures with a uniform guess.
pub trait OpponentModel: Send + Sync {
    fn probability(
        &self,
        opponent: PlayerId,
        action: &Action,
        state: &State,
        candidates: &[Action],
    ) -> anyhow::Result<Probability>;
    /// Learns from an event observed at a real table. Search never calls this.
    fn observe(&self, _event: &Event) {}
}
