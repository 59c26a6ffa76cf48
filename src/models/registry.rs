use super::model::OpponentModel;
use super::uniform::Uniform;
use crate::Probability;
use crate::search::Candidate;
use crate::table::Action;
use crate::table::Event;
use crate::table::PlayerId;
use crate::table::State;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

/// Opponent models keyed by player, shared between the table and searches.
///
/// Cloning yields another handle to the same map. Observed play may update
/// a model while a search is reading it.
#[derive(Clone)]
pub struct Registry {
    models: Arc<RwLock<HashMap<PlayerId, Arc<dyn OpponentModel>>>>,
    fallback: Arc<dyn OpponentModel>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Arc::new(Uniform))
    }
}

impl Registry {
    /// A registry answering with `fallback` for unregistered players.
    pub fn new(fallback: Arc<dyn OpponentModel>) -> Self {
        Self {
            models: Arc::new(RwLock::new(HashMap::new())),
            fallback,
        }
    }
    pub fn insert(&self, id: PlayerId, model: Arc<dyn OpponentModel>) {
        self.models
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, model);
    }
    pub fn remove(&self, id: PlayerId) -> Option<Arc<dyn OpponentModel>> {
        self.models
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id)
    }
    pub fn model(&self, id: PlayerId) -> Arc<dyn OpponentModel> {
        self.models
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
    /// Routes an event from the real table to its actor's model.
    pub fn observe(&self, event: &Event) {
        if let Some(actor) = event.actor() {
            self.model(actor).observe(event);
        }
    }
    /// The opponent's distribution over `actions`, normalized to one.
    /// Falls back to uniform when the model errs or returns nonsense.
    pub fn distribution(&self, opponent: PlayerId, state: &State, actions: &[Action]) -> Vec<Candidate> {
        let model = self.model(opponent);
        let probabilities = actions
            .iter()
            .map(|a| model.probability(opponent, a, state, actions))
            .collect::<anyhow::Result<Vec<Probability>>>();
        match probabilities {
            Err(e) => {
                log::warn!("model for {} failed, using uniform: {}", opponent, e);
                Candidate::uniform(actions)
            }
            Ok(ps) if ps.iter().any(|p| !p.is_finite() || *p < 0.0) || ps.iter().sum::<Probability>() <= 0.0 => {
                log::warn!("model for {} returned {:?}, using uniform", opponent, ps);
                Candidate::uniform(actions)
            }
            Ok(ps) => {
                let total = ps.iter().sum::<Probability>();
                if (total - 1.0).abs() > crate::PROBABILITY_TOLERANCE {
                    log::debug!("renormalizing {} model mass {:.4}", opponent, total);
                }
                actions
                    .iter()
                    .zip(ps)
                    .map(|(a, p)| Candidate::from((*a, p / total)))
                    .collect()
            }
        }
    }
}
