use crate::Probability;
use crate::table::Action;
use std::cmp::Ordering;

/// An action paired with the estimated probability of it being taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub action: Action,
    pub probability: Probability,
}

impl From<(Action, Probability)> for Candidate {
    fn from((action, probability): (Action, Probability)) -> Self {
        Self {
            action,
            probability,
        }
    }
}

impl Candidate {
    /// Equal mass over every action.
    pub fn uniform(actions: &[Action]) -> Vec<Self> {
        let p = 1.0 / actions.len().max(1) as Probability;
        actions.iter().map(|a| Self::from((*a, p))).collect()
    }
    /// Trace order: likelier first, then larger sizes of the same action
    /// type, then by name.
    pub fn order(&self, other: &Self) -> Ordering {
        other
            .probability
            .partial_cmp(&self.probability)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match self.action.label() == other.action.label() {
                true => other.action.amount().cmp(&self.action.amount()),
                false => self.action.label().cmp(other.action.label()),
            })
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<12} {:.3}", self.action.to_string(), self.probability)
    }
}
