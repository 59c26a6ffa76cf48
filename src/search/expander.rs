use super::candidate::Candidate;
use crate::Probability;
use crate::Tokens;
use crate::table::Action;
use crate::table::State;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// How a node's tokens are divided among its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// `tokens * count / draws`: effort follows likelihood.
    #[default]
    Proportional,
    /// `tokens / distinct`, saturating to zero when children outnumber tokens.
    Uniform,
}

/// How the searching player's own options are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decisions {
    /// Every candidate becomes a child with an equal share of tokens.
    #[default]
    Exhaustive,
    /// Candidates are drawn uniformly through the expander, like chance nodes.
    Sampled,
}

/// A sampled candidate and how often it was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub candidate: Candidate,
    pub count: usize,
}

/// One child of an expansion: the action, the state it leads to, the
/// tokens allotted to it, and its branch weight.
#[derive(Debug, Clone)]
pub struct Branch {
    pub action: Action,
    pub state: State,
    pub tokens: Tokens,
    pub weight: Probability,
    pub count: usize,
}

/// Reduces a distribution over candidate actions to a small, weighted set
/// of branches whose size is bounded by the token budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expander {
    samples: usize,
    split: Split,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new(crate::SAMPLES_PER_EXPANSION, Split::default())
    }
}

impl Expander {
    pub fn new(samples: usize, split: Split) -> Self {
        Self { samples, split }
    }
    /// Uniform draws for a budget. Never zero, so an expansion always
    /// yields at least one branch.
    pub fn draws(&self, tokens: Tokens) -> usize {
        self.samples.min(tokens).max(1)
    }
    /// Draws through the cumulative partition of `candidates` and collapses
    /// repeats into counts, in trace order.
    pub fn sample<R: Rng>(&self, candidates: &[Candidate], tokens: Tokens, rng: &mut R) -> Vec<Draw> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let cumulative = candidates
            .iter()
            .scan(0.0, |sum, c| {
                *sum += c.probability;
                Some(*sum)
            })
            .collect::<Vec<Probability>>();
        let mut counts = vec![0usize; candidates.len()];
        for _ in 0..self.draws(tokens) {
            let u = rng.random::<Probability>();
            let i = cumulative
                .iter()
                .position(|c| *c > u)
                .unwrap_or(candidates.len() - 1);
            counts[i] += 1;
        }
        let mut draws = candidates
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(c, count)| Draw {
                candidate: *c,
                count,
            })
            .collect::<Vec<Draw>>();
        draws.sort_by(|a, b| a.candidate.order(&b.candidate));
        for (c, p) in candidates.iter().zip(cumulative.iter()) {
            log::trace!("  {} cum {:.3}", c, p);
        }
        for draw in draws.iter() {
            log::trace!("  {} x{}", draw.candidate.action, draw.count);
        }
        draws
    }
    /// Tokens for a child drawn `count` times out of `draws` among
    /// `distinct` children.
    pub fn allot(&self, tokens: Tokens, count: usize, draws: usize, distinct: usize) -> Tokens {
        match self.split {
            Split::Proportional => tokens * count / draws.max(1),
            Split::Uniform => tokens / distinct.max(1),
        }
    }
    /// Samples `candidates` and applies each distinct action to `state`.
    pub fn expand<R: Rng>(
        &self,
        state: &State,
        candidates: &[Candidate],
        tokens: Tokens,
        rng: &mut R,
    ) -> anyhow::Result<Vec<Branch>> {
        let draws = self.sample(candidates, tokens, rng);
        let total = draws.iter().map(|d| d.count).sum::<usize>();
        let distinct = draws.len();
        log::debug!(
            "expanded {} tokens into {} branches from {} candidates",
            tokens,
            distinct,
            candidates.len()
        );
        draws
            .into_iter()
            .map(|draw| {
                Ok(Branch {
                    action: draw.candidate.action,
                    state: state.play(&draw.candidate.action)?,
                    tokens: self.allot(tokens, draw.count, total, distinct),
                    weight: draw.count as Probability / total as Probability,
                    count: draw.count,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::from((Action::Fold, 0.3)),
            Candidate::from((Action::Call(50), 0.4)),
            Candidate::from((Action::Raise(50), 0.1)),
            Candidate::from((Action::Raise(100), 0.1)),
            Candidate::from((Action::Raise(200), 0.05)),
            Candidate::from((Action::Shove(1000), 0.05)),
        ]
    }

    #[test]
    fn branch_count_bounded_by_budget() {
        let expander = Expander::default();
        for tokens in [1, 2, 3, 5, 10, 250] {
            let ref mut rng = SmallRng::seed_from_u64(tokens as u64);
            let draws = expander.sample(&candidates(), tokens, rng);
            assert!(draws.len() >= 1);
            assert!(draws.len() <= tokens.min(candidates().len()));
            let weight = draws
                .iter()
                .map(|d| d.count as Probability / expander.draws(tokens) as Probability)
                .sum::<Probability>();
            assert!((weight - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let expander = Expander::default();
        let a = expander.sample(&candidates(), 250, &mut SmallRng::seed_from_u64(7));
        let b = expander.sample(&candidates(), 250, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_budget_still_draws_once() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let draws = Expander::default().sample(&candidates(), 0, rng);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].count, 1);
    }

    #[test]
    fn certain_candidate_takes_everything() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let certain = vec![
            Candidate::from((Action::Fold, 0.0)),
            Candidate::from((Action::Call(50), 1.0)),
        ];
        let draws = Expander::default().sample(&certain, 250, rng);
        assert_eq!(draws, vec![Draw { candidate: certain[1], count: 100 }]);
    }

    #[test]
    fn uniform_split_saturates_to_zero() {
        let expander = Expander::new(100, Split::Uniform);
        assert_eq!(expander.allot(3, 1, 3, 5), 0);
        assert_eq!(expander.allot(10, 7, 10, 2), 5);
        let expander = Expander::new(100, Split::Proportional);
        assert_eq!(expander.allot(250, 40, 100, 3), 100);
    }
}
