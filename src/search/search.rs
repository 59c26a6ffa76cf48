use super::equity::Equity;
use super::expander::Expander;
use super::node::Context;
use super::node::Node;
use super::sizing::Sizing;
use crate::Config;
use crate::Defect;
use crate::Tokens;
use crate::Utility;
use crate::cards::Ranker;
use crate::models::Registry;
use crate::table::Action;
use crate::table::PlayerId;
use crate::table::State;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;

/// Top-level decision driver for one seated player.
///
/// Builds a decision node at the root state, expands it under the token
/// budget, and ranks the root actions by EV. [`Search::decide`] never
/// fails: defects are logged and answered with a passive action.
pub struct Search {
    bot: PlayerId,
    config: Config,
    sizing: Sizing,
    expander: Expander,
    equity: Equity,
    registry: Registry,
}

impl Search {
    pub fn new(bot: PlayerId, config: Config, ranker: Arc<dyn Ranker>, registry: Registry) -> Self {
        Self {
            bot,
            sizing: config.sizing(),
            expander: config.expander(),
            equity: config.equity(ranker),
            registry,
            config,
        }
    }
    pub fn bot(&self) -> PlayerId {
        self.bot
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn context(&self) -> Context<'_> {
        Context {
            bot: self.bot,
            decisions: self.config.decisions,
            sizing: &self.sizing,
            expander: &self.expander,
            equity: &self.equity,
            registry: &self.registry,
            deadline: self.config.deadline().map(|d| Instant::now() + d),
        }
    }
    fn seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// The fully expanded tree rooted at `root`.
    pub fn tree(&self, root: &State, tokens: Tokens) -> anyhow::Result<Node> {
        if root.next_to_act() != Some(self.bot) {
            return Err(Defect::NoActor.into());
        }
        let mut node = Node::root(root.clone(), tokens, self.seed());
        node.expand(&self.context())?;
        log::debug!("search tree ({} nodes)\n{}", node.size(), node);
        Ok(node)
    }

    /// Root actions with their EVs, best first. Equal EVs are ordered by
    /// preference: check, fold, call, then bets by size, then all-in.
    pub fn evaluate(&self, root: &State, tokens: Tokens) -> anyhow::Result<Vec<(Action, Utility)>> {
        let node = self.tree(root, tokens)?;
        let mut ranking = node
            .children()
            .iter()
            .map(|child| Ok((child.action, child.node.ev()?)))
            .collect::<anyhow::Result<Vec<(Action, Utility)>>>()?;
        ranking.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.preference().cmp(&b.0.preference()))
        });
        Ok(ranking)
    }

    /// The action to send to the table. Always legal for the root state.
    pub fn decide(&self, root: &State, tokens: Tokens) -> Action {
        let fallback = root.passive();
        if root.next_to_act() != Some(self.bot) {
            log::error!("{} asked to act out of turn; {}", self.bot, fallback);
            return fallback;
        }
        match self.sizing.candidates(root).as_slice() {
            [] => {
                log::error!("{} has no options; {}", self.bot, fallback);
                return fallback;
            }
            [only] => {
                log::info!("{} has a single option: {}", self.bot, only);
                return *only;
            }
            _ => {}
        }
        match self.evaluate(root, tokens) {
            Ok(ranking) => {
                for (action, ev) in ranking.iter() {
                    log::debug!("{:<12} {:>10.2}", action.to_string(), ev);
                }
                match Self::best(&ranking) {
                    Some(action) => {
                        log::info!("{} decides {} with {} tokens", self.bot, action, tokens);
                        action
                    }
                    None => fallback,
                }
            }
            Err(e) => {
                match e.downcast_ref::<Defect>() {
                    Some(defect) => log::error!("defect: {}; falling back to {}", defect, fallback),
                    None => log::error!("search failed: {:#}; falling back to {}", e, fallback),
                }
                fallback
            }
        }
    }

    /// Highest EV, preferring the cheaper action among near-ties.
    pub fn best(ranking: &[(Action, Utility)]) -> Option<Action> {
        let top = ranking
            .iter()
            .map(|(_, ev)| *ev)
            .fold(Utility::NEG_INFINITY, Utility::max);
        ranking
            .iter()
            .filter(|(_, ev)| top - ev <= crate::EV_TOLERANCE)
            .map(|(action, _)| *action)
            .min_by_key(|action| action.preference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Bitwise;
    use crate::cards::Board;
    use crate::cards::Hand;
    use crate::cards::Hole;
    use crate::cards::Street;
    use crate::search::Decisions;
    use crate::search::Split;
    use crate::table::Seat;
    use crate::table::Snapshot;
    use crate::table::Status;

    const HERO: PlayerId = PlayerId::from_raw(0);
    const VILLAIN: PlayerId = PlayerId::from_raw(1);

    fn search(config: Config) -> Search {
        Search::new(HERO, config, Arc::new(Bitwise), Registry::default())
    }
    fn seeded(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            ..Config::default()
        }
    }

    /// Aces on a dry flop facing a half-pot bet.
    fn aces() -> State {
        State::try_from(Snapshot {
            seats: vec![
                Seat::from((HERO, 1000)).with_cards(Hole::try_from("As Ah").unwrap()),
                Seat::from((VILLAIN, 950)).with_stake(50),
            ],
            board: Board::try_from(Hand::try_from("Ks Qd 2c").unwrap()).unwrap(),
            pot: 100,
            street: Street::Flop,
            dealer: VILLAIN,
            n_raises: 1,
            next: Some(HERO),
            bettor: Some(VILLAIN),
            acted: vec![VILLAIN],
            ..Snapshot::default()
        })
        .unwrap()
    }

    #[test]
    fn aces_do_not_fold() {
        let search = search(seeded(42));
        let ranking = search.evaluate(&aces(), 250).unwrap();
        let fold = ranking
            .iter()
            .find(|(a, _)| *a == Action::Fold)
            .map(|(_, ev)| *ev)
            .unwrap();
        let raise = ranking
            .iter()
            .filter(|(a, _)| matches!(a, Action::Raise(_)))
            .map(|(_, ev)| *ev)
            .fold(Utility::NEG_INFINITY, Utility::max);
        assert_eq!(fold, 1000.0);
        assert!(raise > fold);
        assert_ne!(search.decide(&aces(), 250), Action::Fold);
    }

    #[test]
    fn seeded_search_is_reproducible() {
        let a = search(seeded(9)).evaluate(&aces(), 120).unwrap();
        let b = search(seeded(9)).evaluate(&aces(), 120).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_legal_action_regardless_of_budget() {
        let state = State::try_from(Snapshot {
            seats: vec![
                Seat::from((HERO, 1000))
                    .with_stake(50)
                    .with_cards(Hole::try_from("7c 2d").unwrap()),
                Seat::from((VILLAIN, 0))
                    .with_stake(50)
                    .with_status(Status::Shoving),
            ],
            pot: 3,
            dealer: VILLAIN,
            next: Some(HERO),
            ..Snapshot::default()
        })
        .unwrap();
        for tokens in [0, 1, 1000] {
            assert_eq!(search(seeded(0)).decide(&state, tokens), Action::Check);
        }
    }

    #[test]
    fn not_our_turn_falls_back() {
        let state = aces().play(&Action::Call(50)).unwrap();
        let search = Search::new(VILLAIN, seeded(0), Arc::new(Bitwise), Registry::default());
        assert!(search.evaluate(&state, 10).is_err());
        assert_eq!(search.decide(&state, 10), Action::Check);
    }

    #[test]
    fn zero_budget_still_ranks_every_action() {
        let search = search(seeded(5));
        let ranking = search.evaluate(&aces(), 0).unwrap();
        assert_eq!(ranking.len(), search.sizing.candidates(&aces()).len());
    }

    #[test]
    fn sampled_decisions_and_uniform_split() {
        let config = Config {
            decisions: Decisions::Sampled,
            split: Split::Uniform,
            ..seeded(11)
        };
        let ranking = search(config).evaluate(&aces(), 100).unwrap();
        assert!(!ranking.is_empty());
        assert!(ranking.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn ties_prefer_cheaper_actions() {
        let ranking = vec![
            (Action::Raise(100), 500.0),
            (Action::Call(50), 500.0),
            (Action::Fold, 400.0),
        ];
        assert_eq!(Search::best(&ranking), Some(Action::Call(50)));
    }

    #[test]
    fn failed_search_leaves_passive_fallback() {
        let state = aces().play(&Action::Call(50)).unwrap();
        let search = Search::new(VILLAIN, seeded(0), Arc::new(Bitwise), Registry::default());
        let ranking = search.evaluate(&state, 10).unwrap_or_default();
        assert_eq!(Search::best(&ranking), None);
        assert_eq!(Search::best(&ranking).unwrap_or_else(|| state.passive()), Action::Check);
    }
}
