use super::model::OpponentModel;
use crate::Probability;
use crate::table::Action;
use crate::table::Event;
use crate::table::PlayerId;
use crate::table::State;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Kinds of action an opponent's habits are tracked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Fold,
    Passive,
    Aggressive,
}

impl From<&Action> for Style {
    fn from(action: &Action) -> Self {
        match action {
            Action::Fold => Self::Fold,
            Action::Check | Action::Call(_) => Self::Passive,
            Action::Bet(_) | Action::Raise(_) | Action::Shove(_) => Self::Aggressive,
        }
    }
}

/// Learns how often one opponent folds, checks or calls, and bets or raises.
///
/// Counts are Laplace-smoothed. A style's mass is shared evenly among the
/// candidates of that style, so the raise mass spreads across bet sizes.
/// Counters are atomic: observation from the table thread never blocks
/// readers in a running search.
#[derive(Debug, Default)]
pub struct Tendency {
    folds: AtomicU64,
    passive: AtomicU64,
    aggressive: AtomicU64,
}

impl Tendency {
    fn counter(&self, style: Style) -> &AtomicU64 {
        match style {
            Style::Fold => &self.folds,
            Style::Passive => &self.passive,
            Style::Aggressive => &self.aggressive,
        }
    }
    pub fn count(&self, style: Style) -> u64 {
        self.counter(style).load(Ordering::Relaxed)
    }
    pub fn record(&self, style: Style) {
        self.counter(style).fetch_add(1, Ordering::Relaxed);
    }
}

impl OpponentModel for Tendency {
    fn probability(&self, _: PlayerId, action: &Action, _: &State, candidates: &[Action]) -> anyhow::Result<Probability> {
        anyhow::ensure!(!candidates.is_empty(), "no candidates to choose from");
        if !candidates.contains(action) {
            return Ok(0.0);
        }
        let style = Style::from(action);
        let weight = |s: Style| (self.count(s) + 1) as Probability;
        let members = |s: Style| candidates.iter().filter(|a| Style::from(*a) == s).count();
        let total = [Style::Fold, Style::Passive, Style::Aggressive]
            .into_iter()
            .filter(|s| members(*s) > 0)
            .map(weight)
            .sum::<Probability>();
        Ok(weight(style) / total / members(style) as Probability)
    }
    fn observe(&self, event: &Event) {
        match event {
            Event::Fold(_) => self.record(Style::Fold),
            Event::Check(_) | Event::Call(_) => self.record(Style::Passive),
            Event::Bet(..) | Event::Raise(..) | Event::AllIn(_) => self.record(Style::Aggressive),
            Event::NextPlayer(_) | Event::NewRound(..) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Board;
    use crate::cards::Hand;
    use crate::cards::Street;
    use crate::search::Odds;
    use crate::search::Sizing;
    use crate::table::Seat;
    use crate::table::Snapshot;

    fn facing() -> State {
        let hero = PlayerId::from(0);
        let villain = PlayerId::from(1);
        State::try_from(Snapshot {
            seats: vec![
                Seat::from((hero, 950)).with_stake(50),
                Seat::from((villain, 1000)),
            ],
            board: Board::try_from(Hand::try_from("Ks Qd 2c").unwrap()).unwrap(),
            pot: 100,
            street: Street::Flop,
            dealer: villain,
            n_raises: 1,
            next: Some(villain),
            ..Snapshot::default()
        })
        .unwrap()
    }

    #[test]
    fn sums_to_one() {
        let state = facing();
        let model = Tendency::default();
        let villain = PlayerId::from(1);
        let candidates = Sizing::default().candidates(&state);
        let total = candidates
            .iter()
            .map(|a| model.probability(villain, a, &state, &candidates).unwrap())
            .sum::<Probability>();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn learns_to_expect_folds() {
        let state = facing();
        let villain = PlayerId::from(1);
        let model = Tendency::default();
        let ref candidates = Sizing::default().candidates(&state);
        let before = model.probability(villain, &Action::Fold, &state, candidates).unwrap();
        for _ in 0..20 {
            model.observe(&Event::Fold(villain));
        }
        let after = model.probability(villain, &Action::Fold, &state, candidates).unwrap();
        assert!(after > before);
        assert!(after > 0.8);
        assert_eq!(model.count(Style::Fold), 20);
    }

    #[test]
    fn raise_mass_covers_custom_sizes() {
        let state = facing();
        let villain = PlayerId::from(1);
        let model = Tendency::default();
        model.observe(&Event::Raise(villain, 100));
        let candidates = Sizing::new(vec![Odds(1, 2), Odds(2, 1)], true, 6).candidates(&state);
        let raises = candidates
            .iter()
            .filter(|a| Style::from(*a) == Style::Aggressive)
            .map(|a| model.probability(villain, a, &state, &candidates).unwrap())
            .collect::<Vec<Probability>>();
        assert_eq!(raises.len(), 3);
        assert!(raises.iter().all(|p| *p > 0.0));
        assert!(raises.windows(2).all(|w| (w[0] - w[1]).abs() < 1e-12));
    }
}
