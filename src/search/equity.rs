use super::samples::Samples;
use crate::Chips;
use crate::Defect;
use crate::cards::Board;
use crate::cards::Deck;
use crate::cards::Hand;
use crate::cards::Ranker;
use crate::cards::Strength;
use crate::table::PlayerId;
use crate::table::State;
use rand::Rng;
use std::sync::Arc;

/// Monte Carlo showdown resolution.
///
/// Each trial completes the board from the unseen cards, deals every
/// opponent whose cards are unknown two more, and pays the whole pot to the
/// searching player only if their hand strictly beats every opponent.
///
/// By default each opponent draws from the pool left after the board,
/// independently of the other opponents, and ties pay nothing. `exclusive`
/// deals all opponents from one shared pool; `split` credits a tie with an
/// equal share of the pot.
///
/// Payouts are all or nothing over the whole pot: there are no side pots,
/// and chips a short all-in caller could not match are not returned to the
/// searching player when they lose.
#[derive(Clone)]
pub struct Equity {
    ranker: Arc<dyn Ranker>,
    trials: usize,
    exclusive: bool,
    split: bool,
}

impl Equity {
    pub fn new(ranker: Arc<dyn Ranker>, trials: usize) -> Self {
        Self {
            ranker,
            trials,
            exclusive: false,
            split: false,
        }
    }
    pub fn exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }
    pub fn split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Payout multiset for `bot` at a showdown (or uncontested) state.
    pub fn estimate<R: Rng>(&self, bot: PlayerId, state: &State, rng: &mut R) -> anyhow::Result<Samples> {
        let pot = state.pot();
        let hero = state.seat(bot)?;
        let mut samples = Samples::default();
        if !hero.is_active() {
            samples.add(0);
            return Ok(samples);
        }
        let opponents = state.opponents(bot)?;
        if opponents.is_empty() {
            samples.add(pot);
            return Ok(samples);
        }
        let hole = Hand::from(hero.cards().ok_or(Defect::UnknownHole(bot))?);
        let board = state.board();
        let known = opponents
            .iter()
            .filter_map(|s| s.cards())
            .map(Hand::from)
            .fold(Hand::add(hole, Hand::from(board)), Hand::add);
        let hidden = opponents.iter().map(|s| s.cards().map(Hand::from)).collect::<Vec<_>>();
        for _ in 0..self.trials {
            samples.add(self.trial(pot, hole, board, known, &hidden, rng)?);
        }
        log::trace!("showdown {} over {} trials: {}", pot, self.trials, samples);
        Ok(samples)
    }

    fn trial<R: Rng>(
        &self,
        pot: Chips,
        hole: Hand,
        board: Board,
        known: Hand,
        opponents: &[Option<Hand>],
        rng: &mut R,
    ) -> anyhow::Result<Chips> {
        let mut deck = Deck::without(known);
        let board = Hand::add(Hand::from(board), Self::deal(&mut deck, board.missing(), rng)?);
        let mut holes = Vec::with_capacity(opponents.len());
        for known in opponents {
            let hole = match known {
                Some(hole) => *hole,
                None if self.exclusive => Self::deal(&mut deck, 2, rng)?,
                None => Self::deal(&mut deck.clone(), 2, rng)?,
            };
            holes.push(hole);
        }
        let Some(hero) = self.strength(Hand::add(hole, board)) else {
            return Ok(0);
        };
        let mut ties = 0;
        for hole in holes {
            match self.strength(Hand::add(hole, board)) {
                None => return Ok(0),
                Some(villain) if villain > hero => return Ok(0),
                Some(villain) if villain == hero => ties += 1,
                Some(_) => {}
            }
        }
        match ties {
            0 => Ok(pot),
            n if self.split => Ok(pot / (n + 1)),
            _ => Ok(0),
        }
    }
    fn deal<R: Rng>(deck: &mut Deck, n: usize, rng: &mut R) -> anyhow::Result<Hand> {
        let left = deck.size();
        deck.deal(n, rng)
            .ok_or_else(|| Defect::DeckExhausted { needed: n, left }.into())
    }
    /// Oracle failures count the trial as a loss.
    fn strength(&self, hand: Hand) -> Option<Strength> {
        self.ranker
            .rank(hand)
            .inspect_err(|e| log::warn!("rank oracle failed on {}: {}", hand, e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Bitwise;
    use crate::cards::Hole;
    use crate::cards::Street;
    use crate::table::Seat;
    use crate::table::Snapshot;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const HERO: PlayerId = PlayerId::from_raw(0);
    const VILLAIN: PlayerId = PlayerId::from_raw(1);

    fn showdown(hero: &str, villain: Option<&str>, board: &str) -> State {
        let villain = match villain {
            Some(cards) => Seat::from((VILLAIN, 500)).with_cards(Hole::try_from(cards).unwrap()),
            None => Seat::from((VILLAIN, 500)),
        };
        State::try_from(Snapshot {
            seats: vec![
                Seat::from((HERO, 500)).with_cards(Hole::try_from(hero).unwrap()),
                villain,
            ],
            board: Board::try_from(Hand::try_from(board).unwrap()).unwrap(),
            pot: 300,
            street: Street::Show,
            dealer: VILLAIN,
            ..Snapshot::default()
        })
        .unwrap()
    }

    #[test]
    fn royal_flush_wins_whole_pot() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let state = showdown("As Ks", None, "Qs Js Ts");
        let samples = Equity::new(Arc::new(Bitwise), 200)
            .estimate(HERO, &state, rng)
            .unwrap();
        assert_eq!(samples.len(), 200);
        assert_eq!(samples.mean(), Some(300.0));
    }

    #[test]
    fn dominated_hand_wins_nothing() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let state = showdown("2c 3d", Some("Kc As"), "Ks Kh Kd 9s 8s");
        let samples = Equity::new(Arc::new(Bitwise), 50)
            .estimate(HERO, &state, rng)
            .unwrap();
        assert_eq!(samples.mean(), Some(0.0));
    }

    #[test]
    fn ties_pay_only_when_splitting() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let state = showdown("2c 3d", Some("2d 3c"), "Ts Js Qs Ks As");
        let equity = Equity::new(Arc::new(Bitwise), 10);
        assert_eq!(equity.estimate(HERO, &state, rng).unwrap().mean(), Some(0.0));
        let equity = equity.split(true);
        assert_eq!(equity.estimate(HERO, &state, rng).unwrap().mean(), Some(150.0));
    }

    #[test]
    fn overpair_usually_wins() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let state = showdown("As Ah", None, "Ks Qd 2c");
        let mean = Equity::new(Arc::new(Bitwise), 2000)
            .estimate(HERO, &state, rng)
            .unwrap()
            .mean()
            .unwrap();
        assert!(mean > 0.7 * 300.0);
    }

    #[test]
    fn uncontested_pays_pot() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let state = State::try_from(Snapshot {
            seats: vec![
                Seat::from((HERO, 500)).with_cards(Hole::try_from("7c 2d").unwrap()),
                Seat::from((VILLAIN, 500)).with_status(crate::table::Status::Folding),
            ],
            pot: 80,
            ..Snapshot::default()
        })
        .unwrap();
        let samples = Equity::new(Arc::new(Bitwise), 20)
            .estimate(HERO, &state, rng)
            .unwrap();
        assert_eq!(samples.mean(), Some(80.0));
    }

    struct Broken;
    impl Ranker for Broken {
        fn rank(&self, _: Hand) -> anyhow::Result<Strength> {
            anyhow::bail!("offline")
        }
    }

    #[test]
    fn oracle_failure_counts_as_loss() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let state = showdown("As Ks", None, "Qs Js Ts");
        let samples = Equity::new(Arc::new(Broken), 20)
            .estimate(HERO, &state, rng)
            .unwrap();
        assert_eq!(samples.mean(), Some(0.0));
        assert_eq!(samples.len(), 20);
    }

    /// River showdown against `n` opponents with unknown cards.
    fn crowd(n: u32) -> State {
        let villains = (1..=n).map(|i| Seat::from((PlayerId::from_raw(i), 500)));
        State::try_from(Snapshot {
            seats: std::iter::once(Seat::from((HERO, 500)).with_cards(Hole::try_from("2c 7d").unwrap()))
                .chain(villains)
                .collect(),
            board: Board::try_from(Hand::try_from("Ks Qd 9h 5s 3c").unwrap()).unwrap(),
            pot: 300,
            street: Street::Show,
            dealer: PlayerId::from_raw(n),
            ..Snapshot::default()
        })
        .unwrap()
    }

    #[test]
    fn exclusive_deals_from_one_pool() {
        let ref mut rng = SmallRng::seed_from_u64(4);
        let exclusive = Equity::new(Arc::new(Bitwise), 30).exclusive(true);
        let samples = exclusive.estimate(HERO, &crowd(22), rng).unwrap();
        assert_eq!(samples.len(), 30);
        let err = exclusive.estimate(HERO, &crowd(23), rng).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Defect>(),
            Some(&Defect::DeckExhausted { needed: 2, left: 1 })
        );
    }

    #[test]
    fn independent_opponents_never_exhaust() {
        let ref mut rng = SmallRng::seed_from_u64(4);
        let samples = Equity::new(Arc::new(Bitwise), 30)
            .estimate(HERO, &crowd(23), rng)
            .unwrap();
        assert_eq!(samples.len(), 30);
    }
}
