use super::odds::Odds;
use crate::table::Action;
use crate::table::State;

/// Enumerates the finite candidate actions of whoever is due to act.
///
/// Fold or check, a call when facing a bet, one bet or raise per pot
/// fraction in the grid (clamped to the minimum legal raise, deduplicated,
/// ascending), and all-in. Bets and raises stop once the round has seen
/// `max_raises` of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing {
    grid: Vec<Odds>,
    shove: bool,
    max_raises: usize,
}

impl Default for Sizing {
    fn default() -> Self {
        Self::new(Odds::GRID.to_vec(), true, crate::MAX_RAISES_PER_ROUND)
    }
}

impl Sizing {
    pub fn new(grid: Vec<Odds>, shove: bool, max_raises: usize) -> Self {
        Self {
            grid,
            shove,
            max_raises,
        }
    }
    pub fn candidates(&self, state: &State) -> Vec<Action> {
        let Ok(seat) = state.actor() else {
            return Vec::new();
        };
        let stack = seat.stack();
        let deficit = state.deficit(seat.id());
        let open = state.may_raise() && state.n_raises() < self.max_raises;
        let mut options = Vec::new();
        match deficit {
            0 => options.push(Action::Check),
            _ => options.push(Action::Fold),
        }
        if deficit > 0 && deficit < stack {
            options.push(Action::Call(deficit));
        }
        if open {
            let min = state.min_raise().max(1);
            let pot = state.pot() + deficit;
            let mut sizes = self
                .grid
                .iter()
                .map(|odds| odds.of(pot).max(min))
                .filter(|n| deficit + n < stack)
                .collect::<Vec<_>>();
            sizes.sort_unstable();
            sizes.dedup();
            options.extend(sizes.into_iter().map(|n| match state.largest_bet() {
                0 => Action::Bet(n),
                _ => Action::Raise(n),
            }));
        }
        if stack > 0 && (stack <= deficit || (open && self.shove)) {
            options.push(Action::Shove(stack));
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Board;
    use crate::cards::Hand;
    use crate::cards::Street;
    use crate::table::PlayerId;
    use crate::table::Seat;
    use crate::table::Snapshot;

    fn flop(n_raises: usize) -> State {
        let hero = PlayerId::from(0);
        let villain = PlayerId::from(1);
        State::try_from(Snapshot {
            seats: vec![
                Seat::from((hero, 1000)),
                Seat::from((villain, 950)).with_stake(50),
            ],
            board: Board::try_from(Hand::try_from("Ks Qd 2c").unwrap()).unwrap(),
            pot: 100,
            street: Street::Flop,
            dealer: villain,
            n_raises,
            next: Some(hero),
            ..Snapshot::default()
        })
        .unwrap()
    }

    #[test]
    fn every_candidate_is_legal() {
        let state = flop(1);
        let actions = Sizing::default().candidates(&state);
        assert!(actions.len() > 4);
        assert!(actions.iter().all(|a| state.is_allowed(a)));
        assert_eq!(actions.first(), Some(&Action::Fold));
        assert_eq!(actions.last(), Some(&Action::Shove(1000)));
    }

    #[test]
    fn raise_sizes_ascend_without_duplicates() {
        let raises = Sizing::default()
            .candidates(&flop(1))
            .into_iter()
            .filter(|a| matches!(a, Action::Raise(_)))
            .map(|a| a.amount())
            .collect::<Vec<_>>();
        assert!(raises.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(raises.first(), Some(&50));
    }

    #[test]
    fn capped_round_only_calls() {
        let actions = Sizing::default().candidates(&flop(crate::MAX_RAISES_PER_ROUND));
        assert_eq!(actions, vec![Action::Fold, Action::Call(50)]);
    }
}
