use super::event::Event;
use super::player::PlayerId;
use super::seat::Seat;
use super::seat::Status;
use super::snapshot::Snapshot;
use crate::Chips;
use crate::Defect;
use crate::cards::Board;
use crate::cards::Deck;
use crate::cards::Hand;
use crate::cards::Street;
use std::sync::Arc;

/// Seating facts fixed for the whole hand.
#[derive(Debug)]
struct Table {
    order: Vec<PlayerId>,
    dealer: usize,
    big_blind: Chips,
}

/// Derived quantities answered in O(1). Each layer copies its
/// predecessor's cache and patches the fields its event touches.
#[derive(Debug, Clone, Copy)]
struct Cache {
    street: Street,
    board: Board,
    carried: Chips,
    round: Chips,
    largest: Chips,
    min_raise: Chips,
    n_raises: usize,
    next: Option<PlayerId>,
    bettor: Option<PlayerId>,
    acted: u64,
    active: u64,
    live: u64,
    depth: usize,
}

/// Seats rewritten at a layer. Unchanged seats are found further down.
#[derive(Debug)]
enum Change {
    Nothing,
    One(Seat),
    All(Arc<[Seat]>),
}

#[derive(Debug)]
enum Link {
    Base,
    Delta(State, Event),
}

#[derive(Debug)]
struct Layer {
    link: Link,
    change: Change,
    cache: Cache,
    stakes: Arc<[Chips]>,
    table: Arc<Table>,
}

/// A handle to one link of a persistent chain of table states.
///
/// The chain starts at a [`Snapshot`] and grows one [`Event`] at a time.
/// Layers are immutable and reference-counted, so cloning a `State` is a
/// pointer copy and sibling hypotheticals share every layer they have in
/// common. A layer is freed once no handle reaches it.
///
/// Pot, largest bet, minimum raise, next actor and per-player deficit are
/// cached at every layer. Seat lookups walk back to the nearest layer that
/// rewrote the seat; that walk is bounded by the number of events in a hand.
#[derive(Clone)]
pub struct State(Arc<Layer>);

impl TryFrom<Snapshot> for State {
    type Error = anyhow::Error;
    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        snapshot.validate()?;
        let ref seats = snapshot.seats;
        let bits = |f: &dyn Fn(&Seat) -> bool| -> u64 {
            seats
                .iter()
                .enumerate()
                .filter(|(_, s)| f(s))
                .fold(0u64, |mask, (i, _)| mask | 1 << i)
        };
        let (largest, second) = seats
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.stake())
            .fold((0, 0), |(most, next), stake| {
                if stake > most {
                    (stake, most)
                } else if stake > next {
                    (most, stake)
                } else {
                    (most, next)
                }
            });
        let acted = snapshot
            .acted
            .iter()
            .filter_map(|id| snapshot.position(*id))
            .fold(0u64, |mask, i| mask | 1 << i);
        let cache = Cache {
            street: snapshot.street,
            board: snapshot.board,
            carried: snapshot.pot,
            round: seats.iter().map(|s| s.stake()).sum(),
            largest,
            min_raise: snapshot
                .min_raise
                .unwrap_or_else(|| (largest - second).max(snapshot.big_blind)),
            n_raises: snapshot.n_raises,
            next: snapshot.next,
            bettor: snapshot.bettor,
            acted,
            active: bits(&|s: &Seat| s.is_active()),
            live: bits(&|s: &Seat| s.is_actionable()),
            depth: 0,
        };
        let table = Table {
            order: seats.iter().map(|s| s.id()).collect(),
            dealer: snapshot.position(snapshot.dealer).unwrap_or_default(),
            big_blind: snapshot.big_blind,
        };
        Ok(Self(Arc::new(Layer {
            link: Link::Base,
            stakes: seats.iter().map(|s| s.stake()).collect(),
            change: Change::All(seats.iter().copied().collect()),
            table: Arc::new(table),
            cache,
        })))
    }
}

impl State {
    /// Layers `event` on top of this state. The receiver is left untouched.
    pub fn try_apply(&self, event: Event) -> anyhow::Result<Self> {
        let mut cache = self.0.cache;
        let mut stakes = self.0.stakes.clone();
        cache.depth += 1;
        let change = match event {
            Event::Check(p) => {
                let (i, _) = self.due(p)?;
                if self.deficit_at(i) > 0 {
                    return Err(self.illegal(&event));
                }
                cache.acted |= 1 << i;
                cache.next = None;
                Change::Nothing
            }
            Event::Call(p) => {
                let (i, mut seat) = self.due(p)?;
                let amount = self.deficit_at(i).min(seat.stack());
                Self::wager(&mut cache, &mut stakes, i, &mut seat, amount);
                Change::One(seat)
            }
            Event::Bet(p, amount) => {
                let (i, mut seat) = self.due(p)?;
                let short = amount < self.min_raise() && amount < seat.stack();
                if self.largest_bet() > 0 || amount == 0 || amount > seat.stack() || short {
                    return Err(self.illegal(&event));
                }
                Self::wager(&mut cache, &mut stakes, i, &mut seat, amount);
                Change::One(seat)
            }
            Event::Raise(p, by) => {
                let (i, mut seat) = self.due(p)?;
                let amount = self.deficit_at(i) + by;
                let short = by < self.min_raise() && amount < seat.stack();
                if self.largest_bet() == 0 || by == 0 || amount > seat.stack() || short {
                    return Err(self.illegal(&event));
                }
                Self::wager(&mut cache, &mut stakes, i, &mut seat, amount);
                Change::One(seat)
            }
            Event::AllIn(p) => {
                let (i, mut seat) = self.due(p)?;
                if seat.stack() == 0 {
                    return Err(self.illegal(&event));
                }
                let stack = seat.stack();
                Self::wager(&mut cache, &mut stakes, i, &mut seat, stack);
                Change::One(seat)
            }
            Event::Fold(p) => {
                let (i, mut seat) = self.due(p)?;
                seat.fold();
                cache.active &= !(1 << i);
                cache.live &= !(1 << i);
                cache.acted |= 1 << i;
                cache.next = None;
                Change::One(seat)
            }
            Event::NextPlayer(p) => {
                let i = self.position(p).ok_or(Defect::UnknownPlayer(p))?;
                if self.0.cache.live & 1 << i == 0 {
                    return Err(self.illegal(&event));
                }
                cache.next = Some(p);
                Change::Nothing
            }
            Event::NewRound(street, cards) => {
                if street <= self.street() {
                    return Err(self.illegal(&event));
                }
                let board = self
                    .board()
                    .reveal(cards)
                    .map_err(|e| Defect::Illegal(format!("{}: {}", event, e)))?;
                if board.size() > street.n_board() {
                    return Err(self.illegal(&event));
                }
                let seats = self
                    .seats()?
                    .into_iter()
                    .map(|mut seat| {
                        seat.reset_stake();
                        seat
                    })
                    .collect::<Arc<[Seat]>>();
                stakes = seats.iter().map(|_| 0).collect();
                cache.street = street;
                cache.board = board;
                cache.carried += cache.round;
                cache.round = 0;
                cache.largest = 0;
                cache.min_raise = self.big_blind();
                cache.n_raises = 0;
                cache.bettor = None;
                cache.acted = 0;
                cache.next = match street.is_betting() {
                    true => self.clockwise(cache.live, self.0.table.dealer, true),
                    false => None,
                };
                Change::All(seats)
            }
        };
        Ok(Self(Arc::new(Layer {
            link: Link::Delta(self.clone(), event),
            table: self.0.table.clone(),
            change,
            cache,
            stakes,
        })))
    }
    /// Panicking variant of [`State::try_apply`] for events known to be valid.
    pub fn apply(&self, event: Event) -> Self {
        self.try_apply(event).expect("valid event")
    }

    /// Moves chips into the pot and updates the betting bookkeeping. Any
    /// stake above the largest bet reopens the action for everyone else.
    fn wager(cache: &mut Cache, stakes: &mut Arc<[Chips]>, i: usize, seat: &mut Seat, n: Chips) {
        seat.bet(n);
        cache.round += n;
        let mut updated = stakes.to_vec();
        updated[i] = seat.stake();
        *stakes = Arc::from(updated);
        if seat.status() == Status::Shoving {
            cache.live &= !(1 << i);
        }
        let increment = seat.stake().saturating_sub(cache.largest);
        if increment > 0 {
            cache.min_raise = cache.min_raise.max(increment);
            cache.largest = seat.stake();
            cache.n_raises += 1;
            cache.bettor = Some(seat.id());
            cache.acted = 0;
        }
        cache.acted |= 1 << i;
        cache.next = None;
    }
    /// Position and seat of a player allowed to act now.
    fn due(&self, id: PlayerId) -> anyhow::Result<(usize, Seat)> {
        let i = self.position(id).ok_or(Defect::UnknownPlayer(id))?;
        let seat = self.seat(id)?;
        match self.0.cache.next {
            Some(next) if next != id => Err(Defect::Illegal(format!(
                "{} acted out of turn, {} is due",
                id, next
            ))
            .into()),
            _ if !seat.is_actionable() => {
                Err(Defect::Illegal(format!("{} cannot act ({})", id, seat.status())).into())
            }
            _ => Ok((i, seat)),
        }
    }
    fn illegal(&self, event: &Event) -> anyhow::Error {
        Defect::Illegal(format!("{} at {} {}", event, self.street(), self.pot())).into()
    }
    fn clockwise(&self, mask: u64, from: usize, inclusive: bool) -> Option<PlayerId> {
        let ref order = self.0.table.order;
        let n = order.len();
        let steps = if inclusive { n } else { n - 1 };
        (1..=steps)
            .map(|k| (from + k) % n)
            .find(|i| mask & 1 << i != 0)
            .map(|i| order[i])
    }
    fn deficit_at(&self, i: usize) -> Chips {
        self.0.cache.largest.saturating_sub(self.0.stakes[i])
    }
}

/// O(1) queries
impl State {
    /// Total chips in the pot: carried over plus committed this round.
    pub fn pot(&self) -> Chips {
        self.0.cache.carried + self.0.cache.round
    }
    /// Chips committed during the current round.
    pub fn round_pot(&self) -> Chips {
        self.0.cache.round
    }
    /// Chips carried over from earlier rounds.
    pub fn previous_pot(&self) -> Chips {
        self.0.cache.carried
    }
    pub fn largest_bet(&self) -> Chips {
        self.0.cache.largest
    }
    /// Smallest legal raise increment.
    pub fn min_raise(&self) -> Chips {
        self.0.cache.min_raise
    }
    pub fn next_to_act(&self) -> Option<PlayerId> {
        self.0.cache.next
    }
    /// Chips a player must add to match the largest bet. Zero for players
    /// not seated in this hand.
    pub fn deficit(&self, id: PlayerId) -> Chips {
        self.position(id).map(|i| self.deficit_at(i)).unwrap_or(0)
    }
    pub fn stake(&self, id: PlayerId) -> Chips {
        self.position(id).map(|i| self.0.stakes[i]).unwrap_or(0)
    }
    pub fn street(&self) -> Street {
        self.0.cache.street
    }
    pub fn board(&self) -> Board {
        self.0.cache.board
    }
    pub fn n_raises(&self) -> usize {
        self.0.cache.n_raises
    }
    /// Last player to bet or raise this round.
    pub fn last_bettor(&self) -> Option<PlayerId> {
        self.0.cache.bettor
    }
    pub fn dealer(&self) -> PlayerId {
        self.0.table.order[self.0.table.dealer]
    }
    pub fn big_blind(&self) -> Chips {
        self.0.table.big_blind
    }
    /// Events applied since the snapshot.
    pub fn depth(&self) -> usize {
        self.0.cache.depth
    }
    pub fn n_active(&self) -> usize {
        self.0.cache.active.count_ones() as usize
    }
    pub fn n_actionable(&self) -> usize {
        self.0.cache.live.count_ones() as usize
    }
    pub fn is_active(&self, id: PlayerId) -> bool {
        self.position(id)
            .is_some_and(|i| self.0.cache.active & 1 << i != 0)
    }
    pub fn is_actionable(&self, id: PlayerId) -> bool {
        self.position(id)
            .is_some_and(|i| self.0.cache.live & 1 << i != 0)
    }
    /// Whether a player has acted since the last bet or raise.
    pub fn has_acted(&self, id: PlayerId) -> bool {
        self.position(id)
            .is_some_and(|i| self.0.cache.acted & 1 << i != 0)
    }
    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.0.table.order.iter().position(|p| *p == id)
    }
    /// The next non-folded, non-all-in, sitting-in player clockwise from
    /// `from`, excluding `from` itself.
    pub fn preview_next(&self, from: PlayerId) -> Option<PlayerId> {
        self.position(from)
            .and_then(|i| self.clockwise(self.0.cache.live, i, false))
    }
    /// Betting this round is complete: one player remains, or everyone who
    /// can still act has acted and matched the largest bet.
    pub fn is_round_over(&self) -> bool {
        let ref cache = self.0.cache;
        let matched = (0..self.0.table.order.len())
            .filter(|i| cache.live & 1 << i != 0)
            .all(|i| self.0.stakes[i] >= cache.largest);
        match (self.n_active(), self.n_actionable()) {
            (0..=1, _) => true,
            (_, 0) => true,
            (_, 1) => matched,
            (_, _) => matched && cache.live & !cache.acted == 0,
        }
    }
    /// No further betting: one player remains or the river has closed.
    pub fn is_hand_over(&self) -> bool {
        self.n_active() <= 1 || self.street() == Street::Show
    }
}

/// chain traversal
impl State {
    /// The current seat of a player, found at the nearest layer that
    /// rewrote it.
    pub fn seat(&self, id: PlayerId) -> anyhow::Result<Seat> {
        let mut layer = &self.0;
        loop {
            match &layer.change {
                Change::One(seat) if seat.id() == id => return Ok(*seat),
                Change::All(seats) => {
                    return seats
                        .iter()
                        .find(|s| s.id() == id)
                        .copied()
                        .ok_or_else(|| Defect::UnknownPlayer(id).into());
                }
                _ => {}
            }
            match &layer.link {
                Link::Delta(prev, _) => layer = &prev.0,
                Link::Base => return Err(Defect::UnknownPlayer(id).into()),
            }
        }
    }
    /// All seats, clockwise.
    pub fn seats(&self) -> anyhow::Result<Vec<Seat>> {
        self.0
            .table
            .order
            .iter()
            .map(|id| self.seat(*id))
            .collect()
    }
    /// Active players other than `id`.
    pub fn opponents(&self, id: PlayerId) -> anyhow::Result<Vec<Seat>> {
        Ok(self
            .seats()?
            .into_iter()
            .filter(|s| s.id() != id)
            .filter(|s| s.is_active())
            .collect())
    }
    /// Cards `id` cannot see: everything but the board and their own hole.
    pub fn unseen(&self, id: PlayerId) -> anyhow::Result<Deck> {
        let seen = match self.seat(id)?.cards() {
            Some(hole) => Hand::add(Hand::from(self.board()), Hand::from(hole)),
            None => Hand::from(self.board()),
        };
        Ok(Deck::without(seen))
    }
    pub fn prev(&self) -> Option<&State> {
        match &self.0.link {
            Link::Delta(prev, _) => Some(prev),
            Link::Base => None,
        }
    }
    /// The event that produced this layer.
    pub fn event(&self) -> Option<Event> {
        match &self.0.link {
            Link::Delta(_, event) => Some(*event),
            Link::Base => None,
        }
    }
    /// Events since the snapshot, oldest first.
    pub fn history(&self) -> Vec<Event> {
        let mut events = std::iter::successors(Some(self), |s| s.prev())
            .filter_map(|s| s.event())
            .collect::<Vec<_>>();
        events.reverse();
        events
    }
    /// Whether two handles point at the same layer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("State")
            .field("street", &self.street())
            .field("pot", &self.pot())
            .field("largest", &self.largest_bet())
            .field("next", &self.next_to_act())
            .field("depth", &self.depth())
            .finish()
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "{:<8} [{}] pot {} ({}+{}) raises {}",
            self.street(),
            self.board(),
            self.pot(),
            self.previous_pot(),
            self.round_pot(),
            self.n_raises(),
        )?;
        for seat in self.seats().map_err(|_| std::fmt::Error)? {
            let mark = match self.next_to_act() {
                Some(id) if id == seat.id() => ">",
                _ => " ",
            };
            writeln!(f, "{} {}", mark, seat)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Hole;
    use crate::table::Action;

    const HERO: PlayerId = PlayerId::from_raw(0);
    const VILLAIN: PlayerId = PlayerId::from_raw(1);

    /// Heads-up flop, villain bet 50 into 100, hero to act.
    fn flop() -> State {
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

    fn assert_consistent(state: &State) {
        let seats = state.seats().unwrap();
        assert!(seats.iter().all(|s| state.largest_bet() >= s.stake()));
        assert_eq!(
            state.pot(),
            state.previous_pot() + seats.iter().map(|s| s.stake()).sum::<Chips>()
        );
    }

    #[test]
    fn apply_never_mutates_receiver() {
        let state = flop();
        let before = (
            state.pot(),
            state.largest_bet(),
            state.next_to_act(),
            state.deficit(HERO),
            state.seat(HERO).unwrap(),
            state.history(),
        );
        let child = state.apply(Event::Call(HERO));
        let after = (
            state.pot(),
            state.largest_bet(),
            state.next_to_act(),
            state.deficit(HERO),
            state.seat(HERO).unwrap(),
            state.history(),
        );
        assert_eq!(before, after);
        assert_eq!(child.pot(), 200);
        assert_eq!(child.deficit(HERO), 0);
    }

    #[test]
    fn pot_identity_holds_along_chain() {
        let mut state = flop();
        assert_consistent(&state);
        for event in [
            Event::Raise(HERO, 100),
            Event::NextPlayer(VILLAIN),
            Event::Raise(VILLAIN, 200),
            Event::NextPlayer(HERO),
            Event::Call(HERO),
            Event::NewRound(Street::Turn, Hand::try_from("7h").unwrap()),
        ] {
            state = state.apply(event);
            assert_consistent(&state);
        }
        assert_eq!(state.previous_pot(), 100 + 350 + 350);
        assert_eq!(state.round_pot(), 0);
        assert_eq!(state.board().size(), 4);
        assert_eq!(state.depth(), 6);
    }

    #[test]
    fn siblings_share_their_parent() {
        let state = flop();
        let call = state.apply(Event::Call(HERO));
        let fold = state.apply(Event::Fold(HERO));
        assert!(call.prev().unwrap().ptr_eq(&state));
        assert!(fold.prev().unwrap().ptr_eq(&state));
        assert!(fold.seat(HERO).unwrap().status() == Status::Folding);
        assert!(call.seat(HERO).unwrap().status() == Status::Betting);
    }

    #[test]
    fn raise_previews_opponent() {
        let state = flop().apply(Event::Raise(HERO, 100));
        assert_eq!(state.preview_next(HERO), Some(VILLAIN));
        assert_eq!(state.last_bettor(), Some(HERO));
        assert_eq!(state.n_raises(), 2);
        assert_eq!(state.min_raise(), 100);
        assert!(!state.is_round_over());
    }

    #[test]
    fn call_closes_round() {
        let state = flop().play(&Action::Call(50)).unwrap();
        assert_eq!(state.street(), Street::Turn);
        assert_eq!(state.previous_pot(), 200);
        assert_eq!(state.round_pot(), 0);
        assert_eq!(state.next_to_act(), Some(HERO));
        assert_eq!(state.board().size(), 3);
        assert!(!state.has_acted(HERO));
    }

    #[test]
    fn fold_ends_hand() {
        let state = flop().play(&Action::Fold).unwrap();
        assert!(state.is_hand_over());
        assert_eq!(state.n_active(), 1);
        assert!(!state.is_active(HERO));
        assert_eq!(state.pot(), 150);
    }

    #[test]
    fn all_in_call_runs_out_board() {
        let state = flop()
            .play(&Action::Shove(1000))
            .unwrap()
            .play(&Action::Call(950))
            .err();
        assert!(state.is_some(), "a call of the whole stack must be a shove");
        let state = flop()
            .play(&Action::Shove(1000))
            .unwrap()
            .play(&Action::Shove(950))
            .unwrap();
        assert_eq!(state.street(), Street::Show);
        assert!(state.is_hand_over());
        assert_eq!(state.pot(), 100 + 1000 + 1000);
    }

    #[test]
    fn out_of_turn_is_rejected() {
        let err = flop().try_apply(Event::Check(VILLAIN)).unwrap_err();
        assert!(matches!(err.downcast_ref::<Defect>(), Some(Defect::Illegal(_))));
        assert!(flop().try_apply(Event::Check(HERO)).is_err());
    }

    #[test]
    fn unknown_player_is_a_defect() {
        let stranger = PlayerId::from(9);
        let err = flop().seat(stranger).unwrap_err();
        assert_eq!(err.downcast_ref::<Defect>(), Some(&Defect::UnknownPlayer(stranger)));
    }

    #[test]
    fn unseen_hides_board_and_own_hole() {
        let deck = flop().unseen(HERO).unwrap();
        assert_eq!(deck.size(), 52 - 5);
        assert_eq!(flop().unseen(VILLAIN).unwrap().size(), 52 - 3);
    }
}
