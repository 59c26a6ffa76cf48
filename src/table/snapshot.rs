use super::player::PlayerId;
use super::seat::Seat;
use crate::Chips;
use crate::cards::Board;
use crate::cards::Hand;
use crate::cards::Street;

/// The observed table at the instant a chain starts.
///
/// Seats are listed clockwise. `pot` holds only chips carried over from
/// earlier rounds; chips committed this round live in each seat's stake, so
/// the total pot is always `pot + Σ stake`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub seats: Vec<Seat>,
    pub board: Board,
    pub pot: Chips,
    pub street: Street,
    pub dealer: PlayerId,
    pub n_raises: usize,
    pub next: Option<PlayerId>,
    pub bettor: Option<PlayerId>,
    /// Players who have acted since the last bet or raise.
    pub acted: Vec<PlayerId>,
    pub big_blind: Chips,
    /// Smallest legal raise increment; derived from the big blind and the
    /// largest stake when absent.
    pub min_raise: Option<Chips>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            seats: Vec::new(),
            board: Board::empty(),
            pot: 0,
            street: Street::Pref,
            dealer: PlayerId::default(),
            n_raises: 0,
            next: None,
            bettor: None,
            acted: Vec::new(),
            big_blind: crate::BIG_BLIND,
            min_raise: None,
        }
    }
}

impl Snapshot {
    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.seats.iter().position(|s| s.id() == id)
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.seats.is_empty(), "no seats");
        anyhow::ensure!(
            self.seats.len() <= crate::MAX_SEATS,
            "{} seats exceed the table limit of {}",
            self.seats.len(),
            crate::MAX_SEATS
        );
        for (i, seat) in self.seats.iter().enumerate() {
            anyhow::ensure!(
                self.seats[..i].iter().all(|s| s.id() != seat.id()),
                "{} seated twice",
                seat.id()
            );
        }
        anyhow::ensure!(self.position(self.dealer).is_some(), "dealer not seated");
        if let Some(next) = self.next {
            let seat = self
                .position(next)
                .map(|i| self.seats[i])
                .ok_or_else(|| anyhow::anyhow!("next player {} not seated", next))?;
            anyhow::ensure!(seat.is_actionable(), "next player {} cannot act", next);
        }
        for id in self.acted.iter().chain(self.bettor.iter()) {
            anyhow::ensure!(self.position(*id).is_some(), "{} not seated", id);
        }
        anyhow::ensure!(
            self.board.size() <= self.street.n_board(),
            "{} cards on the board at {}",
            self.board.size(),
            self.street
        );
        let mut seen = Hand::from(self.board);
        for hole in self.seats.iter().filter_map(|s| s.cards()) {
            let hole = Hand::from(hole);
            anyhow::ensure!(!seen.overlaps(&hole), "card {} dealt twice", hole);
            seen = Hand::add(seen, hole);
        }
        Ok(())
    }
}
