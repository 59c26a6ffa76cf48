use super::player::PlayerId;
use crate::Chips;
use crate::cards::Hole;

/// A player's state at the table.
///
/// Tracks chips behind, chips committed this round, betting status and,
/// when known, hole cards. Opponents' cards are usually unknown and get
/// sampled at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seat {
    id: PlayerId,
    status: Status,
    sitting: bool,
    stack: Chips,
    stake: Chips,
    cards: Option<Hole>,
}

impl From<(PlayerId, Chips)> for Seat {
    fn from((id, stack): (PlayerId, Chips)) -> Self {
        Self {
            id,
            stack,
            stake: 0,
            sitting: true,
            status: Status::Betting,
            cards: None,
        }
    }
}

impl Seat {
    pub fn with_stake(mut self, stake: Chips) -> Self {
        self.stake = stake;
        self
    }
    pub fn with_cards(mut self, cards: Hole) -> Self {
        self.cards = Some(cards);
        self
    }
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
    pub fn sitting_out(mut self) -> Self {
        self.sitting = false;
        self
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    /// Chips behind (not committed to pot).
    pub fn stack(&self) -> Chips {
        self.stack
    }
    /// Chips committed this round.
    pub fn stake(&self) -> Chips {
        self.stake
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn cards(&self) -> Option<Hole> {
        self.cards
    }
    pub fn is_sitting(&self) -> bool {
        self.sitting
    }
    /// Still competing for the pot.
    pub fn is_active(&self) -> bool {
        self.sitting && self.status.is_active()
    }
    /// Still able to make decisions.
    pub fn is_actionable(&self) -> bool {
        self.sitting && self.status == Status::Betting
    }

    /// Commits chips from stack to pot, going all-in when the stack empties.
    pub fn bet(&mut self, bet: Chips) {
        debug_assert!(bet <= self.stack);
        self.stack -= bet;
        self.stake += bet;
        if self.stack == 0 {
            self.status = Status::Shoving;
        }
    }
    pub fn fold(&mut self) {
        self.status = Status::Folding;
    }
    pub fn reset_stake(&mut self) {
        self.stake = 0;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {}{} ${:>5} +{:<5} {}",
            self.id,
            self.status,
            if self.sitting { ' ' } else { 'z' },
            self.stack,
            self.stake,
            self.cards.map(|h| h.to_string()).unwrap_or_else(|| "????".into())
        )
    }
}

/// Player betting status within a hand.
///
/// - `Betting`: Active and can still make decisions
/// - `Shoving`: All-in, no more decisions but still in the pot
/// - `Folding`: Out of the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Betting,
    Shoving,
    Folding,
}

impl Status {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Betting | Self::Shoving)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Betting => write!(f, "B"),
            Self::Shoving => write!(f, "S"),
            Self::Folding => write!(f, "F"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptying_stack_goes_all_in() {
        let mut seat = Seat::from((PlayerId::from(1), 40));
        seat.bet(15);
        assert_eq!(seat.status(), Status::Betting);
        seat.bet(25);
        assert_eq!(seat.status(), Status::Shoving);
        assert!(seat.is_active());
        assert!(!seat.is_actionable());
        assert_eq!(seat.stake(), 40);
    }

    #[test]
    fn sitting_out_is_inactive() {
        let seat = Seat::from((PlayerId::from(2), 100)).sitting_out();
        assert!(!seat.is_active());
        assert!(!seat.is_actionable());
    }
}
