use super::card::Card;
use super::hand::Hand;

/// The community cards visible to all players.
///
/// Holds at most five cards. Cards are only ever added, so a board observed on
/// a later street is always a superset of the earlier one. During search the
/// board may lag behind the street: hypothetical rounds start without cards,
/// which are then sampled at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(Hand);

impl Board {
    /// Creates an empty board (preflop state).
    pub fn empty() -> Self {
        Self(Hand::empty())
    }
    /// Number of cards revealed so far.
    pub fn size(&self) -> usize {
        self.0.size()
    }
    /// Cards still to come before showdown.
    pub fn missing(&self) -> usize {
        5 - self.size()
    }
    /// Adds cards, refusing overlaps and overflow past five cards.
    pub fn reveal(&self, hand: Hand) -> Result<Self, String> {
        if self.0.overlaps(&hand) {
            Err(format!("{} already on board {}", hand, self))
        } else if self.size() + hand.size() > 5 {
            Err(format!("board {} cannot take {} more", self, hand))
        } else {
            Ok(Self(Hand::add(self.0, hand)))
        }
    }
}

/// Board -> Hand is infallible
impl From<Board> for Hand {
    fn from(board: Board) -> Self {
        board.0
    }
}
impl TryFrom<Hand> for Board {
    type Error = String;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        Self::empty().reveal(hand)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            Vec::<Card>::from(self.0)
                .into_iter()
                .map(|c| format!("{}", c))
                .collect::<Vec<String>>()
                .join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_monotonically() {
        let flop = Board::try_from(Hand::try_from("Ks Qd 2c").unwrap()).unwrap();
        let turn = flop.reveal(Hand::try_from("7h").unwrap()).unwrap();
        assert_eq!(turn.size(), 4);
        assert!(Hand::from(turn).overlaps(&Hand::from(flop)));
        assert!(flop.reveal(Hand::try_from("Ks").unwrap()).is_err());
    }

    #[test]
    fn never_exceeds_five() {
        let full = Board::try_from(Hand::try_from("Ks Qd 2c 7h 8h").unwrap()).unwrap();
        assert_eq!(full.missing(), 0);
        assert!(full.reveal(Hand::try_from("9h").unwrap()).is_err());
    }
}
