use super::card::Card;
use super::hand::Hand;

/// Exactly two private cards.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Hole(Hand);

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

/// The two cards must differ.
impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        Self(Hand::add(Hand::from(a), Hand::from(b)))
    }
}

impl TryFrom<Hand> for Hole {
    type Error = String;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        match hand.size() {
            2 => Ok(Self(hand)),
            n => Err(format!("hole needs exactly two cards, got {}", n)),
        }
    }
}

impl TryFrom<&str> for Hole {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(Hand::try_from(s)?)
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
