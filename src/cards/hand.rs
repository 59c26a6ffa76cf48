use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;

/// An unordered set of cards stored as a 52-bit mask.
///
/// Each bit is one card of the deck, so union, intersection and complement
/// are single instructions and nothing is heap-allocated regardless of size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Hand(u64);

impl Hand {
    pub const fn empty() -> Self {
        Self(0)
    }
    /// The full 52-card deck.
    pub const fn full() -> Self {
        Self(Self::mask())
    }
    /// Disjoint union. Overlapping hands are a logic error.
    pub fn add(lhs: Self, rhs: Self) -> Self {
        debug_assert!(lhs.0 & rhs.0 == 0, "overlapping hands {} {}", lhs, rhs);
        Self(lhs.0 | rhs.0)
    }
    /// Union that tolerates overlap.
    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self(lhs.0 | rhs.0)
    }
    pub fn complement(&self) -> Self {
        Self(self.0 ^ Self::mask())
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn overlaps(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }
    /// Cards of this hand in the given suit.
    pub fn of(&self, suit: &Suit) -> Hand {
        Self(self.0 & u64::from(*suit))
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }
    pub const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// Drains the hand lowest card first.
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        match self.0 {
            0 => None,
            bits => {
                let card = Card::from(bits.trailing_zeros() as u8);
                self.0 &= bits - 1;
                Some(card)
            }
        }
    }
}

/// Bits above the 52nd are dropped.
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// Sorted low to high.
impl From<Hand> for Vec<Card> {
    fn from(h: Hand) -> Self {
        h.collect()
    }
}
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        cards.into_iter().map(Hand::from).fold(Self::empty(), Self::or)
    }
}

/// The set of ranks present in any suit.
impl From<Hand> for u16 {
    fn from(h: Hand) -> Self {
        Rank::all()
            .into_iter()
            .filter(|r| h.0 & u64::from(*r) != 0)
            .fold(0, |set, r| set | u16::from(r))
    }
}

/// Duplicate cards are rejected.
impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = Card::parse(s)?;
        let n = cards.len();
        let hand = Self::from(cards);
        match hand.size() == n {
            true => Ok(hand),
            false => Err(format!("duplicate cards in {}", s)),
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut cards = *self;
        cards.try_for_each(|card| write!(f, "{}", card))
    }
}
