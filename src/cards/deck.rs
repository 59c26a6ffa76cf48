use super::card::Card;
use super::hand::Hand;
use rand::Rng;

/// A shrinking pool of unseen cards supporting uniform draws.
///
/// Wraps a [`Hand`] of the remaining cards. Every draw removes the card it
/// returns, so sampling without replacement never needs a retry loop and
/// always terminates: an exhausted deck simply yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck(Hand);

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Creates a fresh 52-card deck.
    pub fn new() -> Self {
        Self(Hand::full())
    }
    /// Every card except the given ones.
    pub fn without(used: Hand) -> Self {
        Self(used.complement())
    }
    /// Cards left in the pool.
    pub fn size(&self) -> usize {
        self.0.size()
    }
    /// Tests whether a card is still in the deck.
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    /// Draws and removes a uniformly random card.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        match self.0.size() {
            0 => None,
            n => {
                let i = rng.random_range(0..n);
                let mut bits = u64::from(self.0);
                for _ in 0..i {
                    bits &= bits - 1;
                }
                let card = Card::from(bits.trailing_zeros() as u8);
                self.0.remove(card);
                Some(card)
            }
        }
    }
    /// Draws `n` distinct cards, or `None` if the pool runs dry.
    pub fn deal<R: Rng>(&mut self, n: usize, rng: &mut R) -> Option<Hand> {
        (0..n)
            .map(|_| self.draw(rng))
            .map(|card| card.map(Hand::from))
            .try_fold(Hand::empty(), |hand, card| card.map(|c| Hand::add(hand, c)))
    }
}

impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}
