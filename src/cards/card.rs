use super::rank::Rank;
use super::suit::Suit;

/// A playing card encoded as a single byte.
///
/// The 52 cards are bijectively mapped to `0..52` where the encoding is
/// `rank * 4 + suit`, so cards sort by rank first, then by suit.
///
/// # Parsing
///
/// Cards parse from two-symbol strings like `"As"` or `"T♣"`. Use
/// [`Card::parse`] for several concatenated cards.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    /// Extracts the rank component (2 through Ace).
    pub fn rank(&self) -> Rank {
        Rank::from(self.0 / 4)
    }
    /// Extracts the suit component.
    pub fn suit(&self) -> Suit {
        Suit::from(self.0 % 4)
    }
    /// Parses concatenated card notations, ignoring whitespace.
    pub fn parse(s: &str) -> Result<Vec<Self>, String> {
        let symbols = s.chars().filter(|c| !c.is_whitespace()).collect::<Vec<char>>();
        match symbols.len() % 2 {
            0 => symbols
                .chunks(2)
                .map(|pair| Self::from_symbols(pair[0], pair[1]))
                .collect(),
            _ => Err(format!("dangling symbol in {}", s)),
        }
    }
    fn from_symbols(rank: char, suit: char) -> Result<Self, String> {
        let rank = Rank::try_from(rank.encode_utf8(&mut [0; 4]) as &str)?;
        let suit = Suit::try_from(suit.encode_utf8(&mut [0; 4]) as &str)?;
        Ok(Self::from((rank, suit)))
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self(u8::from(r) * 4 + u8::from(s))
    }
}

impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        debug_assert!(n < 52);
        Self(n)
    }
}

/// The card's single bit in a Hand bitmask.
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}

impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let mut chars = s.char_indices();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(_), Some((i, _)), None) => {
                let rank = Rank::try_from(&s[..i])?;
                let suit = Suit::try_from(&s[i..])?;
                Ok(Card::from((rank, suit)))
            }
            _ => Err(format!("card needs a rank and a suit: {}", s)),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}
