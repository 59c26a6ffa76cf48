/// Card rank from Two (lowest) to Ace (highest).
///
/// Encoded as `0..13`. In a Hand bitmask each rank owns one nibble (one bit
/// per suit); in a rank set it owns one bit of a 13-bit `u16`, which is the
/// form the evaluator shifts and popcounts.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Rank {
    #[default]
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    const SYMBOLS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
    /// Every rank bit of a `u16` rank set.
    pub const SET: u16 = (1 << 13) - 1;

    /// All thirteen ranks, lowest first.
    pub const fn all() -> [Rank; 13] {
        use Rank::*;
        [Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace]
    }
    pub fn symbol(&self) -> char {
        Self::SYMBOLS[*self as usize]
    }
    /// Highest rank in a non-empty rank set.
    pub fn highest(set: u16) -> Option<Rank> {
        match set & Self::SET {
            0 => None,
            bits => Some(Rank::from((15 - bits.leading_zeros()) as u8)),
        }
    }
}

/// Panics outside `0..13`.
impl From<u8> for Rank {
    fn from(n: u8) -> Rank {
        Self::all()[n as usize]
    }
}
impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

/// Highest rank of a rank set.
impl From<u16> for Rank {
    fn from(set: u16) -> Rank {
        Self::highest(set).unwrap_or_default()
    }
}
impl From<Rank> for u16 {
    fn from(r: Rank) -> u16 {
        1 << r as u16
    }
}

/// The Hand nibble holding all four cards of this rank.
impl From<Rank> for u64 {
    fn from(r: Rank) -> u64 {
        0xF << (r as u64 * 4)
    }
}

impl TryFrom<&str> for Rank {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars().map(|c| c.to_ascii_uppercase());
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::SYMBOLS
                .iter()
                .position(|&x| x == c)
                .map(|i| Rank::from(i as u8))
                .ok_or_else(|| format!("invalid rank: {}", s)),
            _ => Err(format!("invalid rank: {}", s)),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for rank in Rank::all() {
            assert_eq!(Rank::try_from(rank.symbol().to_string().as_str()), Ok(rank));
        }
        assert_eq!(Rank::try_from("t"), Ok(Rank::Ten));
        assert!(Rank::try_from("10").is_err());
    }

    #[test]
    fn highest_of_set() {
        assert_eq!(Rank::from(0b1000000001111u16), Rank::Ace);
        assert_eq!(Rank::highest(0b0000000001100), Some(Rank::Five));
        assert_eq!(Rank::highest(0), None);
    }

    #[test]
    fn nibble_of_hand() {
        assert_eq!(u64::from(Rank::Five), 0xF000);
    }
}
