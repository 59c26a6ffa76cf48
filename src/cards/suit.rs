/// Card suit: clubs, diamonds, hearts, spades.
///
/// Only flushes care about suits, so the evaluator only ever asks for the
/// per-suit mask of a hand.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    C = 0,
    D = 1,
    H = 2,
    S = 3,
}

impl Suit {
    const ASCII: [char; 4] = ['c', 'd', 'h', 's'];
    const GLYPHS: [char; 4] = ['♣', '♦', '♥', '♠'];

    pub const fn all() -> [Suit; 4] {
        [Suit::C, Suit::D, Suit::H, Suit::S]
    }
    pub fn symbol(&self) -> char {
        Self::GLYPHS[*self as usize]
    }
}

/// Panics outside `0..4`.
impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        Self::all()[n as usize]
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

/// Every card of this suit in a Hand bitmask: one bit per rank nibble.
impl From<Suit> for u64 {
    fn from(s: Suit) -> u64 {
        0x0001_1111_1111_1111 << s as u64
    }
}

/// Accepts the ascii letter or the glyph.
impl TryFrom<&str> for Suit {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars().map(|c| c.to_ascii_lowercase());
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::ASCII
                .iter()
                .position(|&x| x == c)
                .or_else(|| Self::GLYPHS.iter().position(|&x| x == c))
                .map(|i| Suit::from(i as u8))
                .ok_or_else(|| format!("invalid suit: {}", s)),
            _ => Err(format!("invalid suit: {}", s)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Self::ASCII[*self as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_and_letters_parse() {
        for suit in Suit::all() {
            assert_eq!(Suit::try_from(suit.symbol().to_string().as_str()), Ok(suit));
            assert_eq!(Suit::try_from(suit.to_string().as_str()), Ok(suit));
        }
        assert_eq!(Suit::try_from("S"), Ok(Suit::S));
    }

    #[test]
    fn masks_partition_the_deck() {
        let masks = Suit::all().map(u64::from);
        assert_eq!(masks.iter().fold(0, |a, m| a | m), (1 << 52) - 1);
        assert_eq!(masks.iter().map(|m| m.count_ones()).sum::<u32>(), 52);
        assert_eq!(u64::from(Suit::C) & 0xF, 0b0001);
        assert_eq!(u64::from(Suit::S) & 0xF, 0b1000);
    }
}
