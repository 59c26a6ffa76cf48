use super::rank::Rank;

/// A poker hand's category, with the ranks that define it.
///
/// Kickers are tracked separately by [`super::Kickers`]. Variants are declared
/// weakest first so the derived `Ord` compares hands by category, then by the
/// defining ranks.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    /// Kickers are the next four cards of the flush suit.
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
}

impl Ranking {
    /// Cards beyond the defining ranks needed to make five.
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) | Ranking::Flush(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            Ranking::Straight(_) | Ranking::FullHouse(_, _) | Ranking::StraightFlush(_) => 0,
        }
    }

    /// Ranks eligible to kick: everything but the defining ranks.
    pub fn mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) | Ranking::FullHouse(hi, lo) => {
                !(u16::from(hi) | u16::from(lo))
            }
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::ThreeOAK(hi)
            | Ranking::Straight(hi)
            | Ranking::Flush(hi)
            | Ranking::FourOAK(hi)
            | Ranking::StraightFlush(hi) => !(u16::from(hi)),
        }
    }
}

impl Ranking {
    fn name(&self) -> &'static str {
        match self {
            Ranking::HighCard(_) => "high card",
            Ranking::OnePair(_) => "pair",
            Ranking::TwoPair(_, _) => "two pair",
            Ranking::ThreeOAK(_) => "trips",
            Ranking::Straight(_) => "straight",
            Ranking::Flush(_) => "flush",
            Ranking::FullHouse(_, _) => "full house",
            Ranking::FourOAK(_) => "quads",
            Ranking::StraightFlush(_) => "straight flush",
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Ranking::TwoPair(hi, lo) | Ranking::FullHouse(hi, lo) => {
                write!(f, "{:<15}{}{}", self.name(), hi, lo)
            }
            Ranking::HighCard(r)
            | Ranking::OnePair(r)
            | Ranking::ThreeOAK(r)
            | Ranking::Straight(r)
            | Ranking::Flush(r)
            | Ranking::FourOAK(r)
            | Ranking::StraightFlush(r) => write!(f, "{:<15}{} ", self.name(), r),
        }
    }
}
