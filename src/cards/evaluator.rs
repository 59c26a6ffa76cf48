use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// A-2-3-4-5 as a rank set.
const WHEEL: u16 = 0b1000000001111;

/// Bitwise hand evaluator.
///
/// Works directly on the card bitmask: rank multiplicities come from nibble
/// popcounts, straights from shifted rank sets, flushes from suit masks.
/// Any number of cards is accepted; the best five are chosen implicitly.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    /// Best category present, or `None` for an empty hand.
    pub fn ranking(&self) -> Option<Ranking> {
        let flush = self.flush_suit();
        flush
            .and_then(|suit| Self::straight_top(u16::from(self.0.of(&suit))))
            .map(Ranking::StraightFlush)
            .or_else(|| self.top(4, None).map(Ranking::FourOAK))
            .or_else(|| {
                let trips = self.top(3, None)?;
                let pair = self.top(2, Some(trips))?;
                Some(Ranking::FullHouse(trips, pair))
            })
            .or_else(|| flush.map(|suit| Ranking::Flush(Rank::from(u16::from(self.0.of(&suit))))))
            .or_else(|| Self::straight_top(u16::from(self.0)).map(Ranking::Straight))
            .or_else(|| self.top(3, None).map(Ranking::ThreeOAK))
            .or_else(|| {
                let hi = self.top(2, None)?;
                match self.top(2, Some(hi)) {
                    Some(lo) => Some(Ranking::TwoPair(hi, lo)),
                    None => Some(Ranking::OnePair(hi)),
                }
            })
            .or_else(|| self.top(1, None).map(Ranking::HighCard))
    }

    /// The highest unpaired ranks that complete five cards alongside
    /// `ranking`. Flush kickers come from the flush suit only.
    pub fn kickers(&self, ranking: Ranking) -> Kickers {
        let n = ranking.n_kickers();
        if n == 0 {
            return Kickers::default();
        }
        let pool = match ranking {
            Ranking::Flush(_) => self
                .flush_suit()
                .map(|suit| u16::from(self.0.of(&suit)))
                .unwrap_or_default(),
            _ => u16::from(self.0),
        };
        let mut ranks = pool & ranking.mask();
        while ranks.count_ones() as usize > n {
            ranks &= ranks - 1;
        }
        Kickers::from(ranks)
    }

    /// Highest card of the best straight in a rank set.
    fn straight_top(ranks: u16) -> Option<Rank> {
        let runs = (1..5).fold(ranks, |bits, _| bits & bits << 1);
        match runs {
            0 if ranks & WHEEL == WHEEL => Some(Rank::Five),
            0 => None,
            runs => Rank::highest(runs),
        }
    }
    fn flush_suit(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|suit| self.0.of(suit).size() >= 5)
    }
    /// Highest rank held at least `n` times, other than `skip`.
    fn top(&self, n: u32, skip: Option<Rank>) -> Option<Rank> {
        let bits = u64::from(self.0);
        Rank::all()
            .into_iter()
            .rev()
            .filter(|rank| Some(*rank) != skip)
            .find(|rank| (bits & u64::from(*rank)).count_ones() >= n)
    }
}
