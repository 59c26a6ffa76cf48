use crate::Chips;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// Pot-normalized size of a bet or raise, as a fraction `numer / denom`.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Odds(pub Chips, pub Chips);

impl From<Odds> for Probability {
    fn from(odds: Odds) -> Self {
        odds.0 as Probability / odds.1 as Probability
    }
}

impl From<(Chips, Chips)> for Odds {
    fn from((a, b): (Chips, Chips)) -> Self {
        let g = Self::gcd(a, b).max(1);
        Self(a / g, b / g)
    }
}

impl Odds {
    fn gcd(a: Chips, b: Chips) -> Chips {
        let (mut a, mut b) = (a, b);
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    }
    /// This fraction of `pot`, rounded down.
    pub fn of(&self, pot: Chips) -> Chips {
        (pot as u64 * self.0 as u64 / self.1.max(1) as u64) as Chips
    }
    pub const GRID: [Self; 10] = [
        Self(1, 4), // 0.25
        Self(1, 3), // 0.33
        Self(1, 2), // 0.50
        Self(2, 3), // 0.66
        Self(3, 4), // 0.75
        Self(1, 1), // 1.00
        Self(3, 2), // 1.50
        Self(2, 1), // 2.00
        Self(3, 1), // 3.00
        Self(4, 1), // 4.00
    ];
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}
