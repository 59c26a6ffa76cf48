use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's strength: its category, then its kickers.
///
/// Field order matters: the derived `Ord` compares rankings before kickers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.value
    }
    pub fn kickers(&self) -> Kickers {
        self.kicks
    }
}

/// Evaluates a non-empty hand.
impl TryFrom<Hand> for Strength {
    type Error = String;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        let eval = Evaluator::from(hand);
        let value = eval
            .ranking()
            .ok_or_else(|| String::from("cannot rank an empty hand"))?;
        let kicks = eval.kickers(value);
        Ok(Self { value, kicks })
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{}", self.value, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        Strength::try_from(Hand::try_from(s).unwrap()).unwrap()
    }

    #[test]
    fn kickers_break_ties() {
        assert!(strength("As Ah Kd Qc Js") > strength("Ad Ac Kh Qs Ts"));
        assert_eq!(strength("As Ah Kd Qc Js"), strength("Ad Ac Kh Qs Jd"));
    }

    #[test]
    fn board_plays() {
        let board = "Ts Js Qs Ks As";
        assert_eq!(strength(&format!("{} 2c 3d", board)), strength(&format!("{} 4c 5d", board)));
    }
}
