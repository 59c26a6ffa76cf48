use super::hand::Hand;
use super::strength::Strength;

/// Hand-rank oracle: maps a set of cards to a totally ordered strength.
///
/// Higher is better; equal strengths tie. Errors are treated by the showdown
/// estimator as a lost trial.
pub trait Ranker: Send + Sync {
    fn rank(&self, hand: Hand) -> anyhow::Result<Strength>;
}

/// The built-in bitwise evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bitwise;

impl Ranker for Bitwise {
    fn rank(&self, hand: Hand) -> anyhow::Result<Strength> {
        Strength::try_from(hand).map_err(anyhow::Error::msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_hand() {
        assert!(Bitwise.rank(Hand::empty()).is_err());
    }

    #[test]
    fn ranks_seven_cards() {
        let better = Bitwise.rank(Hand::try_from("As Ks Qs Js Ts 2d 3c").unwrap()).unwrap();
        let worse = Bitwise.rank(Hand::try_from("Ah Ad Qs Js Ts 2d 3c").unwrap()).unwrap();
        assert!(better > worse);
    }
}
