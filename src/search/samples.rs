use crate::Chips;
use crate::Utility;
use std::collections::BTreeMap;

/// A multiset of showdown payouts and their frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Samples(BTreeMap<Chips, usize>);

impl Samples {
    pub fn add(&mut self, payout: Chips) {
        *self.0.entry(payout).or_default() += 1;
    }
    /// Number of samples collected.
    pub fn len(&self) -> usize {
        self.0.values().sum()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Frequency-weighted average payout, if any sample was taken.
    pub fn mean(&self) -> Option<Utility> {
        match self.len() {
            0 => None,
            n => Some(
                self.0
                    .iter()
                    .map(|(payout, count)| *payout as Utility * *count as Utility)
                    .sum::<Utility>()
                    / n as Utility,
            ),
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Chips, &usize)> {
        self.0.iter()
    }
}

impl std::fmt::Display for Samples {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let bag = self
            .0
            .iter()
            .map(|(payout, count)| format!("{}x{}", payout, count))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{{{}}}", bag)
    }
}
