use super::player::PlayerId;
use crate::Chips;
use crate::cards::Hand;
use crate::cards::Street;

/// One observed or hypothesised change to the table.
///
/// Every [`super::State`] delta carries exactly one event. Player events are
/// produced by actions; `NextPlayer` and `NewRound` are bookkeeping emitted
/// between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Check(PlayerId),
    /// Match the largest bet, capped by the stack.
    Call(PlayerId),
    /// Open the round by committing this many chips.
    Bet(PlayerId, Chips),
    /// Match the largest bet, then add this increment.
    Raise(PlayerId, Chips),
    AllIn(PlayerId),
    Fold(PlayerId),
    NextPlayer(PlayerId),
    /// Close the round, revealing these cards. Hypothetical rounds reveal
    /// nothing and leave the board to be sampled at showdown.
    NewRound(Street, Hand),
}

impl Event {
    /// The player whose chips or status this event changes.
    pub fn actor(&self) -> Option<PlayerId> {
        match *self {
            Self::Check(p)
            | Self::Call(p)
            | Self::Bet(p, _)
            | Self::Raise(p, _)
            | Self::AllIn(p)
            | Self::Fold(p) => Some(p),
            Self::NextPlayer(_) | Self::NewRound(..) => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Check(p) => write!(f, "{} CHECK", p),
            Self::Call(p) => write!(f, "{} CALL", p),
            Self::Bet(p, n) => write!(f, "{} BET   {}", p, n),
            Self::Raise(p, n) => write!(f, "{} RAISE {}", p, n),
            Self::AllIn(p) => write!(f, "{} ALLIN", p),
            Self::Fold(p) => write!(f, "{} FOLD", p),
            Self::NextPlayer(p) => write!(f, "-> {}", p),
            Self::NewRound(street, cards) => write!(f, "== {} {}", street, cards),
        }
    }
}
