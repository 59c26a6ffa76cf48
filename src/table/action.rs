use super::event::Event;
use super::player::PlayerId;
use crate::Chips;

/// A choice available to the player due to act.
///
/// Amounts are the chips the action moves from the actor's stack, except
/// `Raise`, which carries the increment over the current largest bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call(Chips),
    Bet(Chips),
    Raise(Chips),
    Shove(Chips),
}

impl Action {
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Self::Bet(_) | Self::Raise(_) | Self::Shove(_))
    }
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Check | Self::Call(_))
    }
    /// Sizing carried by the action, zero for fold and check.
    pub fn amount(&self) -> Chips {
        match *self {
            Self::Fold | Self::Check => 0,
            Self::Call(n) | Self::Bet(n) | Self::Raise(n) | Self::Shove(n) => n,
        }
    }
    /// Tie-break key among equal EVs: cheaper, lower-variance actions first.
    pub fn preference(&self) -> (u8, Chips) {
        match *self {
            Self::Check => (0, 0),
            Self::Fold => (1, 0),
            Self::Call(n) => (2, n),
            Self::Bet(n) | Self::Raise(n) => (3, n),
            Self::Shove(n) => (4, n),
        }
    }
    /// Name of the action type, used to group and sort same-type sizes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call(_) => "call",
            Self::Bet(_) => "bet",
            Self::Raise(_) => "raise",
            Self::Shove(_) => "shove",
        }
    }
    /// The chain event this action produces for its actor.
    pub fn event(&self, actor: PlayerId) -> Event {
        match *self {
            Self::Fold => Event::Fold(actor),
            Self::Check => Event::Check(actor),
            Self::Call(_) => Event::Call(actor),
            Self::Bet(n) => Event::Bet(actor, n),
            Self::Raise(n) => Event::Raise(actor, n),
            Self::Shove(_) => Event::AllIn(actor),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold | Self::Check => write!(f, "{}", self.label().to_uppercase()),
            _ => write!(f, "{} {}", self.label().to_uppercase(), self.amount()),
        }
    }
}
