use crate::table::PlayerId;

/// Invariant violations that abort a decision.
///
/// These never occur in correct play. They travel inside `anyhow::Error` so
/// the driver can tell them apart from collaborator failures with
/// `downcast_ref::<Defect>()`, log them, and fall back to a passive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    /// An aggressive action left nobody to respond to it.
    NoNextActor(PlayerId),
    /// An action was requested while nobody is due to act.
    NoActor,
    /// The unseen-card pool ran dry mid-trial.
    DeckExhausted { needed: usize, left: usize },
    /// A node's EV was read before the node was expanded.
    Unexpanded,
    /// A hypothetical action was not legal in its state.
    Illegal(String),
    /// The searching player has no known hole cards.
    UnknownHole(PlayerId),
    /// An event or query named a player not seated in the hand.
    UnknownPlayer(PlayerId),
}

impl std::fmt::Display for Defect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoNextActor(p) => write!(f, "no player left to answer {}", p),
            Self::NoActor => write!(f, "no player is due to act"),
            Self::DeckExhausted { needed, left } => {
                write!(f, "deck exhausted: needed {} cards, {} left", needed, left)
            }
            Self::Unexpanded => write!(f, "ev read before expansion"),
            Self::Illegal(what) => write!(f, "illegal action: {}", what),
            Self::UnknownHole(p) => write!(f, "hole cards of {} are unknown", p),
            Self::UnknownPlayer(p) => write!(f, "{} is not seated", p),
        }
    }
}

impl std::error::Error for Defect {}
