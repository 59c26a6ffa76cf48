/// The betting rounds of a hand, plus the terminal showdown.
///
/// Each street reveals additional community cards. `Show` is not a betting
/// round: it marks a hand whose betting is complete and whose remaining
/// players compare hands.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Street {
    #[default]
    Pref = 0isize,
    Flop = 1isize,
    Turn = 2isize,
    Rive = 3isize,
    Show = 4isize,
}

impl Street {
    /// All streets in order.
    pub const fn all() -> [Self; 5] {
        [Self::Pref, Self::Flop, Self::Turn, Self::Rive, Self::Show]
    }
    /// The following street. Panics on showdown.
    pub const fn next(&self) -> Self {
        match self {
            Self::Pref => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::Rive,
            Self::Rive => Self::Show,
            Self::Show => panic!("terminal"),
        }
    }
    /// Cards revealed when transitioning to this street.
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 1,
            Self::Rive => 1,
            Self::Show => 0,
        }
    }
    /// Community cards on a fully dealt board at this street.
    pub const fn n_board(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
            Self::Show => 5,
        }
    }
    /// True for the four rounds in which players bet.
    pub const fn is_betting(&self) -> bool {
        !matches!(self, Self::Show)
    }
}

/// Infer the street from a fully dealt board.
impl TryFrom<usize> for Street {
    type Error = String;
    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Self::Pref),
            3 => Ok(Self::Flop),
            4 => Ok(Self::Turn),
            5 => Ok(Self::Rive),
            x => Err(format!("no street has {} board cards", x)),
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
            Self::Show => write!(f, "showdown"),
        }
    }
}

impl TryFrom<&str> for Street {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "p" | "pref" | "preflop" => Ok(Self::Pref),
            "f" | "flop" => Ok(Self::Flop),
            "t" | "turn" => Ok(Self::Turn),
            "r" | "rive" | "river" => Ok(Self::Rive),
            "s" | "show" | "showdown" => Ok(Self::Show),
            _ => Err(format!("invalid street: {}", s)),
        }
    }
}
