use serde::Deserialize;
use serde::Serialize;

/// Identity of a seated player, stable for the whole hand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PlayerId(u32);

impl PlayerId {
    pub const fn from_raw(n: u32) -> Self {
        Self(n)
    }
}

impl From<u32> for PlayerId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}
impl From<PlayerId> for u32 {
    fn from(p: PlayerId) -> Self {
        p.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}
