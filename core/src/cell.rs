use serde::{Deserialize, Serialize};

/// State of a single grid position.
///
/// Mine cells start as `MineHidden` and only leave that state through flagging or through
/// the resolution of a challenge. `Revealed`, `MineDefused` and `MineDetonated` are terminal
/// for the rest of a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
    MineHidden,
    MineDefused,
    MineDetonated,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::MineHidden)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Revealed | Self::MineDefused | Self::MineDetonated)
    }

    /// What a player may see of this cell while the game is still running.
    pub const fn masked(self) -> Self {
        match self {
            Self::MineHidden => Self::Hidden,
            other => other,
        }
    }
}
