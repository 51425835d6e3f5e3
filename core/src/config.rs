use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of lives a player starts every game with.
pub const STARTING_LIVES: u8 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    /// Seconds a player has to unscramble the word after stepping on a mine.
    pub time_limit_secs: u32,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            cols,
            mines,
            time_limit_secs: 15,
        }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_time_limit_secs(mut self, time_limit_secs: u32) -> Self {
        self.time_limit_secs = time_limit_secs;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        if self.mines == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs as u64)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(8, 12, 10)
    }
}
