use std::collections::{BTreeSet, VecDeque};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was already revealed, flagged or resolved.
    Unchanged,
    /// Safe cells were uncovered, `victory` is set once the last one is.
    Revealed { cells: Vec<Coord2>, victory: bool },
    /// Target is a mine, its state is left untouched until [`Board::resolve_mine`].
    MineTriggered(Coord2),
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub const fn is_victory(&self) -> bool {
        matches!(self, Self::Revealed { victory: true, .. })
    }
}

impl Board {
    /// Reveals a cell, flooding through every contiguous zero-count region.
    ///
    /// The flood walks an explicit work list so board size never affects stack depth, and
    /// each cell is revealed at most once.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use CellState::*;

        match self.get_state(coords)? {
            MineHidden => {
                log::debug!("Mine triggered at {:?}", coords);
                return Ok(RevealOutcome::MineTriggered(coords));
            }
            Hidden => {}
            Revealed | Flagged | MineDefused | MineDetonated => return Ok(RevealOutcome::Unchanged),
        }

        let mut cells = Vec::new();
        let mut visited = BTreeSet::from([coords]);
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            // only plain hidden cells open, flags and mines stay put
            if self.get_state(visit_coords)? != Hidden {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            self.set_state(visit_coords, Revealed)?;
            cells.push(visit_coords);

            let adjacent_mines = self.mine_layout().adjacent_mine_count(visit_coords);
            log::trace!(
                "Revealed cell at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                for neighbor in self.iter_neighbors(visit_coords) {
                    if visited.insert(neighbor) {
                        to_visit.push_back(neighbor);
                    }
                }
            }
        }

        let victory = self.is_cleared();
        if victory {
            log::debug!("All {} safe cells revealed", self.safe_cell_count());
        }
        Ok(RevealOutcome::Revealed { cells, victory })
    }

    /// Settles a triggered mine: defused on success, detonated otherwise.
    ///
    /// Lives are the caller's business. Cells that are not an unresolved mine are left alone.
    pub fn resolve_mine(&mut self, coords: Coord2, success: bool) -> Result<MarkOutcome> {
        if self.get_state(coords)? != CellState::MineHidden {
            log::warn!("No unresolved mine to settle at {:?}", coords);
            return Ok(MarkOutcome::NoChange);
        }

        let new_state = if success {
            CellState::MineDefused
        } else {
            CellState::MineDetonated
        };
        log::debug!("Mine at {:?} resolved as {:?}", coords, new_state);
        self.set_state(coords, new_state)?;
        Ok(MarkOutcome::Changed)
    }

    /// Every mine with its current state, for the end-of-game reveal.
    pub fn reveal_all_mines_for_display(&self) -> impl Iterator<Item = (Coord2, CellState)> + '_ {
        self.iter_mines().map(|coords| {
            let state = self.get_state(coords).unwrap_or(CellState::MineHidden);
            (coords, state)
        })
    }
}
