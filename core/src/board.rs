use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the mines are, independent of what the player has uncovered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Picks `count` distinct positions uniformly at random, without replacement.
    ///
    /// At least one mine and at least one safe cell are required.
    pub fn random<R: Rng + ?Sized>(size: Coord2, count: CellCount, rng: &mut R) -> Result<Self> {
        let total_cells = mult(size.0, size.1);
        if count == 0 || count >= total_cells {
            log::warn!(
                "Refusing to place {} mines on a board of {} cells",
                count,
                total_cells
            );
            return Err(GameError::InvalidMineCount);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let picks = rand::seq::index::sample(rng, total_cells.into(), count.into());
        for index in picks.into_iter() {
            mine_mask[nth_cell(index, size.1).to_nd_index()] = true;
        }

        Ok(Self {
            mine_mask,
            mine_count: count,
        })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        // constructors only ever take Coord-sized dimensions
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = self.iter_neighbors(coords).filter(|&pos| self[pos]).count();
        // at most eight neighbors
        count as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Grid of cell states on top of a [`MineLayout`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    mines_placed: bool,
}

impl Board {
    /// Creates a board with no mines yet, see [`Board::place_mines`].
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        Ok(Self {
            mine_layout: MineLayout::empty(size),
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            mines_placed: false,
        })
    }

    /// Creates a board with a fixed layout.
    pub fn with_layout(mine_layout: MineLayout) -> Result<Self> {
        let mut board = Self::new(mine_layout.size())?;
        let mine_count = mine_layout.mine_count();
        if mine_count == 0 || mine_count >= mine_layout.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        board.install_layout(mine_layout);
        Ok(board)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        Self::with_layout(MineLayout::from_mine_coords(size, mine_coords)?)
    }

    /// Places `count` mines uniformly at random. Only allowed once, before any reveal.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, count: CellCount, rng: &mut R) -> Result<()> {
        if self.mines_placed || self.revealed_count > 0 {
            return Err(GameError::MinesAlreadyPlaced);
        }
        let mine_layout = MineLayout::random(self.size(), count, rng)?;
        self.install_layout(mine_layout);
        Ok(())
    }

    fn install_layout(&mut self, mine_layout: MineLayout) {
        for coords in mine_layout.iter_mines() {
            self.cells[coords.to_nd_index()] = CellState::MineHidden;
        }
        log::debug!(
            "Placed {} mines on a {:?} board",
            mine_layout.mine_count(),
            mine_layout.size()
        );
        self.mine_layout = mine_layout;
        self.mines_placed = true;
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.mine_layout.safe_cell_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    /// Every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.mines_placed && self.revealed_count == self.safe_cell_count()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        self.mine_layout.validate_coords(coords)
    }

    pub fn get_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Overwrites a cell state, keeping the revealed counter in sync.
    ///
    /// Transition rules are enforced by the reveal engine, not here.
    pub fn set_state(&mut self, coords: Coord2, new_state: CellState) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        match (*cell, new_state) {
            (CellState::Revealed, CellState::Revealed) => {}
            (CellState::Revealed, _) => self.revealed_count -= 1,
            (_, CellState::Revealed) => self.revealed_count += 1,
            _ => {}
        }
        *cell = new_state;
        Ok(())
    }

    pub fn contains_mine(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self.mine_layout.contains_mine(coords))
    }

    /// Mines among the up-to-8 in-bounds neighbors.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.mine_layout.adjacent_mine_count(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match *cell {
            Hidden | MineHidden => {
                *cell = Flagged;
                Changed
            }
            Flagged if self.mine_layout.contains_mine(coords) => {
                *cell = MineHidden;
                Changed
            }
            Flagged => {
                *cell = Hidden;
                Changed
            }
            Revealed | MineDefused | MineDetonated => NoChange,
        })
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout.iter_mines()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_layout.iter_neighbors(coords)
    }

    /// Number of cells currently in `state`.
    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn place_mines_places_exact_count() {
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = Board::new((6, 7)).unwrap();

            board.place_mines(12, &mut rng).unwrap();

            assert_eq!(board.iter_mines().count(), 12);
            assert_eq!(board.count_state(CellState::MineHidden), 12);
            assert_eq!(board.safe_cell_count(), 30);
        }
    }

    #[test]
    fn place_mines_is_deterministic_for_a_seed() {
        let mut first = Board::new((8, 12)).unwrap();
        let mut second = Board::new((8, 12)).unwrap();

        first
            .place_mines(10, &mut SmallRng::seed_from_u64(7))
            .unwrap();
        second
            .place_mines(10, &mut SmallRng::seed_from_u64(7))
            .unwrap();

        assert_eq!(first.mine_layout(), second.mine_layout());
    }

    #[test]
    fn place_mines_rejects_full_board() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::new((2, 2)).unwrap();

        assert_eq!(
            board.place_mines(4, &mut rng),
            Err(GameError::InvalidMineCount)
        );
        assert!(!board.mines_placed());
        assert!(board.place_mines(3, &mut rng).is_ok());
    }

    #[test]
    fn layouts_need_at_least_one_mine() {
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(
            Board::from_mine_coords((2, 2), &[]),
            Err(GameError::InvalidMineCount)
        );
        assert_eq!(
            Board::new((2, 2)).unwrap().place_mines(0, &mut rng),
            Err(GameError::InvalidMineCount)
        );
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(0, 0), (0, 1), (1, 0), (1, 1)]),
            Err(GameError::InvalidMineCount)
        );
    }

    #[test]
    fn place_mines_only_once() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::new((3, 3)).unwrap();

        board.place_mines(2, &mut rng).unwrap();

        assert_eq!(
            board.place_mines(2, &mut rng),
            Err(GameError::MinesAlreadyPlaced)
        );
    }

    #[test]
    fn adjacent_count_in_corner_is_at_most_three() {
        let board = Board::from_mine_coords((3, 3), &[(0, 1), (1, 0), (1, 1), (2, 2)]).unwrap();

        assert_eq!(board.adjacent_mine_count((0, 0)), Ok(3));
        assert_eq!(board.adjacent_mine_count((2, 1)), Ok(3));
    }

    #[test]
    fn adjacent_count_surrounded_cell_is_eight() {
        let ring = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ];
        let board = Board::from_mine_coords((3, 3), &ring).unwrap();

        assert_eq!(board.adjacent_mine_count((1, 1)), Ok(8));
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut board = Board::from_mine_coords((2, 3), &[(0, 0)]).unwrap();

        assert_eq!(board.get_state((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.get_state((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(
            board.set_state((5, 5), CellState::Revealed),
            Err(GameError::OutOfBounds)
        );
        assert_eq!(board.adjacent_mine_count((9, 0)), Err(GameError::OutOfBounds));
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn set_state_tracks_revealed_count() {
        let mut board = Board::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        board.set_state((1, 1), CellState::Revealed).unwrap();
        board.set_state((1, 1), CellState::Revealed).unwrap();
        assert_eq!(board.revealed_count(), 1);

        board.set_state((1, 0), CellState::Revealed).unwrap();
        board.set_state((0, 1), CellState::Revealed).unwrap();
        assert!(board.is_cleared());
    }

    #[test]
    fn flagging_a_mine_keeps_it_a_mine() {
        let mut board = Board::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        assert_eq!(board.toggle_flag((0, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(board.get_state((0, 0)), Ok(CellState::Flagged));
        assert_eq!(board.adjacent_mine_count((1, 1)), Ok(1));

        assert_eq!(board.toggle_flag((0, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(board.get_state((0, 0)), Ok(CellState::MineHidden));

        board.toggle_flag((1, 1)).unwrap();
        board.toggle_flag((1, 1)).unwrap();
        assert_eq!(board.get_state((1, 1)), Ok(CellState::Hidden));
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut board = Board::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        board.set_state((1, 1), CellState::Revealed).unwrap();

        assert_eq!(board.toggle_flag((1, 1)), Ok(MarkOutcome::NoChange));
        assert_eq!(board.get_state((1, 1)), Ok(CellState::Revealed));
    }
}
