/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major position of the `index`-th cell on a board `cols` wide.
pub(crate) fn nth_cell(index: usize, cols: Coord) -> Coord2 {
    let cols = usize::from(cols);
    // bounded by rows * cols, both of which fit in a Coord
    ((index / cols) as Coord, (index % cols) as Coord)
}

/// Lowest and highest in-bounds positions at most one step from `at` on an axis of `len`.
fn window(at: Coord, len: Coord) -> (Coord, Coord) {
    (at.saturating_sub(1), at.saturating_add(1).min(len.saturating_sub(1)))
}

/// Walks the 3x3 window around a cell in row-major order, skipping the cell itself.
///
/// The window is clamped to the board, so edges and corners yield fewer cells.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    last_row: Coord,
    first_col: Coord,
    last_col: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, (rows, cols): Coord2) -> Self {
        let (first_row, last_row) = window(center.0, rows);
        let (first_col, last_col) = window(center.1, cols);
        let in_bounds = center.0 < rows && center.1 < cols;
        Self {
            center,
            last_row,
            first_col,
            last_col,
            cursor: in_bounds.then_some((first_row, first_col)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (row, col) = self.cursor?;
            self.cursor = if col < self.last_col {
                Some((row, col + 1))
            } else if row < self.last_row {
                Some((row + 1, self.first_col))
            } else {
                None
            };

            if (row, col) != self.center {
                return Some((row, col));
            }
        }
    }
}
