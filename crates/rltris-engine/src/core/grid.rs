use super::piece::{Piece, ShapeKind};

/// A single cell of the grid.
///
/// The numeric [`value`](Cell::value) is `0` for an empty cell and the
/// shape's color id (`1..=7`) for a locked block, so every stored value is in
/// `[0, 7]` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked block of a specific shape.
    Filled(ShapeKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the color id of the cell (`0` when empty).
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GridRow {
    cells: Box<[Cell]>,
}

impl GridRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width].into_boxed_slice(),
        }
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    fn is_occupied(&self) -> bool {
        self.cells.iter().any(|c| !c.is_empty())
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

/// Fixed-size cell matrix holding the locked blocks.
///
/// The grid spans the whole play-field including the hidden spawn rows at the
/// top. Row `0` is the topmost hidden row, row `height - 1` the floor.
///
/// The falling piece is never stored here while it falls; it is written in by
/// [`Grid::fill_piece`] at lock time, and [`Grid::with_piece`] builds a
/// projection with the piece overlaid for rendering and encoding.
///
/// # Example
///
/// ```
/// use rltris_engine::Grid;
///
/// let grid = Grid::new(10, 22);
/// assert!(grid.is_empty(0, 0));
/// // Out of bounds reads as occupied.
/// assert!(!grid.is_empty(-1, 0));
/// assert!(!grid.is_empty(10, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<GridRow>,
}

impl Grid {
    /// Creates an all-empty grid of `width` columns and `height` rows.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![GridRow::empty(width); height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells (`width * height`).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width * self.height()
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Returns `true` iff `(x, y)` is inside the grid and the cell is empty.
    ///
    /// Coordinates outside the grid read as occupied: they are collisions,
    /// never errors.
    #[must_use]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        self.cell(x, y).is_some_and(Cell::is_empty)
    }

    /// Returns an iterator over all rows from top (hidden rows first) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|row| &*row.cells)
    }

    /// Returns an iterator over every cell value in row-major order.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows().flatten().map(|c| c.value())
    }

    /// Writes a single cell. Coordinates outside the grid are ignored.
    pub fn fill_cell(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
            *slot = cell;
        }
    }

    /// Writes the piece's cells into the grid with the piece's color.
    ///
    /// This is called when a piece is locked into position.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let cell = Cell::Filled(piece.kind());
        for c in piece.cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(c.x), usize::try_from(c.y)) else {
                debug_assert!(false, "locking piece outside the grid: {c:?}");
                continue;
            };
            self.fill_cell(x, y, cell);
        }
    }

    /// Returns a copy of the grid with `piece` (if any) overlaid.
    ///
    /// The stored grid is left untouched.
    #[must_use]
    pub fn with_piece(&self, piece: Option<&Piece>) -> Grid {
        let mut grid = self.clone();
        if let Some(piece) = piece {
            grid.fill_piece(piece);
        }
        grid
    }

    /// Returns the indices of all rows where every column is occupied,
    /// top to bottom.
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(y, row)| row.is_filled().then_some(y))
            .collect()
    }

    /// Removes the given rows and shifts the rows above them down.
    ///
    /// The vacated top rows are refilled with empty cells and the grid height
    /// is unchanged. Indices outside the grid and duplicates are ignored.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let height = self.height();
        let mut removed = vec![false; height];
        for &y in rows {
            if let Some(flag) = removed.get_mut(y) {
                *flag = true;
            }
        }

        // Compact surviving rows toward the floor, bottom-up.
        let mut write = height;
        for read in (0..height).rev() {
            if removed[read] {
                continue;
            }
            write -= 1;
            if write != read {
                self.rows.swap(write, read);
            }
        }
        // Everything above `write` is vacated; `write` is the removed count.
        for row in &mut self.rows[..write] {
            row.clear();
        }
        write
    }

    /// Detects and clears all full rows in one pass.
    ///
    /// # Returns
    ///
    /// The number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let full = self.full_rows();
        if full.is_empty() {
            return 0;
        }
        self.clear_rows(&full)
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    #[must_use]
    pub fn is_all_empty(&self) -> bool {
        self.rows.iter().all(|row| !row.is_occupied())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.rows().flatten().filter(|c| !c.is_empty()).count()
    }

    /// Number of rows containing at least one occupied cell.
    #[must_use]
    pub fn occupied_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.is_occupied()).count()
    }
}
