use crate::core::Grid;

/// Scores a grid as `1 + filled_cell_fraction - occupied_row_fraction`.
///
/// - `filled_cell_fraction`: occupied cells / total cells
/// - `occupied_row_fraction`: rows with at least one occupied cell / total rows
///
/// The result lies in `[0, 2]` and is independent of the grid size: a flat,
/// tightly packed stack scores higher than a tall, sparse one. The board
/// hands this value to the controller as the reward at each lock, before full
/// rows are cleared.
///
/// # Example
///
/// ```
/// use rltris_engine::{Grid, score};
///
/// assert_eq!(score(&Grid::new(10, 22)), 1.0);
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn score(grid: &Grid) -> f32 {
    if grid.cell_count() == 0 {
        return 1.0;
    }
    let filled_cell_fraction = grid.filled_cells() as f32 / grid.cell_count() as f32;
    let occupied_row_fraction = grid.occupied_rows() as f32 / grid.height() as f32;
    1.0 + filled_cell_fraction - occupied_row_fraction
}
