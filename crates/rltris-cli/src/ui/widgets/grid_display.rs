use ratatui::{
    prelude::{Buffer, Position, Rect},
    widgets::{Block, Widget},
};
use rltris_engine::Grid;

use crate::ui::widgets::{CellDisplay, block_horizontal_margin, block_vertical_margin, style};

/// Visible part of a grid; the hidden spawn rows are not drawn.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: Grid,
    hidden_rows: usize,
    block: Option<Block<'a>>,
}

impl<'a> GridDisplay<'a> {
    /// `grid` is usually the projection with the falling piece overlaid.
    pub fn new(grid: Grid, hidden_rows: usize) -> Self {
        Self {
            grid,
            hidden_rows,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn visible_height(&self) -> usize {
        self.grid.height().saturating_sub(self.hidden_rows)
    }

    pub fn width(&self) -> u16 {
        let cols = u16::try_from(self.grid.width()).unwrap_or(u16::MAX);
        cols.saturating_mul(CellDisplay::WIDTH)
            .saturating_add(block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.visible_height())
            .unwrap_or(u16::MAX)
            .saturating_add(block_vertical_margin(self.block.as_ref()))
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let inner = if let Some(block) = &self.block {
            block.render(area, buf);
            block.inner(area)
        } else {
            area
        };
        buf.set_style(inner, style::EMPTY);

        let rows = self.grid.rows().skip(self.hidden_rows);
        for (y, row) in (inner.top()..inner.bottom()).zip(rows) {
            let xs = (inner.left()..inner.right()).step_by(usize::from(CellDisplay::WIDTH));
            for (x, cell) in xs.zip(row) {
                CellDisplay::from_cell(*cell).draw_at(Position::new(x, y), inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rltris_engine::{Cell, ShapeKind};

    use super::*;

    #[test]
    fn test_hidden_rows_are_skipped() {
        let mut grid = Grid::new(4, 5);
        // Hidden row, never drawn.
        grid.fill_cell(0, 0, Cell::Filled(ShapeKind::Z));
        grid.fill_cell(1, 2, Cell::Filled(ShapeKind::I));
        grid.fill_cell(3, 4, Cell::Filled(ShapeKind::O));

        let display = GridDisplay::new(grid, 2);
        assert_eq!((display.width(), display.height()), (8, 3));

        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let line = |y: u16| -> String { (0..8).map(|x| buf[(x, y)].symbol()).collect() };
        assert_eq!(line(0), "  []    ");
        assert_eq!(line(1), "        ");
        assert_eq!(line(2), "      []");
        assert_eq!(buf[(2, 0)].bg, style::I_BLOCK.bg.unwrap());
        assert_eq!(buf[(6, 2)].bg, style::O_BLOCK.bg.unwrap());
    }

    #[test]
    fn test_bordered_size() {
        let display = GridDisplay::new(Grid::new(10, 22), 2).block(Block::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 22);
    }
}
