use ratatui::{
    prelude::{Buffer, Position, Rect},
    style::Style,
};
use rltris_engine::{Cell, ShapeKind};

use crate::ui::widgets::style;

/// One grid cell drawn two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY, "  "),
            Cell::Filled(kind) => {
                let style = match kind {
                    ShapeKind::I => style::I_BLOCK,
                    ShapeKind::J => style::J_BLOCK,
                    ShapeKind::L => style::L_BLOCK,
                    ShapeKind::O => style::O_BLOCK,
                    ShapeKind::S => style::S_BLOCK,
                    ShapeKind::T => style::T_BLOCK,
                    ShapeKind::Z => style::Z_BLOCK,
                };
                Self::new(style, "[]")
            }
        }
    }

    /// Draws the cell with its top-left corner at `position`, clipped to `area`.
    pub fn draw_at(&self, position: Position, area: Rect, buf: &mut Buffer) {
        let max_width = area.right().saturating_sub(position.x);
        buf.set_stringn(
            position.x,
            position.y,
            self.symbol,
            usize::from(max_width),
            self.style,
        );
    }
}
