use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Padding, Widget},
};
use rltris_engine::Board;

use crate::ui::widgets::{GridDisplay, LearnerStatus, StatsDisplay, color, style};

const HELP: &str = "← → / A D (Move) | ↑ / W (Rotate) | ↓ / S / Space (Drop) | Q / Esc (Quit)";

/// Whole play screen: the board, the stats panel and a key help line.
#[derive(Debug)]
pub struct PlayDisplay<'a> {
    board: &'a Board,
    learner: Option<LearnerStatus>,
    fast: bool,
}

impl<'a> PlayDisplay<'a> {
    pub fn new(board: &'a Board, learner: Option<LearnerStatus>) -> Self {
        Self {
            board,
            learner,
            fast: false,
        }
    }

    pub fn fast(self, fast: bool) -> Self {
        Self { fast, ..self }
    }
}

impl Widget for PlayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PlayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let border_style = if self.fast {
            color::MAGENTA
        } else {
            color::WHITE
        };

        let grid = GridDisplay::new(self.board.grid_with_piece(), self.board.config().hidden_rows)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let stats = StatsDisplay::new(self.board.stats(), self.learner.as_ref()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let help = Text::from(HELP).style(style::HELP).centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(u16::max(grid.height(), stats.height())),
            Constraint::Length(1),
        ])
        .areas(area);
        let [grid_area, stats_area] = Layout::horizontal([
            Constraint::Length(grid.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_area);

        grid.render(grid_area, buf);
        stats.render(stats_area, buf);
        help.render(help_area, buf);
    }
}
