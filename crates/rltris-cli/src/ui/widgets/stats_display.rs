use ratatui::{
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};
use rltris_engine::BoardStats;
use rltris_learning::{PolicyKind, RewardSummary};

use crate::ui::widgets::{block_horizontal_margin, block_vertical_margin, style};

/// Snapshot of the learner shown next to the board.
#[derive(Debug, Clone, Copy)]
pub struct LearnerStatus {
    pub episodes: u64,
    pub exploration_rate: f32,
    pub backend: PolicyKind,
    pub rewards: Option<RewardSummary>,
}

/// Board counters and learner progress as label/value rows.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    rows: Vec<(&'static str, String)>,
    block: Option<Block<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &BoardStats, learner: Option<&LearnerStatus>) -> Self {
        let mut rows = vec![
            ("TICKS", stats.ticks().to_string()),
            ("PIECES", stats.locked_pieces().to_string()),
            ("LINES", stats.total_cleared_lines().to_string()),
            ("LOSSES", stats.losses().to_string()),
            (
                "REWARD",
                stats
                    .last_reward()
                    .map_or_else(|| "-".to_owned(), |r| format!("{r:.3}")),
            ),
        ];
        match learner {
            Some(learner) => rows.extend([
                ("POLICY", learner.backend.to_string()),
                ("EPISODES", learner.episodes.to_string()),
                ("EPSILON", format!("{:.3}", learner.exploration_rate)),
                (
                    "MEAN",
                    learner
                        .rewards
                        .map_or_else(|| "-".to_owned(), |r| format!("{:.3}", r.mean)),
                ),
            ]),
            None => rows.push(("MODE", "manual".to_owned())),
        }
        Self { rows, block: None }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let label_width = self.rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        self.rows
            .iter()
            .map(|(label, value)| Line::from(format!("{label:<label_width$} {value:>10}")))
            .collect()
    }

    pub fn width(&self) -> u16 {
        let text_width = self.lines().iter().map(Line::width).max().unwrap_or(0);
        u16::try_from(text_width)
            .unwrap_or(u16::MAX)
            .saturating_add(block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(block_vertical_margin(self.block.as_ref()))
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut paragraph = Paragraph::new(self.lines()).style(style::DEFAULT);
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_rows() {
        let mut stats = BoardStats::new();
        stats.record_lock(1, 0.5);
        let display = StatsDisplay::new(&stats, None);
        let labels: Vec<_> = display.rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            ["TICKS", "PIECES", "LINES", "LOSSES", "REWARD", "MODE"]
        );
        assert_eq!(display.rows[4].1, "0.500");
        assert_eq!(display.height(), 6);
    }

    #[test]
    fn test_learner_rows() {
        let status = LearnerStatus {
            episodes: 12,
            exploration_rate: 0.1,
            backend: PolicyKind::Tabular,
            rewards: None,
        };
        let display = StatsDisplay::new(&BoardStats::new(), Some(&status));
        let rows: Vec<_> = display
            .rows
            .iter()
            .map(|(l, v)| format!("{l}={v}"))
            .collect();
        assert!(rows.contains(&"POLICY=tabular".to_owned()));
        assert!(rows.contains(&"EPISODES=12".to_owned()));
        assert!(rows.contains(&"MEAN=-".to_owned()));
        assert!(rows.contains(&"REWARD=-".to_owned()));
    }
}
