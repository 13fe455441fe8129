/// Counters describing what happened on a [`Board`](super::Board).
///
/// - **Ticks**: number of `step` calls
/// - **Locked pieces**: pieces written into the grid
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 rows
/// - **Losses**: spawns that collided and reset the grid
/// - **Last reward**: score of the grid at the most recent lock
///
/// # Example
///
/// ```
/// use rltris_engine::BoardStats;
///
/// let mut stats = BoardStats::new();
/// stats.record_lock(2, 0.8);
///
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// assert_eq!(stats.last_reward(), Some(0.8));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoardStats {
    ticks: u64,
    locked_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    losses: usize,
    last_reward: Option<f32>,
}

impl Default for BoardStats {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            locked_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            losses: 0,
            last_reward: None,
        }
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of rows cleared per lock.
    ///
    /// Index `n` counts locks that cleared `n` rows; a single tetromino spans
    /// at most four rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    #[must_use]
    pub const fn losses(&self) -> usize {
        self.losses
    }

    #[must_use]
    pub const fn last_reward(&self) -> Option<f32> {
        self.last_reward
    }

    pub const fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Updates statistics after a lock that cleared `cleared_lines` rows and
    /// was scored `reward`.
    pub fn record_lock(&mut self, cleared_lines: usize, reward: f32) {
        self.locked_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;
        self.last_reward = Some(reward);
    }

    pub const fn record_loss(&mut self) {
        self.losses += 1;
    }
}
