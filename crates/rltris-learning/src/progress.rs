/// Running summary of the episode rewards since the last report.
#[derive(Debug, Clone, Default)]
pub struct RewardWindow {
    count: u64,
    min: f32,
    max: f32,
    sum: f64,
}

/// Snapshot of a [`RewardWindow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardSummary {
    pub count: u64,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl RewardWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reward: f32) {
        if self.count == 0 {
            self.min = reward;
            self.max = reward;
        } else {
            self.min = self.min.min(reward);
            self.max = self.max.max(reward);
        }
        self.count += 1;
        self.sum += f64::from(reward);
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `None` while the window is empty.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn summary(&self) -> Option<RewardSummary> {
        (self.count > 0).then(|| RewardSummary {
            count: self.count,
            min: self.min,
            max: self.max,
            mean: (self.sum / self.count as f64) as f32,
        })
    }

    /// Returns the summary and starts a new window.
    pub fn take(&mut self) -> Option<RewardSummary> {
        let summary = self.summary();
        *self = Self::new();
        summary
    }
}
