use serde::{Deserialize, Serialize};

/// Board dimensions and tick timing.
///
/// The defaults are the classic 10×20 field with two hidden spawn rows, a
/// 20-tick spawn delay and a 10-tick fall delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows shown to the player.
    pub visible_height: usize,
    /// Rows above the visible field used as spawn buffer.
    pub hidden_rows: usize,
    /// Ticks between a lock and the next spawn.
    pub spawn_delay: u32,
    /// Ticks between two gravity steps.
    pub fall_delay: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 10,
            visible_height: 20,
            hidden_rows: Self::EXTRA_HIDDEN_ROWS,
            spawn_delay: 20,
            fall_delay: 10,
        }
    }
}

impl BoardConfig {
    /// Hidden rows needed to hold every spawn layout.
    pub const EXTRA_HIDDEN_ROWS: usize = 2;
    /// Narrowest board every spawn layout fits in.
    pub const MIN_WIDTH: usize = 4;
    /// Largest width or height accepted.
    pub const MAX_DIMENSION: usize = 1 << 12;

    /// Total grid height, hidden rows included.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.visible_height + self.hidden_rows
    }

    /// Length of the encoded state vector (`width * height`).
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.width * self.height()
    }

    /// Column offset at which spawn layouts are placed (centered).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn spawn_x(&self) -> i32 {
        (self.width.saturating_sub(Self::MIN_WIDTH) / 2) as i32
    }

    pub fn validate(&self) -> Result<(), BoardConfigError> {
        if self.width < Self::MIN_WIDTH {
            return Err(BoardConfigError::TooNarrow { width: self.width });
        }
        if self.hidden_rows < Self::EXTRA_HIDDEN_ROWS {
            return Err(BoardConfigError::TooFewHiddenRows {
                hidden_rows: self.hidden_rows,
            });
        }
        if self.width > Self::MAX_DIMENSION || self.height() > Self::MAX_DIMENSION {
            return Err(BoardConfigError::TooLarge {
                width: self.width,
                height: self.height(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardConfigError {
    #[display("board width must be at least {}, got {width}", BoardConfig::MIN_WIDTH)]
    TooNarrow { width: usize },
    #[display(
        "board needs at least {} hidden rows, got {hidden_rows}",
        BoardConfig::EXTRA_HIDDEN_ROWS
    )]
    TooFewHiddenRows { hidden_rows: usize },
    #[display(
        "board dimensions {width}x{height} exceed the limit of {}",
        BoardConfig::MAX_DIMENSION
    )]
    TooLarge { width: usize, height: usize },
}
