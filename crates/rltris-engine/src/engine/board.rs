use std::ops::ControlFlow;

use crate::core::{Grid, Piece};

use super::{
    action::{Action, InputEvent},
    board_config::{BoardConfig, BoardConfigError},
    board_stats::BoardStats,
    controller::Controller,
    encoder::EncodedState,
    score::score,
    shape_source::{RandomShapes, ShapeSource},
};

/// Tick-driven game state: the grid, the falling piece and the two countdowns.
///
/// The board is either waiting out the spawn countdown with no piece, or has
/// exactly one falling piece. A piece that cannot fall further is locked into
/// the grid. A spawn onto occupied cells is a loss, which silently empties the
/// grid; there is no game-over state.
///
/// All placement rules are total: moves that would leave the grid or overlap
/// a locked block are rejected and leave the state unchanged.
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    falling_piece: Option<Piece>,
    /// `None` once the pending piece has spawned, until the next lock.
    spawn_countdown: Option<u32>,
    fall_countdown: u32,
    shapes: Box<dyn ShapeSource>,
    stats: BoardStats,
}

impl Board {
    pub fn new(
        config: BoardConfig,
        shapes: Box<dyn ShapeSource>,
    ) -> Result<Self, BoardConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            grid: Grid::new(config.width, config.height()),
            falling_piece: None,
            spawn_countdown: Some(config.spawn_delay),
            fall_countdown: config.fall_delay,
            shapes,
            stats: BoardStats::new(),
        })
    }

    /// Creates a board whose shapes are drawn uniformly at random.
    ///
    /// With a `seed` the shape order is reproducible.
    pub fn with_random_shapes(
        config: BoardConfig,
        seed: Option<u64>,
    ) -> Result<Self, BoardConfigError> {
        let shapes = seed.map_or_else(RandomShapes::new, RandomShapes::from_seed);
        Self::new(config, Box::new(shapes))
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The locked blocks, without the falling piece.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn is_piece_falling(&self) -> bool {
        self.falling_piece.is_some()
    }

    #[must_use]
    pub fn stats(&self) -> &BoardStats {
        &self.stats
    }

    /// Ticks left before the next spawn, or `None` while a piece is out.
    #[must_use]
    pub fn spawn_countdown(&self) -> Option<u32> {
        self.spawn_countdown
    }

    #[must_use]
    pub fn fall_countdown(&self) -> u32 {
        self.fall_countdown
    }

    /// Projection of the grid with the falling piece overlaid.
    #[must_use]
    pub fn grid_with_piece(&self) -> Grid {
        self.grid.with_piece(self.falling_piece.as_ref())
    }

    /// Encoding of [`grid_with_piece`](Self::grid_with_piece).
    #[must_use]
    pub fn encoded_state(&self) -> EncodedState {
        EncodedState::from_grid(&self.grid_with_piece())
    }

    /// Advances the game by one tick.
    ///
    /// 1. Spawns a piece if the spawn countdown reached zero, otherwise counts it down
    /// 2. Applies gravity when the fall countdown has elapsed, locking the
    ///    piece if it cannot move down
    /// 3. Applies `events` in order; a [`InputEvent::Quit`] stops the tick
    /// 4. Asks `controller` (if any) for an action while a piece is falling
    ///    and applies it
    ///
    /// Returns [`ControlFlow::Break`] only when a quit was requested.
    pub fn step(
        &mut self,
        events: &[InputEvent],
        mut controller: Option<&mut dyn Controller>,
    ) -> ControlFlow<()> {
        self.stats.record_tick();

        match self.spawn_countdown {
            Some(0) => {
                self.spawn_countdown = None;
                self.spawn_piece(controller.as_deref_mut());
            }
            Some(n) => self.spawn_countdown = Some(n - 1),
            None => {}
        }

        if self.falling_piece.is_some() {
            if self.fall_countdown == 0 {
                self.apply_gravity(controller.as_deref_mut());
                self.fall_countdown = self.config.fall_delay;
            }
            self.fall_countdown = self.fall_countdown.saturating_sub(1);
        }

        for event in events {
            match *event {
                InputEvent::Quit => return ControlFlow::Break(()),
                InputEvent::Action(action) => _ = self.apply(action),
            }
        }

        if let Some(controller) = controller
            && self.is_piece_falling()
        {
            let action = controller.choose_action(&self.encoded_state());
            _ = self.apply(action);
        }

        ControlFlow::Continue(())
    }

    /// Applies a single action to the falling piece.
    ///
    /// Returns `true` if the piece moved.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Left => self.shift_left(),
            Action::Right => self.shift_right(),
            Action::Drop => self.drop(),
            Action::Rotate => self.rotate(),
        }
    }

    pub fn shift_left(&mut self) -> bool {
        self.try_move(Piece::left)
    }

    pub fn shift_right(&mut self) -> bool {
        self.try_move(Piece::right)
    }

    /// Rotates the piece about its pivot if every rotated cell is free.
    pub fn rotate(&mut self) -> bool {
        self.try_move(Piece::rotated)
    }

    /// Hard drop: moves the piece down until blocked, within this call.
    ///
    /// The piece is not locked here; it locks on the next gravity step.
    pub fn drop(&mut self) -> bool {
        let Some(piece) = self.falling_piece else {
            return false;
        };
        let dropped = piece.simulate_drop_position(&self.grid);
        self.falling_piece = Some(dropped);
        dropped != piece
    }

    fn try_move(&mut self, f: impl FnOnce(&Piece) -> Piece) -> bool {
        let Some(piece) = &self.falling_piece else {
            return false;
        };
        let moved = f(piece);
        if !moved.fits(&self.grid) {
            return false;
        }
        self.falling_piece = Some(moved);
        true
    }

    fn spawn_piece(&mut self, controller: Option<&mut (dyn Controller + '_)>) {
        let kind = self.shapes.next_shape();
        let piece = Piece::spawn(kind, self.config.spawn_x());
        self.falling_piece = Some(piece);
        if let Some(controller) = controller {
            controller.on_episode_start();
        }

        if !piece.fits(&self.grid) {
            tracing::debug!(shape = %kind.as_char(), "spawn collided, resetting grid");
            self.grid.reset();
            self.stats.record_loss();
        }
    }

    fn apply_gravity(&mut self, controller: Option<&mut (dyn Controller + '_)>) {
        let Some(piece) = self.falling_piece else {
            return;
        };
        let moved = piece.down();
        if moved.fits(&self.grid) {
            self.falling_piece = Some(moved);
        } else {
            self.lock_piece(&piece, controller);
        }
    }

    fn lock_piece(&mut self, piece: &Piece, controller: Option<&mut (dyn Controller + '_)>) {
        self.grid.fill_piece(piece);
        self.falling_piece = None;
        self.spawn_countdown = Some(self.config.spawn_delay);

        let reward = score(&self.grid);
        if let Some(controller) = controller {
            controller.on_episode_end(reward, &EncodedState::from_grid(&self.grid));
        }

        let cleared_lines = self.grid.clear_full_rows();
        self.stats.record_lock(cleared_lines, reward);
        tracing::trace!(
            shape = %piece.kind().as_char(),
            cleared_lines,
            reward,
            "piece locked"
        );
    }
}
