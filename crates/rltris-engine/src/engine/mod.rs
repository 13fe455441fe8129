//! Game engine logic and state management.
//!
//! This module provides the tick-driven logic that orchestrates the core data
//! structures:
//!
//! - [`Board`] - Grid, falling piece, spawn/fall countdowns and the `step` loop
//! - [`BoardConfig`] - Board dimensions and timing constants
//! - [`BoardStats`] - Lock, line-clear and loss counters
//! - [`Controller`] - Episode notifications and action choice for autonomous play
//! - [`ShapeSource`] - Where new pieces come from ([`RandomShapes`], [`ShapeSequence`])
//! - [`EncodedState`] - 0/1 feature vector of the grid with the falling piece
//!
//! # Game Flow
//!
//! 1. The spawn countdown runs out and a new piece appears in the hidden rows
//! 2. Gravity moves the piece down one row every `fall_delay` ticks
//! 3. Input events or the controller shift, rotate or hard-drop the piece
//! 4. When gravity cannot move the piece it locks, the grid is scored and the
//!    controller is told the episode ended, then full rows are cleared
//! 5. A spawn onto occupied cells silently empties the grid and play goes on
//!
//! # Example
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use rltris_engine::{Action, Board, BoardConfig, InputEvent, ShapeKind, ShapeSequence};
//!
//! let config = BoardConfig {
//!     spawn_delay: 0,
//!     ..BoardConfig::default()
//! };
//! let mut board = Board::new(config, Box::new(ShapeSequence::new(vec![ShapeKind::I]))).unwrap();
//!
//! // First tick spawns the piece.
//! assert!(board.step(&[], None).is_continue());
//! assert!(board.is_piece_falling());
//!
//! let flow = board.step(&[InputEvent::Action(Action::Drop), InputEvent::Quit], None);
//! assert_eq!(flow, ControlFlow::Break(()));
//! ```

pub use self::{
    action::*, board::*, board_config::*, board_stats::*, controller::*, encoder::*,
    score::*, shape_source::*,
};

mod action;
mod board;
mod board_config;
mod board_stats;
mod controller;
mod encoder;
mod score;
mod shape_source;
