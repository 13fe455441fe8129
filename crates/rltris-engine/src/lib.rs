//! Game-state engine for a falling-block puzzle that can be driven by key
//! input or by a learning controller.
//!
//! - [`core`] holds the data structures: [`Grid`], [`Piece`], [`ShapeKind`].
//! - [`engine`] holds the tick-driven [`Board`] state machine and the seams a
//!   driver plugs into: [`Controller`], [`ShapeSource`] and [`InputEvent`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
