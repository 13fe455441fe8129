use std::ops::ControlFlow;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{RenderMode, TickRate};

/// Tick pacing and rendering of a [`Runtime`](crate::Runtime).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timing {
    pub tick: TickRate,
    pub render: RenderMode,
}

/// Application driven by [`Runtime::run`](crate::Runtime::run).
///
/// Events arrive one at a time on the calling thread; none of the methods
/// run concurrently.
///
/// Returning [`ControlFlow::Break`] from [`update`](App::update) or
/// [`handle_event`](App::handle_event) ends the run after the current event.
pub trait App {
    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, event: Event) -> ControlFlow<()>;

    /// Advances the application by one tick.
    fn update(&mut self) -> ControlFlow<()>;

    /// Draws the current state. Never called with [`RenderMode::Never`].
    fn draw(&self, frame: &mut Frame);
}
