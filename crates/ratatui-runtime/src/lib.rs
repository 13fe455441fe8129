//! Minimal tick/render event loop for terminal applications.
//!
//! Implement [`App`] and hand it to [`Runtime::run`]. Ticks may be paced at a
//! fixed rate or unpaced ([`TickRate`]), and rendering may be turned off with
//! [`RenderMode::Never`] while the terminal keeps delivering key input.
//!
//! ```no_run
//! use std::ops::ControlFlow;
//!
//! use crossterm::event::Event;
//! use ratatui::Frame;
//! use ratatui_runtime::{App, RenderMode, Runtime, TickRate, Timing};
//!
//! struct Counter(u64);
//!
//! impl App for Counter {
//!     fn handle_event(&mut self, event: Event) -> ControlFlow<()> {
//!         if event.is_key_press() {
//!             ControlFlow::Break(())
//!         } else {
//!             ControlFlow::Continue(())
//!         }
//!     }
//!
//!     fn update(&mut self) -> ControlFlow<()> {
//!         self.0 += 1;
//!         ControlFlow::Continue(())
//!     }
//!
//!     fn draw(&self, frame: &mut Frame) {
//!         frame.render_widget(self.0.to_string(), frame.area());
//!     }
//! }
//!
//! let timing = Timing {
//!     tick: TickRate::from_hz(30.0),
//!     render: RenderMode::OnDirty,
//! };
//! Runtime::new(timing).run(&mut Counter(0)).unwrap();
//! ```

pub use self::{
    app::{App, Timing},
    event_loop::{RenderMode, TickRate},
    runtime::Runtime,
};

mod app;
mod event;
mod event_loop;
mod runtime;
