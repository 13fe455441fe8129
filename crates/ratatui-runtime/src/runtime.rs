use std::{io, ops::ControlFlow};

use crate::{
    App, Timing,
    event::LoopEvent,
    event_loop::EventLoop,
};

/// Runs an [`App`] on the terminal.
///
/// The terminal is put in raw mode on the alternate screen for the whole run,
/// even when the app never renders, so key input keeps arriving.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new(timing: Timing) -> Self {
        Self {
            events: EventLoop::new(timing.tick, timing.render),
        }
    }

    /// Runs `app` until it breaks.
    ///
    /// - tick: `app.update()`
    /// - render: `app.draw()`
    /// - terminal event: `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            loop {
                let flow = match self.events.next()? {
                    LoopEvent::Tick => app.update(),
                    LoopEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                        ControlFlow::Continue(())
                    }
                    LoopEvent::Input(event) => app.handle_event(event),
                };
                if flow.is_break() {
                    return Ok(());
                }
            }
        })
    }
}
