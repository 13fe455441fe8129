use crossterm::event::Event;

/// What the event loop wants the runtime to do next.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum LoopEvent {
    Tick,
    Render,
    Input(Event),
}
