use std::{
    io,
    time::{Duration, Instant, TryFromFloatSecsError},
};

use crossterm::event;

use crate::event::LoopEvent;

/// How often the app is ticked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TickRate {
    /// No ticks; the app only sees terminal events.
    #[default]
    Disabled,
    /// One tick per interval.
    Fixed(Duration),
    /// A tick on every loop iteration. Pending terminal input is drained
    /// before each tick so it is never starved.
    Unpaced,
}

impl TickRate {
    /// Creates `Fixed` from ticks per second.
    ///
    /// Panics if the rate is not positive or its period does not fit a
    /// [`Duration`]; see [`try_from_hz`](Self::try_from_hz).
    #[must_use]
    pub fn from_hz(rate: f64) -> Self {
        Self::Fixed(Duration::from_secs_f64(1.0 / rate))
    }

    /// Creates `Fixed` from ticks per second, failing for zero, negative,
    /// NaN or vanishingly small rates.
    pub fn try_from_hz(rate: f64) -> Result<Self, TryFromFloatSecsError> {
        Duration::try_from_secs_f64(1.0 / rate).map(Self::Fixed)
    }

    fn interval(self) -> Option<Duration> {
        match self {
            TickRate::Disabled => None,
            TickRate::Fixed(interval) => Some(interval),
            TickRate::Unpaced => Some(Duration::ZERO),
        }
    }
}

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Render at fixed intervals.
    Interval(Duration),
    /// Render after state changes (tick or terminal event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
    /// Never render.
    Never,
}

impl RenderMode {
    /// Creates `Interval` mode from frame rate (FPS).
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }

    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Decides whether the next event is a render, a tick or terminal input.
///
/// Renders are checked first, then ticks; otherwise the loop sleeps in
/// `poll` until the earliest deadline or the next terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_rate: TickRate, render_mode: RenderMode) -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: tick_rate.interval(),
            render_mode,
            last_tick: past_time,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Returns the next event, blocking until one is due.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if self.render_due(now) {
                self.last_render = now;
                self.dirty = false;
                return Ok(LoopEvent::Render);
            }

            if self.tick_due(now) {
                if event::poll(Duration::ZERO)? {
                    self.dirty = true;
                    return Ok(event::read()?.into());
                }
                self.last_tick = now;
                self.dirty = true;
                return Ok(LoopEvent::Tick);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn tick_due(&self, now: Instant) -> bool {
        self.tick_interval
            .is_some_and(|interval| now.duration_since(self.last_tick) >= interval)
    }

    fn render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
            RenderMode::Never => false,
        }
    }

    /// Time until the next tick or render is due; `None` waits for input only.
    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
            RenderMode::Never => None,
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
