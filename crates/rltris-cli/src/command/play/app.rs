use std::ops::ControlFlow;

use anyhow::Context as _;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui_runtime::{App, RenderMode, TickRate, Timing};
use rltris_engine::{Action, Board, Controller, InputEvent};
use rltris_learning::LearningController;

use crate::ui::widgets::{LearnerStatus, PlayDisplay};

const FPS: f64 = 60.0;
const FAST_FPS: f64 = 20.0;

#[derive(Debug, Clone, Copy)]
pub struct PlayOptions {
    pub quiet: bool,
    pub fast: bool,
    pub tick_rate: f64,
}

impl PlayOptions {
    /// Fast mode ticks unpaced and redraws at a lower fixed rate; quiet mode
    /// never draws.
    ///
    /// Fails if `tick_rate` has no usable period outside fast mode.
    pub fn timing(&self) -> anyhow::Result<Timing> {
        let tick = if self.fast {
            TickRate::Unpaced
        } else {
            TickRate::try_from_hz(self.tick_rate)
                .with_context(|| format!("Unusable tick rate: {}", self.tick_rate))?
        };
        let render = if self.quiet {
            RenderMode::Never
        } else if self.fast {
            RenderMode::interval_from_rate(FAST_FPS)
        } else {
            RenderMode::throttled_from_rate(FPS)
        };
        Ok(Timing { tick, render })
    }
}

/// Terminal app running one board, optionally driven by a learner.
///
/// Key presses are queued and handed to the board on the next tick.
#[derive(Debug)]
pub struct PlayApp {
    board: Board,
    learner: Option<LearningController>,
    fast: bool,
    pending: Vec<InputEvent>,
}

impl PlayApp {
    pub fn new(board: Board, learner: Option<LearningController>, fast: bool) -> Self {
        Self {
            board,
            learner,
            fast,
            pending: vec![],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_learner(self) -> Option<LearningController> {
        self.learner
    }

    fn learner_status(&self) -> Option<LearnerStatus> {
        self.learner.as_ref().map(|learner| LearnerStatus {
            episodes: learner.episodes(),
            exploration_rate: learner.params().exploration_rate,
            backend: learner.policy().kind(),
            rewards: learner
                .current_rewards()
                .or_else(|| learner.last_summary()),
        })
    }
}

impl App for PlayApp {
    fn handle_event(&mut self, event: Event) -> ControlFlow<()> {
        if let Some(key) = event.as_key_press_event()
            && let Some(input) = input_event(key)
        {
            self.pending.push(input);
        }
        ControlFlow::Continue(())
    }

    fn update(&mut self) -> ControlFlow<()> {
        let controller = self
            .learner
            .as_mut()
            .map(|learner| learner as &mut dyn Controller);
        let flow = self.board.step(&self.pending, controller);
        self.pending.clear();
        flow
    }

    fn draw(&self, frame: &mut Frame) {
        let display = PlayDisplay::new(&self.board, self.learner_status()).fast(self.fast);
        frame.render_widget(display, frame.area());
    }
}

/// Maps a key press to a board input.
fn input_event(key: KeyEvent) -> Option<InputEvent> {
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(InputEvent::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Some(InputEvent::Quit),
        KeyCode::Left | KeyCode::Char('a') => Action::Left,
        KeyCode::Right | KeyCode::Char('d') => Action::Right,
        KeyCode::Up | KeyCode::Char('w') => Action::Rotate,
        KeyCode::Down | KeyCode::Char(' ' | 's') => Action::Drop,
        _ => return None,
    };
    Some(InputEvent::Action(action))
}

#[cfg(test)]
mod tests {
    use rltris_engine::{BoardConfig, ShapeKind, ShapeSequence};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn manual_app() -> PlayApp {
        let config = BoardConfig {
            spawn_delay: 0,
            ..BoardConfig::default()
        };
        let board = Board::new(config, Box::new(ShapeSequence::new(vec![ShapeKind::T]))).unwrap();
        PlayApp::new(board, None, false)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            input_event(key(KeyCode::Left)),
            Some(InputEvent::Action(Action::Left))
        );
        assert_eq!(
            input_event(key(KeyCode::Char('d'))),
            Some(InputEvent::Action(Action::Right))
        );
        assert_eq!(
            input_event(key(KeyCode::Up)),
            Some(InputEvent::Action(Action::Rotate))
        );
        assert_eq!(
            input_event(key(KeyCode::Char(' '))),
            Some(InputEvent::Action(Action::Drop))
        );
        assert_eq!(input_event(key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            input_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(input_event(key(KeyCode::Char('c'))), None);
        assert_eq!(input_event(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_queued_keys_apply_on_next_tick() {
        let mut app = manual_app();
        assert!(app.update().is_continue());
        let spawned = *app.board().falling_piece().unwrap();

        assert!(app.handle_event(Event::Key(key(KeyCode::Right))).is_continue());
        assert_eq!(app.board().falling_piece(), Some(&spawned));
        assert!(app.update().is_continue());
        assert_eq!(app.board().falling_piece(), Some(&spawned.right()));
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_quit_key_breaks_on_next_tick() {
        let mut app = manual_app();
        assert!(app.handle_event(Event::Key(key(KeyCode::Char('q')))).is_continue());
        assert!(app.update().is_break());
    }

    #[test]
    fn test_timing() {
        let paced = PlayOptions {
            quiet: false,
            fast: false,
            tick_rate: 10.0,
        };
        assert_eq!(
            paced.timing().unwrap(),
            Timing {
                tick: TickRate::from_hz(10.0),
                render: RenderMode::throttled_from_rate(FPS),
            }
        );

        let unattended = PlayOptions {
            quiet: true,
            fast: true,
            ..paced
        };
        assert_eq!(
            unattended.timing().unwrap(),
            Timing {
                tick: TickRate::Unpaced,
                render: RenderMode::Never,
            }
        );
    }

    #[test]
    fn test_unusable_tick_rate_is_an_error() {
        for tick_rate in [0.0, -5.0, 1e-300, f64::NAN] {
            let options = PlayOptions {
                quiet: true,
                fast: false,
                tick_rate,
            };
            assert!(options.timing().is_err(), "{tick_rate}");
        }

        // The rate is not used when ticks are unpaced.
        let fast = PlayOptions {
            quiet: true,
            fast: true,
            tick_rate: 0.0,
        };
        assert!(fast.timing().is_ok());
    }
}
