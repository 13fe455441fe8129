use super::{action::Action, encoder::EncodedState};

/// Autonomous driver of a [`Board`](super::Board).
///
/// An episode is the lifetime of one piece. The board calls
/// [`on_episode_start`](Controller::on_episode_start) when a piece spawns,
/// [`choose_action`](Controller::choose_action) once per tick while the piece
/// falls, and [`on_episode_end`](Controller::on_episode_end) when it locks,
/// all synchronously from inside `Board::step`.
pub trait Controller {
    /// A new piece has spawned.
    fn on_episode_start(&mut self);

    /// The falling piece has locked.
    ///
    /// `reward` is the score of the grid right after the lock (before full
    /// rows are cleared) and `final_state` its encoding.
    fn on_episode_end(&mut self, reward: f32, final_state: &EncodedState);

    /// Picks the next action for the current encoded state.
    fn choose_action(&mut self, state: &EncodedState) -> Action;
}
