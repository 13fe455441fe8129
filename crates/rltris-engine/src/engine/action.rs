use serde::{Deserialize, Serialize};

/// Discrete action applied to the falling piece.
///
/// The declaration order is the enumeration order used to break ties when
/// several actions have the same value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Shift one column left.
    #[display("left")]
    Left,
    /// Shift one column right.
    #[display("right")]
    Right,
    /// Hard drop: move down until blocked, within the same tick.
    #[display("drop")]
    Drop,
    /// Rotate 90° about the pivot.
    #[display("rotate")]
    Rotate,
}

impl Action {
    /// Number of actions (4).
    pub const LEN: usize = 4;

    pub const ALL: [Action; Self::LEN] = [Action::Left, Action::Right, Action::Drop, Action::Rotate];

    /// Position of this action in [`Action::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Discrete event delivered by the input layer once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit/terminate request. `Board::step` reports "do not continue".
    Quit,
    /// Manual action on the falling piece.
    Action(Action),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_matches_enumeration_order() {
        for (i, action) in Action::ALL.into_iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_action_serialized_name() {
        assert_eq!(serde_json::to_string(&Action::Rotate).unwrap(), "\"rotate\"");
        assert_eq!(
            serde_json::from_str::<Action>("\"left\"").unwrap(),
            Action::Left
        );
        assert_eq!(Action::Drop.to_string(), "drop");
    }
}
