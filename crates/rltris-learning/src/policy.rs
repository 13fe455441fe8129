use std::collections::BTreeMap;

use rltris_engine::{Action, EncodedState};
use serde::{Deserialize, Serialize};

/// Which action-value backend a [`Policy`] uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Dense weight vector per action.
    #[default]
    #[display("linear")]
    Linear,
    /// Sparse table keyed by encoded state.
    #[display("tabular")]
    Tabular,
}

/// Action-value function `Q(state, action)` learned by the controller.
///
/// Both backends expose the same two operations: read a value, and nudge the
/// value of one `(state, action)` pair by a step computed from the TD error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "backend", content = "values", rename_all = "lowercase")]
pub enum Policy {
    Linear(LinearPolicy),
    Tabular(TabularPolicy),
}

impl Policy {
    /// Creates a zero-initialized policy for states of length `state_len`.
    #[must_use]
    pub fn new(kind: PolicyKind, state_len: usize) -> Self {
        match kind {
            PolicyKind::Linear => Policy::Linear(LinearPolicy::zeros(state_len)),
            PolicyKind::Tabular => Policy::Tabular(TabularPolicy::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Linear(_) => PolicyKind::Linear,
            Policy::Tabular(_) => PolicyKind::Tabular,
        }
    }

    #[must_use]
    pub fn value(&self, state: &EncodedState, action: Action) -> f32 {
        match self {
            Policy::Linear(policy) => policy.value(state, action),
            Policy::Tabular(policy) => policy.value(state, action),
        }
    }

    /// Returns the action with the highest value.
    ///
    /// Ties go to the action that comes first in [`Action::ALL`].
    #[must_use]
    pub fn greedy_action(&self, state: &EncodedState) -> Action {
        let mut best = (Action::ALL[0], self.value(state, Action::ALL[0]));
        for action in &Action::ALL[1..] {
            let value = self.value(state, *action);
            if value > best.1 {
                best = (*action, value);
            }
        }
        best.0
    }

    /// Moves `Q(state, action)` by `step` (the learning rate times the TD error).
    pub fn update(&mut self, state: &EncodedState, action: Action, step: f32) {
        match self {
            Policy::Linear(policy) => policy.update(state, action, step),
            Policy::Tabular(policy) => policy.update(state, action, step),
        }
    }

    /// Returns the first state length found in the policy that differs from
    /// `state_len`, if any.
    #[must_use]
    pub fn mismatched_state_len(&self, state_len: usize) -> Option<usize> {
        match self {
            Policy::Linear(policy) => {
                Some(policy.state_len()).filter(|&len| len != state_len)
            }
            Policy::Tabular(policy) => policy
                .table
                .keys()
                .map(EncodedState::len)
                .find(|&len| len != state_len),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LinearPolicyError {
    #[display("missing weights for action '{action}'")]
    MissingAction { action: Action },
    #[display("weights for action '{action}' have length {found}, expected {expected}")]
    LengthMismatch {
        action: Action,
        expected: usize,
        found: usize,
    },
}

/// Linear value function with one weight per encoded cell, per action.
///
/// `Q(s, a) = Σ weights[a][i] * s[i]`. Serialized as a map from action name
/// to weight vector.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(
    try_from = "BTreeMap<Action, Vec<f32>>",
    into = "BTreeMap<Action, Vec<f32>>"
)]
pub struct LinearPolicy {
    weights: [Vec<f32>; Action::LEN],
}

impl LinearPolicy {
    #[must_use]
    pub fn zeros(state_len: usize) -> Self {
        Self {
            weights: std::array::from_fn(|_| vec![0.0; state_len]),
        }
    }

    /// Builds a policy from explicit weight vectors, indexed like [`Action::ALL`].
    pub fn from_weights(weights: [Vec<f32>; Action::LEN]) -> Result<Self, LinearPolicyError> {
        let expected = weights[0].len();
        for action in Action::ALL {
            let found = weights[action.index()].len();
            if found != expected {
                return Err(LinearPolicyError::LengthMismatch {
                    action,
                    expected,
                    found,
                });
            }
        }
        Ok(Self { weights })
    }

    #[must_use]
    pub fn state_len(&self) -> usize {
        self.weights[0].len()
    }

    #[must_use]
    pub fn weights(&self, action: Action) -> &[f32] {
        &self.weights[action.index()]
    }

    #[must_use]
    pub fn value(&self, state: &EncodedState, action: Action) -> f32 {
        state.dot(self.weights(action))
    }

    /// `weights[action][i] += step * state[i]` for every feature `i`.
    pub fn update(&mut self, state: &EncodedState, action: Action, step: f32) {
        let weights = &mut self.weights[action.index()];
        for (w, s) in weights.iter_mut().zip(state.features()) {
            *w += step * s;
        }
    }
}

impl TryFrom<BTreeMap<Action, Vec<f32>>> for LinearPolicy {
    type Error = LinearPolicyError;

    fn try_from(mut map: BTreeMap<Action, Vec<f32>>) -> Result<Self, Self::Error> {
        let mut weights: [Vec<f32>; Action::LEN] = Default::default();
        for action in Action::ALL {
            weights[action.index()] = map
                .remove(&action)
                .ok_or(LinearPolicyError::MissingAction { action })?;
        }
        Self::from_weights(weights)
    }
}

impl From<LinearPolicy> for BTreeMap<Action, Vec<f32>> {
    fn from(policy: LinearPolicy) -> Self {
        Action::ALL.into_iter().zip(policy.weights).collect()
    }
}

/// Lookup table of action values keyed by encoded state.
///
/// Unseen `(state, action)` pairs read as `0.0`. Serialized as a list of
/// `{ state, values }` entries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "Vec<TabularEntry>", into = "Vec<TabularEntry>")]
pub struct TabularPolicy {
    table: BTreeMap<EncodedState, [f32; Action::LEN]>,
}

/// Serialized form of one [`TabularPolicy`] row. Missing actions read as `0.0`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TabularEntry {
    pub state: EncodedState,
    pub values: BTreeMap<Action, f32>,
}

impl TabularPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states with at least one stored value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[must_use]
    pub fn value(&self, state: &EncodedState, action: Action) -> f32 {
        self.table
            .get(state)
            .map_or(0.0, |values| values[action.index()])
    }

    pub fn update(&mut self, state: &EncodedState, action: Action, step: f32) {
        let values = self
            .table
            .entry(state.clone())
            .or_insert([0.0; Action::LEN]);
        values[action.index()] += step;
    }
}

impl From<Vec<TabularEntry>> for TabularPolicy {
    fn from(entries: Vec<TabularEntry>) -> Self {
        let table = entries
            .into_iter()
            .map(|entry| {
                let mut values = [0.0; Action::LEN];
                for (action, value) in entry.values {
                    values[action.index()] = value;
                }
                (entry.state, values)
            })
            .collect();
        Self { table }
    }
}

impl From<TabularPolicy> for Vec<TabularEntry> {
    fn from(policy: TabularPolicy) -> Self {
        policy
            .table
            .into_iter()
            .map(|(state, values)| TabularEntry {
                state,
                values: Action::ALL.into_iter().zip(values).collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(bits: &str) -> EncodedState {
        bits.parse().unwrap()
    }

    #[test]
    fn test_linear_value_is_dot_product() {
        let policy = LinearPolicy::from_weights([
            vec![1.0, 2.0, 3.0],
            vec![0.0; 3],
            vec![-1.0, 0.5, 0.0],
            vec![0.0; 3],
        ])
        .unwrap();
        let s = state("101");
        assert!((policy.value(&s, Action::Left) - 4.0).abs() < f32::EPSILON);
        assert!((policy.value(&s, Action::Drop) - -1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_greedy_action_breaks_ties_by_enumeration_order() {
        let policy = Policy::Linear(
            LinearPolicy::from_weights([
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 5.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ])
            .unwrap(),
        );
        // Right and Rotate both score 1.0; Drop's weight sits on an empty cell.
        assert_eq!(policy.greedy_action(&state("101")), Action::Right);
        assert_eq!(policy.greedy_action(&state("010")), Action::Drop);
        // All zero: the first action wins.
        assert_eq!(policy.greedy_action(&state("000")), Action::Left);
    }

    #[test]
    fn test_linear_update_touches_active_features_only() {
        let mut policy = LinearPolicy::zeros(3);
        policy.update(&state("110"), Action::Rotate, 0.5);
        assert_eq!(policy.weights(Action::Rotate), &[0.5, 0.5, 0.0]);
        assert_eq!(policy.weights(Action::Left), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_weights_rejects_ragged_vectors() {
        let err = LinearPolicy::from_weights([vec![0.0; 2], vec![0.0; 2], vec![0.0; 3], vec![0.0; 2]])
            .unwrap_err();
        assert_eq!(
            err,
            LinearPolicyError::LengthMismatch {
                action: Action::Drop,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_tabular_defaults_to_zero() {
        let mut policy = TabularPolicy::new();
        let s = state("0110");
        assert!(policy.value(&s, Action::Left).abs() < f32::EPSILON);
        policy.update(&s, Action::Left, 0.25);
        policy.update(&s, Action::Left, 0.25);
        assert!((policy.value(&s, Action::Left) - 0.5).abs() < f32::EPSILON);
        assert!(policy.value(&state("0000"), Action::Left).abs() < f32::EPSILON);
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn test_linear_serializes_as_action_map() {
        let mut policy = LinearPolicy::zeros(2);
        policy.update(&state("10"), Action::Right, 1.5);
        let json = serde_json::to_value(Policy::Linear(policy.clone())).unwrap();
        assert_eq!(json["backend"], "linear");
        assert_eq!(json["values"]["right"], serde_json::json!([1.5, 0.0]));
        assert_eq!(json["values"]["left"], serde_json::json!([0.0, 0.0]));

        let back: Policy = serde_json::from_value(json).unwrap();
        assert_eq!(back, Policy::Linear(policy));
    }

    #[test]
    fn test_linear_deserialize_requires_every_action() {
        let json = r#"{"backend":"linear","values":{"left":[0.0],"right":[0.0],"drop":[0.0]}}"#;
        let err = serde_json::from_str::<Policy>(json).unwrap_err();
        assert!(err.to_string().contains("rotate"), "{err}");
    }

    #[test]
    fn test_tabular_serializes_as_entries() {
        let mut policy = TabularPolicy::new();
        policy.update(&state("01"), Action::Drop, 2.0);
        let json = serde_json::to_value(Policy::Tabular(policy.clone())).unwrap();
        assert_eq!(json["backend"], "tabular");
        assert_eq!(json["values"][0]["state"], "01");
        assert_eq!(json["values"][0]["values"]["drop"], 2.0);

        let back: Policy = serde_json::from_value(json).unwrap();
        assert_eq!(back, Policy::Tabular(policy));
    }

    #[test]
    fn test_mismatched_state_len() {
        assert_eq!(Policy::new(PolicyKind::Linear, 4).mismatched_state_len(4), None);
        assert_eq!(Policy::new(PolicyKind::Linear, 4).mismatched_state_len(5), Some(4));

        let mut tabular = TabularPolicy::new();
        tabular.update(&state("010"), Action::Left, 1.0);
        let policy = Policy::Tabular(tabular);
        assert_eq!(policy.mismatched_state_len(3), None);
        assert_eq!(policy.mismatched_state_len(4), Some(3));
    }
}
