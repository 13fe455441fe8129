use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{policy::Policy, store::ModelStoreError};

/// Persisted form of a learned policy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PolicyModel {
    pub version: u32,
    pub trained_at: DateTime<Utc>,
    /// Episodes the policy was trained for.
    pub episodes: u64,
    /// Length of the encoded state the policy was trained on.
    pub state_len: usize,
    pub policy: Policy,
}

impl PolicyModel {
    pub const CURRENT_VERSION: u32 = 1;

    /// Wraps `policy` in a model stamped with the current time.
    #[must_use]
    pub fn new(policy: Policy, state_len: usize, episodes: u64) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            trained_at: Utc::now(),
            episodes,
            state_len,
            policy,
        }
    }

    /// Checks that the model can drive a board whose encoded state has
    /// `state_len` features.
    pub fn check_compatible(&self, state_len: usize) -> Result<(), ModelStoreError> {
        if self.version != Self::CURRENT_VERSION {
            return Err(ModelStoreError::UnsupportedVersion {
                found: self.version,
                expected: Self::CURRENT_VERSION,
            });
        }
        let found = Some(self.state_len)
            .filter(|&len| len != state_len)
            .or_else(|| self.policy.mismatched_state_len(state_len));
        if let Some(found) = found {
            return Err(ModelStoreError::ShapeMismatch {
                expected: state_len,
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyKind;

    #[test]
    fn test_schema_fields() {
        let model = PolicyModel::new(Policy::new(PolicyKind::Linear, 2), 2, 7);
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["episodes"], 7);
        assert_eq!(json["state_len"], 2);
        assert_eq!(json["policy"]["backend"], "linear");
        assert!(json["trained_at"].is_string());

        let back: PolicyModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn test_check_compatible() {
        let model = PolicyModel::new(Policy::new(PolicyKind::Linear, 4), 4, 0);
        assert!(model.check_compatible(4).is_ok());
        assert!(matches!(
            model.check_compatible(6),
            Err(ModelStoreError::ShapeMismatch {
                expected: 6,
                found: 4
            })
        ));

        // Header and weights disagree.
        let lying = PolicyModel {
            state_len: 6,
            ..model.clone()
        };
        assert!(matches!(
            lying.check_compatible(6),
            Err(ModelStoreError::ShapeMismatch {
                expected: 6,
                found: 4
            })
        ));

        let future = PolicyModel {
            version: 99,
            ..model
        };
        assert!(matches!(
            future.check_compatible(4),
            Err(ModelStoreError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
