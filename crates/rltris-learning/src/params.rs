/// Hyper-parameters of the learning controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningParams {
    /// Probability of picking a uniformly random action instead of the greedy one.
    pub exploration_rate: f32,
    /// Step size of the TD update.
    pub learning_rate: f32,
    /// Weight of the next state's value in the TD target.
    pub discount: f32,
    /// Episodes between periodic saves and progress logs.
    pub save_interval: u64,
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            exploration_rate: 0.1,
            learning_rate: 0.001,
            discount: 0.9,
            save_interval: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum LearningParamsError {
    #[display("exploration rate must be in [0, 1], got {value}")]
    ExplorationRateOutOfRange { value: f32 },
    #[display("discount must be in [0, 1], got {value}")]
    DiscountOutOfRange { value: f32 },
    #[display("learning rate must be positive, got {value}")]
    NonPositiveLearningRate { value: f32 },
    #[display("save interval must be at least one episode")]
    ZeroSaveInterval,
}

impl LearningParams {
    pub fn validate(&self) -> Result<(), LearningParamsError> {
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(LearningParamsError::ExplorationRateOutOfRange {
                value: self.exploration_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(LearningParamsError::DiscountOutOfRange {
                value: self.discount,
            });
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(LearningParamsError::NonPositiveLearningRate {
                value: self.learning_rate,
            });
        }
        if self.save_interval == 0 {
            return Err(LearningParamsError::ZeroSaveInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(LearningParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let base = LearningParams::default();
        assert!(matches!(
            LearningParams {
                exploration_rate: 1.5,
                ..base
            }
            .validate(),
            Err(LearningParamsError::ExplorationRateOutOfRange { .. })
        ));
        assert!(matches!(
            LearningParams {
                discount: -0.1,
                ..base
            }
            .validate(),
            Err(LearningParamsError::DiscountOutOfRange { .. })
        ));
        assert!(matches!(
            LearningParams {
                learning_rate: 0.0,
                ..base
            }
            .validate(),
            Err(LearningParamsError::NonPositiveLearningRate { .. })
        ));
        assert!(matches!(
            LearningParams {
                learning_rate: f32::NAN,
                ..base
            }
            .validate(),
            Err(LearningParamsError::NonPositiveLearningRate { .. })
        ));
        assert_eq!(
            LearningParams {
                save_interval: 0,
                ..base
            }
            .validate(),
            Err(LearningParamsError::ZeroSaveInterval)
        );
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let params = LearningParams {
            exploration_rate: 0.0,
            discount: 1.0,
            ..LearningParams::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }
}
