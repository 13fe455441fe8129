use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use rltris_engine::{Action, Controller, EncodedState};

use crate::{
    model::PolicyModel,
    params::{LearningParams, LearningParamsError},
    policy::{Policy, PolicyKind},
    progress::{RewardSummary, RewardWindow},
    store::{ModelStore, ModelStoreError},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LearningError {
    #[display("invalid learning parameters")]
    Params(LearningParamsError),
    #[display("failed to load model")]
    Store(ModelStoreError),
    #[display("policy has {found} state features but the board encodes {expected}")]
    #[from(skip)]
    StateLenMismatch { expected: usize, found: usize },
}

/// Epsilon-greedy TD learner driving a board.
///
/// Every choice made while a piece falls is recorded in the episode
/// trajectory. When the piece locks, the terminal score is used as the reward
/// of every transition in that trajectory:
///
/// ```text
/// delta = reward + discount * Q(s', a') - Q(s, a)
/// Q(s, a) += learning_rate * delta
/// ```
///
/// Every `save_interval` episodes the reward window is logged and the model
/// is written to the attached store, if any.
#[derive(Debug)]
pub struct LearningController {
    params: LearningParams,
    policy: Policy,
    state_len: usize,
    trajectory: Vec<(EncodedState, Action)>,
    episodes: u64,
    rewards: RewardWindow,
    last_summary: Option<RewardSummary>,
    rng: Pcg64Mcg,
    store: Option<Box<dyn ModelStore>>,
}

impl LearningController {
    /// Creates a controller around `policy`, without a model store.
    ///
    /// `policy` must be sized for `state_len` features.
    pub fn new(
        params: LearningParams,
        policy: Policy,
        state_len: usize,
    ) -> Result<Self, LearningError> {
        params.validate()?;
        if let Some(found) = policy.mismatched_state_len(state_len) {
            return Err(LearningError::StateLenMismatch {
                expected: state_len,
                found,
            });
        }
        Ok(Self {
            params,
            policy,
            state_len,
            trajectory: vec![],
            episodes: 0,
            rewards: RewardWindow::new(),
            last_summary: None,
            rng: Pcg64Mcg::from_os_rng(),
            store: None,
        })
    }

    /// Loads the policy from `store`, or starts a zero-initialized `kind`
    /// policy when the store is empty.
    ///
    /// The store is kept for periodic saves.
    pub fn from_store(
        params: LearningParams,
        kind: PolicyKind,
        state_len: usize,
        store: Box<dyn ModelStore>,
    ) -> Result<Self, LearningError> {
        let (policy, episodes) = match store.load()? {
            Some(model) => {
                model.check_compatible(state_len)?;
                tracing::info!(
                    backend = %model.policy.kind(),
                    episodes = model.episodes,
                    trained_at = %model.trained_at,
                    "loaded model"
                );
                (model.policy, model.episodes)
            }
            None => {
                tracing::info!(backend = %kind, state_len, "no saved model, starting from zero");
                (Policy::new(kind, state_len), 0)
            }
        };
        let mut controller = Self::new(params, policy, state_len)?;
        controller.episodes = episodes;
        controller.store = Some(store);
        Ok(controller)
    }

    /// Reseeds the exploration RNG.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg64Mcg::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn params(&self) -> &LearningParams {
        &self.params
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Completed episodes, including those of a loaded model.
    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    #[must_use]
    pub fn trajectory(&self) -> &[(EncodedState, Action)] {
        &self.trajectory
    }

    /// Rewards of the window in progress.
    #[must_use]
    pub fn current_rewards(&self) -> Option<RewardSummary> {
        self.rewards.summary()
    }

    /// Summary of the last completed window.
    #[must_use]
    pub fn last_summary(&self) -> Option<RewardSummary> {
        self.last_summary
    }

    #[must_use]
    pub fn store(&self) -> Option<&dyn ModelStore> {
        self.store.as_deref()
    }

    #[must_use]
    pub fn to_model(&self) -> PolicyModel {
        PolicyModel::new(self.policy.clone(), self.state_len, self.episodes)
    }

    /// Writes the current policy to the store. Without a store this is a no-op.
    pub fn save(&mut self) -> Result<(), ModelStoreError> {
        let model = self.to_model();
        if let Some(store) = &mut self.store {
            store.save(&model)?;
        }
        Ok(())
    }

    fn learn_from_trajectory(&mut self, reward: f32) {
        let LearningParams {
            learning_rate,
            discount,
            ..
        } = self.params;
        for pair in self.trajectory.windows(2) {
            let ((state, action), (next_state, next_action)) = (&pair[0], &pair[1]);
            let target = reward + discount * self.policy.value(next_state, *next_action);
            let delta = target - self.policy.value(state, *action);
            self.policy.update(state, *action, learning_rate * delta);
        }
    }

    fn report_progress(&mut self) {
        self.last_summary = self.rewards.take();
        if let Some(summary) = self.last_summary {
            tracing::info!(
                episodes = self.episodes,
                window = summary.count,
                mean_reward = summary.mean,
                min_reward = summary.min,
                max_reward = summary.max,
                "training progress"
            );
        }
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "failed to save model");
        }
    }
}

impl Controller for LearningController {
    fn on_episode_start(&mut self) {
        self.trajectory.clear();
    }

    fn on_episode_end(&mut self, reward: f32, final_state: &EncodedState) {
        self.trajectory.push((final_state.clone(), Action::Drop));
        self.learn_from_trajectory(reward);

        self.episodes += 1;
        self.rewards.push(reward);
        if self.episodes.is_multiple_of(self.params.save_interval) {
            self.report_progress();
        }
    }

    fn choose_action(&mut self, state: &EncodedState) -> Action {
        let action = if self.rng.random::<f32>() < self.params.exploration_rate {
            Action::ALL[self.rng.random_range(0..Action::LEN)]
        } else {
            self.policy.greedy_action(state)
        };
        self.trajectory.push((state.clone(), action));
        action
    }
}
