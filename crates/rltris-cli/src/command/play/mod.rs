use std::path::PathBuf;

use anyhow::Context as _;
use ratatui_runtime::Runtime;
use rltris_engine::{Board, BoardConfig};
use rltris_learning::{JsonFileStore, LearningController, LearningParams, PolicyKind};

use self::app::{PlayApp, PlayOptions};

mod app;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum PolicyArg {
    /// One weight vector per action
    Linear,
    /// Value table keyed by encoded state
    Tabular,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Linear => PolicyKind::Linear,
            PolicyArg::Tabular => PolicyKind::Tabular,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Skip rendering (keys are still read)
    #[clap(short, long)]
    quiet: bool,
    /// Tick as fast as possible instead of at the tick rate
    #[clap(short, long)]
    fast: bool,
    /// Play from the keyboard only, without the learning agent
    #[clap(long)]
    manual: bool,
    /// Model file loaded at startup and saved periodically and on exit
    #[clap(long, default_value = "rltris-model.json")]
    model: PathBuf,
    /// Policy backend used when no model file exists yet
    #[clap(long, value_enum, default_value_t = PolicyArg::Linear)]
    policy: PolicyArg,
    /// Probability of a random action
    #[clap(long, default_value_t = LearningParams::default().exploration_rate)]
    exploration_rate: f32,
    /// Step size of the TD update
    #[clap(long, default_value_t = LearningParams::default().learning_rate)]
    learning_rate: f32,
    /// Weight of the next state's value in the TD target
    #[clap(long, default_value_t = LearningParams::default().discount)]
    discount: f32,
    /// Episodes (locked pieces) between model saves
    #[clap(long, default_value_t = LearningParams::default().save_interval)]
    save_interval: u64,
    /// Seed for piece order and exploration
    #[clap(long)]
    seed: Option<u64>,
    /// Ticks per second when not in fast mode
    #[clap(long, default_value_t = 60.0)]
    tick_rate: f64,
}

impl PlayArg {
    fn learning_params(&self) -> LearningParams {
        LearningParams {
            exploration_rate: self.exploration_rate,
            learning_rate: self.learning_rate,
            discount: self.discount,
            save_interval: self.save_interval,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        quiet,
        fast,
        manual,
        model,
        policy,
        seed,
        tick_rate,
        ..
    } = arg;

    let timing = PlayOptions {
        quiet: *quiet,
        fast: *fast,
        tick_rate: *tick_rate,
    }
    .timing()?;

    let config = BoardConfig::default();
    let board =
        Board::with_random_shapes(config, *seed).context("Invalid board configuration")?;

    let learner = if *manual {
        None
    } else {
        let store = JsonFileStore::new(model);
        let learner = LearningController::from_store(
            arg.learning_params(),
            (*policy).into(),
            config.encoded_len(),
            Box::new(store),
        )
        .with_context(|| format!("Failed to set up learner with model {}", model.display()))?;
        Some(match seed {
            Some(seed) => learner.with_seed(*seed),
            None => learner,
        })
    };

    tracing::info!(quiet, fast, manual, "starting game");
    let mut app = PlayApp::new(board, learner, *fast);
    Runtime::new(timing)
        .run(&mut app)
        .context("Terminal I/O failed")?;

    let stats = app.board().stats();
    tracing::info!(
        ticks = stats.ticks(),
        locked_pieces = stats.locked_pieces(),
        cleared_lines = stats.total_cleared_lines(),
        losses = stats.losses(),
        "game finished"
    );

    if let Some(mut learner) = app.into_learner() {
        match learner.save() {
            Ok(()) => eprintln!("Saved model to {}", model.display()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save model on exit");
                eprintln!("Warning: {e}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::command::CommandArgs;

    fn parse(args: &[&str]) -> PlayArg {
        CommandArgs::try_parse_from(args).unwrap().play
    }

    #[test]
    fn test_defaults() {
        let arg = parse(&["rltris"]);
        assert!(!arg.quiet);
        assert!(!arg.fast);
        assert!(!arg.manual);
        assert_eq!(arg.model, PathBuf::from("rltris-model.json"));
        assert_eq!(arg.policy, PolicyArg::Linear);
        assert_eq!(arg.learning_params(), LearningParams::default());
        assert_eq!(arg.seed, None);
    }

    #[test]
    fn test_short_flags() {
        let arg = parse(&["rltris", "-q", "-f"]);
        assert!(arg.quiet);
        assert!(arg.fast);
    }

    #[test]
    fn test_learning_options() {
        let arg = parse(&[
            "rltris",
            "--policy",
            "tabular",
            "--exploration-rate",
            "0.5",
            "--save-interval",
            "10",
            "--seed",
            "7",
        ]);
        assert_eq!(PolicyKind::from(arg.policy), PolicyKind::Tabular);
        assert!((arg.learning_params().exploration_rate - 0.5).abs() < f32::EPSILON);
        assert_eq!(arg.learning_params().save_interval, 10);
        assert_eq!(arg.seed, Some(7));
    }
}
