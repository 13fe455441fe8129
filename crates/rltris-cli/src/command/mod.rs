use std::path::PathBuf;

use clap::Parser;

use crate::logging;

mod play;

/// Falling-block puzzle game played by a learning agent or from the keyboard.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    play: play::PlayArg,
    /// Where log output goes while the terminal UI owns the screen
    #[clap(long, default_value = "rltris.log")]
    log_file: PathBuf,
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { play, log_file } = CommandArgs::parse();
    logging::init(&log_file)?;
    play::run(&play)
}
