use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::game::GameConfig;
use snake_arcade::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic arcade snake in the terminal")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raw ticks per second (the snake moves every 11 - level ticks)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    frame_rate: Option<u32>,

    /// Where to keep the local highscore list
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "snake_arcade.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(frame_rate) = cli.frame_rate {
        config.frame_rate = frame_rate;
    }
    if let Some(path) = cli.leaderboard {
        config.leaderboard_path = path;
    }

    tracing::info!(?config, "starting snake");

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
