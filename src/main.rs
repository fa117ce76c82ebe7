use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_game_ai::game::GameConfig;
use snake_game_ai::modes::{HeadlessMode, HumanMode, WatchMode};
use snake_game_ai::policy::{GreedyPolicy, Policy, RandomPolicy};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_game_ai")]
#[command(version, about = "Snake simulation for reinforcement-learning agents")]
struct Cli {
    /// How to drive the game
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Scripted driver for watch and headless modes
    #[arg(long, default_value = "greedy")]
    policy: PolicyKind,

    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Field height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Cell size in pixels
    #[arg(long)]
    block_size: Option<i32>,

    /// Maximum ticks per second when watching
    #[arg(long)]
    speed: Option<u32>,

    /// Seed for food placement and the scripted driver
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to play in headless mode
    #[arg(long, default_value = "10")]
    episodes: u32,

    /// Write logs to this file. Terminal modes log nowhere without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch the scripted driver play
    Watch,
    /// Run episodes without a display and log the results
    Headless,
}

#[derive(Clone, ValueEnum)]
enum PolicyKind {
    Greedy,
    Random,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }

    fn policy(&self) -> Box<dyn Policy> {
        match self.policy {
            PolicyKind::Greedy => Box::new(GreedyPolicy::new(self.seed)),
            PolicyKind::Random => Box::new(RandomPolicy::new(self.seed)),
        }
    }
}

/// Log to `log_file` if given. Otherwise headless mode logs to stdout and the
/// terminal modes, which own the screen, stay silent.
fn init_tracing(log_file: Option<&Path>, to_stdout: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if to_stdout => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
        None => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_file.as_deref(), matches!(cli.mode, Mode::Headless))?;

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config, cli.policy())?;
            watch_mode.run().await?;
        }
        Mode::Headless => {
            let mut headless_mode = HeadlessMode::new(config, cli.policy())?;
            headless_mode.run(cli.episodes)?;
        }
    }

    Ok(())
}
