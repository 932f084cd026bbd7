use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;
use grid_snake::storage::{JsonFileStore, paths};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid, in your terminal")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Where the best score is kept
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Where log records are written
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_hz = tick_rate;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = grid_snake::logging::init(cli.log_file.clone())?;
    log::info!("Logging to {:?}", log_file);

    let config = cli.game_config()?;
    let score_file = match &cli.score_file {
        Some(path) => path.clone(),
        None => paths::score_file_path()?,
    };
    let store = JsonFileStore::open(score_file);
    log::info!("Best score file {:?}", store.path());

    let mut human_mode = HumanMode::new(config, store)?;
    human_mode.run().await?;

    Ok(())
}
