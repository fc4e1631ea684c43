use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use termvaders::sim::config::{ALIEN_STEP_PERIOD, GRID_HEIGHT, GRID_WIDTH};
use termvaders::sim::{Config, ConfigError};

use crate::logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Grid columns.
    #[arg(long, default_value_t = GRID_WIDTH)]
    pub width: usize,

    /// Grid rows.
    #[arg(long, default_value_t = GRID_HEIGHT)]
    pub height: usize,

    /// Milliseconds between simulation ticks.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Ticks between alien formation moves.
    #[arg(long, default_value_t = ALIEN_STEP_PERIOD)]
    pub alien_period: u32,

    /// Seed for alien fire, for repeatable games.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append log records to this file. Nothing is logged without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Targets allowed to log at debug/trace, e.g. "sim,input"
    #[arg(long)]
    pub debug_filter: Option<String>,
}

impl Args {
    pub fn config(&self) -> Result<Config, ConfigError> {
        let config = Config {
            width: self.width,
            height: self.height,
            alien_step_period: self.alien_period,
            ..Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn log_level(&self) -> LevelFilter {
        logging::parse_level(&self.log_level)
    }
}
