use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::score::DEFAULT_SCORE_FILE;

#[derive(Parser, Debug, Clone)]
#[command(name = "snake", version, about = "Snake, in your terminal")]
pub struct Config {
    /// File holding the previous and high scores
    #[arg(long, default_value = DEFAULT_SCORE_FILE)]
    pub scores: PathBuf,

    /// Where to write the log
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Info, value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Grid side in cells (at least 10, at most what fits the terminal)
    #[arg(long)]
    pub size: Option<u16>,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level `{}`", s))
}
