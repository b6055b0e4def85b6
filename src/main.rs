use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use simplelog::{Config as LogConfig, WriteLogger};

use terminal_snake::board::Board;
use terminal_snake::config::Config;
use terminal_snake::input::Command;
use terminal_snake::render::RenderSink;
use terminal_snake::score::{FileScoreStore, ScoreStore};
use terminal_snake::{SnakeGame, TermManager};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    let mut term = TermManager::setup().context("could not set up the terminal")?;

    let (columns, rows) = term.size();
    let side = Board::negotiate_side(config.size, columns, rows);

    let mut store = FileScoreStore::new(&config.scores);
    let saved = store.load_or_default();
    info!("Starting on a {}x{} board, high score {}", side, side, saved.high);

    if !show_intro(&mut term, saved.high)? {
        return farewell(term, &config);
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = SnakeGame::new(Board::square(side), store, rng);
    game.run(&mut term)?;

    farewell(term, &config)
}

fn init_logging(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("could not create log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, LogConfig::default(), file).context("could not start logging")?;
    Ok(())
}

/// Returns false if the player chose to quit instead of starting.
fn show_intro(term: &mut TermManager, high_score: u32) -> Result<bool> {
    let lines = [
        "WELCOME TO SNAKE".to_string(),
        String::new(),
        format!("Saved high score: {}", high_score),
        String::new(),
        "W/A/S/D or arrow keys to move".to_string(),
        "Eat the () to grow and score".to_string(),
        "Speed increases after every 4 apples".to_string(),
        "Avoid the walls and yourself".to_string(),
        "P to pause, Q to quit".to_string(),
        String::new(),
        "Press any key to start".to_string(),
    ];

    term.show_message(&lines)?;
    Ok(term.read_key_blocking()? != Some(Command::Quit))
}

fn farewell(mut term: TermManager, config: &Config) -> Result<()> {
    term.restore().context("could not restore the terminal")?;
    info!("Exiting");
    println!("Thank you for playing! Your scores are saved to {}", config.scores.display());
    Ok(())
}
