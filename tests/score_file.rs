use std::fs;

use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;
use terminal_snake::{Board, FileScoreStore, GameState, ScoreData, ScoreStore, SnakeGame, TickOutcome};

#[test]
fn scores_survive_between_games() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("scores.txt");
    fs::write(&path, "7 12\n")?;

    let mut game = SnakeGame::new(Board::square(10), FileScoreStore::new(&path), StdRng::seed_from_u64(5));
    assert_eq!(game.previous_score(), 7);
    assert_eq!(game.high_score(), 12);

    while game.tick() != TickOutcome::Crashed {}
    assert_eq!(game.state(), GameState::GameOver);

    let expected = ScoreData { previous: game.score(), high: 12 };
    assert_eq!(FileScoreStore::new(&path).load()?, expected);
    assert_eq!(fs::read_to_string(&path)?, format!("{} 12\n", game.score()));
    Ok(())
}

#[test]
fn corrupt_file_starts_from_zero() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("scores.txt");
    fs::write(&path, "not a score")?;

    let game = SnakeGame::new(Board::square(10), FileScoreStore::new(&path), StdRng::seed_from_u64(5));
    assert_eq!(game.previous_score(), 0);
    assert_eq!(game.high_score(), 0);

    let (_, bad) = ScoreData::parse(&fs::read_to_string(&path)?);
    assert_eq!(
        bad.iter().map(|b| b.field).collect::<Vec<_>>(),
        vec!["previous score", "high score"]
    );
    Ok(())
}

#[test]
fn unwritable_store_does_not_stop_the_game() {
    let dir = tempdir().unwrap();
    // The directory itself cannot be written as a file.
    let mut game = SnakeGame::new(Board::square(10), FileScoreStore::new(dir.path()), StdRng::seed_from_u64(5));

    while game.tick() != TickOutcome::Crashed {}
    assert_eq!(game.state(), GameState::GameOver);
    game.restart();
    assert_eq!(game.state(), GameState::Playing);
}
