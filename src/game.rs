use std::{cmp::max, io, time::Duration};

use log::{debug, info, warn};
use rand::Rng;

use crate::board::Board;
use crate::food::Food;
use crate::input::{Command, InputSource};
use crate::render::{Frame, RenderSink};
use crate::score::{ScoreData, ScoreStore};
use crate::snake::{Direction, Snake, MIN_LENGTH};

pub const INITIAL_SNAKE_LENGTH: usize = MIN_LENGTH;
/// How often input is checked while paused or waiting on the game-over screen.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tick interval as a function of food eaten: one step faster every
/// `captures_per_step` captures, never faster than `floor_ms`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpeedRamp {
    pub initial_ms: u64,
    pub step_ms: u64,
    pub floor_ms: u64,
    pub captures_per_step: u32,
}

impl Default for SpeedRamp {
    fn default() -> Self {
        SpeedRamp { initial_ms: 140, step_ms: 8, floor_ms: 30, captures_per_step: 4 }
    }
}

impl SpeedRamp {
    pub fn initial(&self) -> Duration {
        Duration::from_millis(max(self.initial_ms, self.floor_ms))
    }

    pub fn interval_after(&self, captures: u32) -> Duration {
        let steps = (captures / self.captures_per_step.max(1)) as u64;
        let ms = self.initial_ms.saturating_sub(self.step_ms.saturating_mul(steps));
        Duration::from_millis(max(ms, self.floor_ms))
    }

    /// One step faster than `current`.
    pub fn next(&self, current: Duration) -> Duration {
        let ms = (current.as_millis() as u64).saturating_sub(self.step_ms);
        Duration::from_millis(max(ms, self.floor_ms))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing happened.
    Idle,
    Moved,
    Ate,
    Crashed,
    /// The snake ate and left no free cell for the next food.
    Won,
}

pub struct SnakeGame<S, R> {
    board: Board,
    snake: Snake,
    food: Option<Food>,
    state: GameState,
    score: u32,
    scores: ScoreData,
    ramp: SpeedRamp,
    tick_interval: Duration,
    apples_eaten: u32,
    running: bool,
    won: bool,
    store: S,
    rng: R,
}

impl<S: ScoreStore, R: Rng> SnakeGame<S, R> {
    pub fn new(board: Board, mut store: S, mut rng: R) -> Self {
        let scores = store.load_or_default();
        let ramp = SpeedRamp::default();
        let snake = Snake::new(board.center(), INITIAL_SNAKE_LENGTH, Direction::Right);
        let food = Food::spawn(board.width(), board.height(), snake.body(), &mut rng);

        SnakeGame {
            board,
            snake,
            food,
            state: GameState::Playing,
            score: 0,
            scores,
            ramp,
            tick_interval: ramp.initial(),
            apples_eaten: 0,
            running: true,
            won: false,
            store,
            rng,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high
    }

    pub fn previous_score(&self) -> u32 {
        self.scores.previous
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn apples_eaten(&self) -> u32 {
        self.apples_eaten
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handle_command(&mut self, cmd: Command) {
        match (self.state, cmd) {
            (_, Command::Quit) => self.quit(),
            (GameState::Playing, Command::Turn(dir)) => self.snake.set_direction(dir),
            (GameState::Playing, Command::Pause) => {
                info!("Paused at score {}", self.score);
                self.state = GameState::Paused;
            }
            (GameState::Paused, Command::Pause) => {
                info!("Resumed");
                self.state = GameState::Playing;
            }
            (GameState::GameOver, Command::Restart) => self.restart(),
            _ => {}
        }
    }

    /// Advances the game by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Playing || !self.running {
            return TickOutcome::Idle;
        }

        self.snake.move_step();
        let head = self.snake.head();

        if !self.board.is_inside(head) || self.snake.check_self_collision() {
            self.game_over(false);
            return TickOutcome::Crashed;
        }

        if self.food.map(|f| f.position()) != Some(head) {
            return TickOutcome::Moved;
        }

        // Growth is a flag, so at most one unit per tick. Food moves right away,
        // which keeps a second capture in the same tick impossible.
        self.snake.grow();
        self.score += 1;
        self.apples_eaten += 1;
        debug!("Ate food at {:?}, score {}", head, self.score);

        if self.apples_eaten >= self.ramp.captures_per_step {
            self.tick_interval = self.ramp.next(self.tick_interval);
            self.apples_eaten = 0;
            debug!("Tick interval now {:?}", self.tick_interval);
        }

        if self.score > self.scores.high {
            self.scores.high = self.score;
        }

        self.food = Food::spawn(self.board.width(), self.board.height(), self.snake.body(), &mut self.rng);
        if self.food.is_none() {
            self.game_over(true);
            return TickOutcome::Won;
        }

        TickOutcome::Ate
    }

    /// Starts a fresh round. Only the high and previous scores carry over.
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.board.center(), INITIAL_SNAKE_LENGTH, Direction::Right);
        self.food = Food::spawn(self.board.width(), self.board.height(), self.snake.body(), &mut self.rng);
        self.score = 0;
        self.tick_interval = self.ramp.initial();
        self.apples_eaten = 0;
        self.won = false;
        self.state = GameState::Playing;
        info!("Restarted");
    }

    /// Stops the run loop. The previous score is left alone; only a game over sets it.
    /// Quitting from the game-over screen writes nothing, the scores were saved on entry.
    pub fn quit(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!("Quit with score {}, high score {}", self.score, self.scores.high);
        if self.state != GameState::GameOver {
            self.persist();
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            board: &self.board,
            heading: self.snake.direction(),
            score: self.score,
            previous: self.scores.previous,
            high: self.scores.high,
        }
    }

    pub fn game_over_message(&self) -> Vec<String> {
        let title = if self.won { "You won!" } else { "GAME OVER!" };
        vec![
            title.to_string(),
            String::new(),
            format!("Final Score: {}", self.score),
            format!("High Score: {}", self.scores.high),
            format!("Previous Score: {}", self.scores.previous),
            String::new(),
            "Press R to restart or Q to quit".to_string(),
        ]
    }

    pub fn pause_message(&self) -> Vec<String> {
        vec!["Paused".to_string(), "Press P to resume".to_string(), "or Q to quit".to_string()]
    }

    /// Plays until the player quits.
    pub fn run<T: InputSource + RenderSink>(&mut self, term: &mut T) -> io::Result<()> {
        term.clear()?;
        self.render(term)?;

        while self.running {
            match self.state {
                GameState::Playing => self.play_step(term)?,
                GameState::Paused => self.paused_step(term)?,
                GameState::GameOver => self.game_over_step(term)?,
            }
        }

        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play_step<T: InputSource + RenderSink>(&mut self, term: &mut T) -> io::Result<()> {
        for cmd in term.poll()? {
            self.handle_command(cmd);
        }

        match self.state {
            _ if !self.running => return Ok(()),
            GameState::Paused => return term.show_message(&self.pause_message()),
            _ => {}
        }

        match self.tick() {
            TickOutcome::Crashed | TickOutcome::Won => {
                self.render(term)?;
                term.show_message(&self.game_over_message())
            }
            _ => {
                self.render(term)?;
                term.wait(self.tick_interval);
                Ok(())
            }
        }
    }

    fn paused_step<T: InputSource + RenderSink>(&mut self, term: &mut T) -> io::Result<()> {
        for cmd in term.poll()? {
            if matches!(cmd, Command::Pause | Command::Quit) {
                self.handle_command(cmd);
            }
        }
        self.after_wait(term)
    }

    fn game_over_step<T: InputSource + RenderSink>(&mut self, term: &mut T) -> io::Result<()> {
        for cmd in term.poll()? {
            self.handle_command(cmd);
            if self.state != GameState::GameOver {
                break;
            }
        }
        self.after_wait(term)
    }

    fn after_wait<T: InputSource + RenderSink>(&mut self, term: &mut T) -> io::Result<()> {
        if !self.running {
            return Ok(());
        }

        if self.state == GameState::Playing {
            term.clear()?;
            self.render(term)
        } else {
            term.wait(IDLE_POLL_INTERVAL);
            Ok(())
        }
    }

    fn render<T: RenderSink>(&mut self, term: &mut T) -> io::Result<()> {
        self.board.snapshot(&self.snake, self.food.as_ref());
        term.draw(&self.frame())
    }

    fn game_over(&mut self, won: bool) {
        self.state = GameState::GameOver;
        self.won = won;
        self.scores.previous = self.score;
        self.scores.high = max(self.scores.high, self.score);
        info!(
            "Game over ({}): score {}, high score {}",
            if won { "won" } else { "crashed" },
            self.score,
            self.scores.high
        );
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.scores) {
            warn!("{}", e);
        }
    }
}
