pub mod board;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod render;
pub mod score;
pub mod snake;
pub mod term;

/// Grid coordinate component. Signed so that a step past the border never wraps.
pub type GridInt = i16;
pub type Coords = (GridInt, GridInt);

pub use board::{Board, Cell};
pub use food::Food;
pub use game::{GameState, SnakeGame, SpeedRamp, TickOutcome};
pub use input::{Command, InputSource, ScriptedInput};
pub use render::{Frame, RenderSink};
pub use score::{BadField, FileScoreStore, MemoryScoreStore, ScoreData, ScoreError, ScoreStore};
pub use snake::{Direction, MoveResult, Snake};
pub use term::TermManager;
