use std::io;

use crate::board::Board;
use crate::snake::Direction;

pub const CONTROLS: &str = "W/A/S/D or arrow keys to move | P to pause | Q to quit";

/// One full screen's worth of game state.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub heading: Direction,
    pub score: u32,
    pub previous: u32,
    pub high: u32,
}

impl Frame<'_> {
    pub fn header(&self) -> String {
        format!("SNAKE  | Score: {} | Prev: {} | High: {}", self.score, self.previous, self.high)
    }
}

/// Something that can put frames and messages on screen.
pub trait RenderSink {
    /// Wipes the whole screen so the next frame is drawn from nothing.
    fn clear(&mut self) -> io::Result<()>;

    /// Draws a full frame in one pass.
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Shows a centered message box over whatever is on screen.
    fn show_message(&mut self, lines: &[String]) -> io::Result<()>;
}
