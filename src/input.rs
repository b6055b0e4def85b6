use std::{collections::VecDeque, io, time::Duration};

use crate::snake::Direction;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Quit,
    Restart,
}

impl Command {
    /// Maps a letter key, ignoring case.
    pub fn from_char(ch: char) -> Option<Command> {
        match ch.to_ascii_uppercase() {
            'W' => Some(Command::Turn(Direction::Up)),
            'A' => Some(Command::Turn(Direction::Left)),
            'S' => Some(Command::Turn(Direction::Down)),
            'D' => Some(Command::Turn(Direction::Right)),
            'Q' => Some(Command::Quit),
            'P' => Some(Command::Pause),
            'R' => Some(Command::Restart),
            _ => None,
        }
    }
}

/// Non-blocking source of player commands.
pub trait InputSource {
    /// Returns every command available right now. Never blocks.
    fn poll(&mut self) -> io::Result<Vec<Command>>;

    /// Idles for `duration`. Frame pacing and the paused/game-over waits go through here.
    fn wait(&mut self, duration: Duration);
}

/// Decodes the raw bytes read during one poll cycle.
///
/// `ESC [ A/B/C/D` are the arrow keys. An escape whose follow bytes are not in
/// `bytes` is dropped; nothing is carried over to the next cycle.
pub fn decode(bytes: &[u8]) -> Vec<Command> {
    let mut commands = vec![];
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        i += 1;

        match byte {
            ESC => {
                let Some(&b1) = bytes.get(i) else { break };
                i += 1;
                if b1 != b'[' {
                    continue;
                }
                let Some(&b2) = bytes.get(i) else { break };
                i += 1;
                let dir = match b2 {
                    b'A' => Direction::Up,
                    b'B' => Direction::Down,
                    b'C' => Direction::Right,
                    b'D' => Direction::Left,
                    _ => continue,
                };
                commands.push(Command::Turn(dir));
            }
            CTRL_C => commands.push(Command::Quit),
            b if b.is_ascii_alphabetic() => {
                if let Some(cmd) = Command::from_char(b as char) {
                    commands.push(cmd);
                }
            }
            _ => {}
        }
    }

    commands
}

/// Replays a fixed byte script, one chunk per poll. Once the script runs out it
/// answers every poll with `Quit`. Waits are recorded instead of slept.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    chunks: VecDeque<Vec<u8>>,
    waits: Vec<Duration>,
}

impl ScriptedInput {
    pub fn new<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let chunks = chunks.into_iter().map(|c| c.as_ref().to_vec()).collect();
        ScriptedInput { chunks, waits: vec![] }
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<Vec<Command>> {
        Ok(match self.chunks.pop_front() {
            Some(chunk) => decode(&chunk),
            None => vec![Command::Quit],
        })
    }

    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}
