use std::{
    io::{self, stdout, Stdout, Write},
    thread::sleep,
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::board::Cell;
use crate::input::{Command, InputSource};
use crate::render::{Frame, RenderSink, CONTROLS};
use crate::snake::Direction;

/// Row of the terminal where the grid starts; the rows above hold the header.
const GRID_TOP: u16 = 2;

/// Owns the terminal for the lifetime of the game. The terminal is put back the
/// way it was found on `restore` or drop, whichever comes first.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn setup() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut term = TermManager { width, height, stdout: stdout(), active: true };

        execute!(term.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(term.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;

        Ok(term)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Blocks until a key is pressed. Returns the command it maps to, if any.
    pub fn read_key_blocking(&mut self) -> io::Result<Option<Command>> {
        loop {
            if let Event::Key(ev) = event::read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(key_command(&ev));
                }
            }
        }
    }

    fn draw_cell(&mut self, cell: Cell, heading: Direction) -> io::Result<()> {
        let (glyph, color) = match cell {
            Cell::Empty => ("  ", Color::Reset),
            Cell::Border => ("██", Color::Yellow),
            Cell::Food => ("()", Color::Red),
            Cell::SnakeBody => ("██", Color::Green),
            Cell::SnakeHead => (head_glyph(heading), Color::Green),
        };
        queue!(self.stdout, SetForegroundColor(color), Print(glyph))
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl InputSource for TermManager {
    fn poll(&mut self) -> io::Result<Vec<Command>> {
        let mut commands = vec![];

        while event::poll(Duration::ZERO)? {
            if let Event::Key(ev) = event::read()? {
                commands.extend(key_command(&ev));
            }
        }

        Ok(commands)
    }

    fn wait(&mut self, duration: Duration) {
        sleep(duration);
    }
}

impl RenderSink for TermManager {
    fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All))
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(frame.header()),
            cursor::MoveTo(0, 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(CONTROLS)
        )?;

        for (y, row) in frame.board.rows().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, GRID_TOP + y as u16))?;
            for &cell in row {
                self.draw_cell(cell, frame.heading)?;
            }
            queue!(self.stdout, ResetColor)?;
        }

        self.stdout.flush()
    }

    fn show_message(&mut self, lines: &[String]) -> io::Result<()> {
        let msg_height = lines.len() as u16 + 2;
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 4;
        let top_left = (
            (self.width / 2).saturating_sub(msg_width / 2),
            (self.height / 2).saturating_sub(msg_height / 2),
        );

        queue!(self.stdout, ResetColor)?;

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1 + i as u16 + 1), Print(padded_line))?;
        }

        self.stdout.flush()
    }
}

fn head_glyph(heading: Direction) -> &'static str {
    match heading {
        Direction::Up => "^^",
        Direction::Down => "vv",
        Direction::Left => "<<",
        Direction::Right | Direction::Idle => ">>",
    }
}

fn key_command(ev: &KeyEvent) -> Option<Command> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(ch) => Command::from_char(ch),
        KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Esc => Some(Command::Pause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        let press = |code, modifiers| KeyEvent::new(code, modifiers);

        assert_eq!(key_command(&press(KeyCode::Up, KeyModifiers::NONE)), Some(Command::Turn(Direction::Up)));
        assert_eq!(key_command(&press(KeyCode::Char('S'), KeyModifiers::SHIFT)), Some(Command::Turn(Direction::Down)));
        assert_eq!(key_command(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Command::Quit));
        assert_eq!(key_command(&press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(key_command(&press(KeyCode::Esc, KeyModifiers::NONE)), Some(Command::Pause));
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(key_command(&release), None);
    }
}
