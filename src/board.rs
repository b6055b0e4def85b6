use log::warn;

use crate::food::Food;
use crate::snake::Snake;
use crate::{Coords, GridInt};

/// Smallest grid side the game will play on.
pub const MIN_SIDE: GridInt = 10;
/// Terminal rows kept free for the header and messages.
const RESERVED_ROWS: u16 = 6;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Border,
    Food,
    SnakeHead,
    SnakeBody,
}

/// Fixed-size playing field plus a per-tick render cache of its cells.
#[derive(Debug, Clone)]
pub struct Board {
    width: GridInt,
    height: GridInt,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: GridInt, height: GridInt) -> Self {
        let width = width.max(3);
        let height = height.max(3);
        let mut board = Board { width, height, cells: vec![Cell::Empty; width as usize * height as usize] };
        board.clear();
        board
    }

    pub fn square(side: GridInt) -> Self {
        Board::new(side, side)
    }

    /// Largest square grid that fits a terminal of `columns` x `rows`, given that
    /// each cell takes two columns.
    pub fn side_for_terminal(columns: u16, rows: u16) -> GridInt {
        let by_width = columns.saturating_sub(2) / 2;
        let by_height = rows.saturating_sub(RESERVED_ROWS);
        let side = by_width.min(by_height).min(GridInt::MAX as u16) as GridInt;
        side.max(MIN_SIDE)
    }

    /// Grid side for the run: `requested` if given, but never below `MIN_SIDE`
    /// and never larger than what fits the terminal.
    pub fn negotiate_side(requested: Option<u16>, columns: u16, rows: u16) -> GridInt {
        let fitted = Board::side_for_terminal(columns, rows);
        let Some(size) = requested else { return fitted };

        let side = (size.min(GridInt::MAX as u16) as GridInt).max(MIN_SIDE);
        if side > fitted {
            warn!("Grid side {} does not fit a {}x{} terminal, using {}", side, columns, rows, fitted);
            return fitted;
        }
        side
    }

    pub fn width(&self) -> GridInt {
        self.width
    }

    pub fn height(&self) -> GridInt {
        self.height
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    /// True iff `pos` lies strictly inside the border ring.
    pub fn is_inside(&self, pos: Coords) -> bool {
        pos.0 > 0 && pos.0 < self.width - 1 && pos.1 > 0 && pos.1 < self.height - 1
    }

    pub fn cell_at(&self, pos: Coords) -> Cell {
        match self.index(pos) {
            Some(i) => self.cells[i],
            None => Cell::Border,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Rebuilds every cell from the snake and food. Later writes win, so the
    /// snake covers food on the same cell.
    pub fn snapshot(&mut self, snake: &Snake, food: Option<&Food>) {
        self.clear();

        if let Some(food) = food {
            self.place(food.position(), Cell::Food);
        }

        for (i, pos) in snake.body().iter().enumerate() {
            let cell = if i == 0 { Cell::SnakeHead } else { Cell::SnakeBody };
            self.place(*pos, cell);
        }
    }

    fn clear(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let border = y == 0 || y == self.height - 1 || x == 0 || x == self.width - 1;
                self.cells[y as usize * self.width as usize + x as usize] =
                    if border { Cell::Border } else { Cell::Empty };
            }
        }
    }

    fn place(&mut self, pos: Coords, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    fn index(&self, (x, y): Coords) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    #[test]
    fn border_ring_is_outside() {
        let board = Board::square(10);
        for i in 0..10 {
            assert!(!board.is_inside((0, i)));
            assert!(!board.is_inside((9, i)));
            assert!(!board.is_inside((i, 0)));
            assert!(!board.is_inside((i, 9)));
        }
        assert!(board.is_inside((1, 1)));
        assert!(board.is_inside((8, 8)));
    }

    #[test]
    fn snapshot_draws_border_food_and_snake() {
        let mut board = Board::square(10);
        let snake = Snake::new((5, 5), 3, Direction::Right);
        board.snapshot(&snake, Some(&Food::at((2, 2))));

        assert_eq!(board.cell_at((0, 0)), Cell::Border);
        assert_eq!(board.cell_at((9, 4)), Cell::Border);
        assert_eq!(board.cell_at((2, 2)), Cell::Food);
        assert_eq!(board.cell_at((5, 5)), Cell::SnakeHead);
        assert_eq!(board.cell_at((4, 5)), Cell::SnakeBody);
        assert_eq!(board.cell_at((3, 5)), Cell::SnakeBody);
        assert_eq!(board.cell_at((6, 5)), Cell::Empty);
    }

    #[test]
    fn snake_overwrites_food() {
        let mut board = Board::square(10);
        let snake = Snake::new((5, 5), 3, Direction::Right);
        board.snapshot(&snake, Some(&Food::at((4, 5))));
        assert_eq!(board.cell_at((4, 5)), Cell::SnakeBody);
    }

    #[test]
    fn snapshot_is_rebuilt_from_scratch() {
        let mut board = Board::square(10);
        let mut snake = Snake::new((5, 5), 3, Direction::Right);
        board.snapshot(&snake, Some(&Food::at((2, 2))));
        snake.move_step();
        board.snapshot(&snake, None);

        assert_eq!(board.cell_at((3, 5)), Cell::Empty);
        assert_eq!(board.cell_at((2, 2)), Cell::Empty);
        assert_eq!(board.rows().count(), 10);
        assert!(board.rows().all(|row| row.len() == 10));
    }

    #[test]
    fn requested_side_is_bounded_by_terminal() {
        assert_eq!(Board::negotiate_side(None, 80, 24), 18);
        assert_eq!(Board::negotiate_side(Some(12), 80, 24), 12);
        assert_eq!(Board::negotiate_side(Some(200), 80, 24), 18);
        assert_eq!(Board::negotiate_side(Some(3), 80, 24), MIN_SIDE);
        assert_eq!(Board::negotiate_side(Some(u16::MAX), 200, 60), 54);
    }

    #[test]
    fn terminal_negotiation() {
        assert_eq!(Board::side_for_terminal(80, 24), 18);
        assert_eq!(Board::side_for_terminal(200, 60), 54);
        assert_eq!(Board::side_for_terminal(30, 24), 14);
        assert_eq!(Board::side_for_terminal(10, 5), MIN_SIDE);
        assert_eq!(Board::side_for_terminal(0, 0), MIN_SIDE);
    }
}
