use std::collections::VecDeque;

use crate::{Coords, GridInt};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// No heading. A snake whose current direction is `Idle` does not move.
    Idle,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Idle => Direction::Idle,
        }
    }

    fn delta(self) -> (GridInt, GridInt) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Idle => (0, 0),
        }
    }
}

/// Shortest snake that can be built.
pub const MIN_LENGTH: usize = 3;

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Option<Coords> },
    Stalled,
}

/// The body is stored head-first.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coords>,
    current: Direction,
    pending: Direction,
    growing: bool,
}

impl Snake {
    /// Builds a straight snake whose head sits at `head`, with the rest of the
    /// body trailing behind it. An `Idle` snake is laid out as if facing right.
    /// `size` is clamped to at least `MIN_LENGTH`.
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let diff = match direction {
            Direction::Idle => Direction::Right.delta(),
            dir => dir.delta(),
        };

        let body = (0..size.clamp(MIN_LENGTH, GridInt::MAX as usize) as GridInt)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();

        Snake { body, current: direction, pending: direction, growing: false }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.current
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Queues a turn for the next move. Reversing onto the neck is ignored, as is
    /// `Idle`, which carries no change.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction == Direction::Idle || new_direction == self.current.opposite() {
            return;
        }
        self.pending = new_direction;
    }

    pub fn move_step(&mut self) -> MoveResult {
        self.current = self.pending;
        if self.current == Direction::Idle {
            return MoveResult::Stalled;
        }

        let (dx, dy) = self.current.delta();
        let old_head = self.head();
        let new_head = (old_head.0 + dx, old_head.1 + dy);

        self.body.push_front(new_head);

        if self.growing {
            self.growing = false;
            MoveResult::Moved { new_head, old_tail: None }
        } else {
            let old_tail = self.body.pop_back();
            MoveResult::Moved { new_head, old_tail }
        }
    }

    /// Grows by one cell on the next move. Growth requests do not stack.
    pub fn grow(&mut self) {
        self.growing = true;
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|pos| *pos == head)
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }
}
