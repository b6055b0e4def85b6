use std::collections::VecDeque;

use rand::{seq::SliceRandom, Rng};

use crate::{Coords, GridInt};

/// Random draws tried before falling back to a scan of the free cells.
const RANDOM_ATTEMPTS: usize = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Food {
    position: Coords,
}

impl Food {
    pub fn at(position: Coords) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Places food on a uniformly random interior cell not covered by `body`.
    /// Returns `None` only when every interior cell is taken.
    pub fn spawn<R: Rng + ?Sized>(
        width: GridInt,
        height: GridInt,
        body: &VecDeque<Coords>,
        rng: &mut R,
    ) -> Option<Food> {
        if width < 3 || height < 3 {
            return None;
        }

        for _ in 0..RANDOM_ATTEMPTS {
            let pos = (rng.gen_range(1..width - 1), rng.gen_range(1..height - 1));
            if !body.contains(&pos) {
                return Some(Food::at(pos));
            }
        }

        let choices: Vec<Coords> = (1..height - 1)
            .flat_map(|y| (1..width - 1).map(move |x| (x, y)))
            .filter(|pos| !body.contains(pos))
            .collect();

        choices.choose(rng).copied().map(Food::at)
    }
}
