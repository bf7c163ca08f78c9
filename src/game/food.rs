//! Food kinds and random food placement.

use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::grid::{self, BOARD_COLS, BOARD_ROWS, Cell};
use super::snake::SnakeBody;

/// Default number of random draws before falling back to a free-cell scan
pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 64;

/// 0xRRGGBB colour applied to the snake after eating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tint(pub u32);

impl Tint {
    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Apple,
    Banana,
}

impl FoodKind {
    pub const ALL: [FoodKind; 2] = [FoodKind::Apple, FoodKind::Banana];

    pub fn tint(self) -> Tint {
        match self {
            FoodKind::Apple => Tint(0xff0000),
            FoodKind::Banana => Tint(0xffff00),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FoodKind::Apple => "apple",
            FoodKind::Banana => "banana",
        }
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
}

/// Places food on random cells not covered by the snake
pub struct FoodSpawner<R = rand::rngs::ThreadRng> {
    rng: R,
    max_attempts: u32,
}

impl FoodSpawner<rand::rngs::ThreadRng> {
    pub fn new(max_attempts: u32) -> Self {
        Self::with_rng(rand::thread_rng(), max_attempts)
    }
}

impl<R: Rng> FoodSpawner<R> {
    pub fn with_rng(rng: R, max_attempts: u32) -> Self {
        Self { rng, max_attempts }
    }

    /// Pick a free cell and a random kind.
    ///
    /// Tries `max_attempts` uniform draws first, then chooses uniformly among
    /// the remaining free cells. Returns `None` only when the snake covers the
    /// whole board.
    pub fn spawn(&mut self, snake: &SnakeBody) -> Option<Food> {
        let kind = FoodKind::ALL[self.rng.gen_range(0..FoodKind::ALL.len())];

        for _ in 0..self.max_attempts {
            let cell = Cell::new(
                self.rng.gen_range(0..BOARD_COLS),
                self.rng.gen_range(0..BOARD_ROWS),
            );
            if !snake.contains(cell) {
                return Some(Food { cell, kind });
            }
        }

        debug!(
            attempts = self.max_attempts,
            snake_len = snake.len(),
            "random food placement exhausted, scanning free cells"
        );

        match grid::all_cells()
            .filter(|cell| !snake.contains(*cell))
            .choose(&mut self.rng)
        {
            Some(cell) => Some(Food { cell, kind }),
            None => {
                warn!(snake_len = snake.len(), "no free cell left for food");
                None
            }
        }
    }
}
