use super::food::{Food, FoodKind};
use super::grid::{cell_to_pixel, pixel_bounds};
use super::snake::SnakeBody;

/// Type of terminal collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Everything the head ran into on one logical update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collisions {
    /// Kind of the food eaten, if the head landed on it
    pub eaten: Option<FoodKind>,
    /// Collision that ends the round
    pub terminal: Option<CollisionType>,
}

/// Classifies the post-advance snake against food, itself and the walls.
///
/// Checks run food first, then self, then wall. Food is the only non-terminal
/// result and may be reported together with a terminal one.
pub struct CollisionEngine;

impl CollisionEngine {
    pub fn check(snake: &SnakeBody, food: Option<&Food>) -> Collisions {
        let eaten = food
            .filter(|food| food.cell == snake.head())
            .map(|food| food.kind);

        let terminal = if Self::hits_self(snake) {
            Some(CollisionType::SelfCollision)
        } else if Self::hits_wall(snake) {
            Some(CollisionType::Wall)
        } else {
            None
        };

        Collisions { eaten, terminal }
    }

    fn hits_self(snake: &SnakeBody) -> bool {
        snake.collides_with_body(snake.head())
    }

    fn hits_wall(snake: &SnakeBody) -> bool {
        let (x, y) = cell_to_pixel(snake.head());
        let (min_x, max_x, min_y, max_y) = pixel_bounds();
        x < min_x || x >= max_x || y < min_y || y >= max_y
    }
}
