//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver feeds it raw ticks and turns; the renderer reads [`Snapshot`]s back.

pub mod collision;
pub mod config;
pub mod controller;
pub mod direction;
pub mod food;
pub mod grid;
pub mod progression;
pub mod snake;

// Re-export commonly used types
pub use collision::{CollisionEngine, CollisionType, Collisions};
pub use config::GameConfig;
pub use controller::{GameLoopController, GameState, Phase, Snapshot, StepReport, TickOutcome};
pub use direction::Direction;
pub use food::{Food, FoodKind, FoodSpawner, Tint};
pub use grid::{BOARD_COLS, BOARD_ROWS, CELL_SIZE, Cell};
pub use progression::ProgressionTracker;
pub use snake::{Segment, SnakeBody};
