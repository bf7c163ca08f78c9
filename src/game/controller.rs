//! The Idle -> Playing -> GameOver state machine driven by raw ticks.
//!
//! A driver calls [`GameLoopController::tick`] at a fixed rate. Every
//! `tick_rate()` raw ticks the controller runs one logical update: apply the
//! buffered direction, advance the snake, classify collisions, then apply
//! growth and scoring. A terminal collision ends the round and hands the final
//! score back through the tick outcome.
//!
//! When food is eaten on the same update the snake dies, the food still counts:
//! the score is incremented first and the reported final score includes it.

use rand::Rng;
use tracing::{debug, info};

use super::collision::{CollisionEngine, CollisionType};
use super::config::GameConfig;
use super::direction::Direction;
use super::food::{Food, FoodKind, FoodSpawner};
use super::grid::Cell;
use super::progression::ProgressionTracker;
use super::snake::{Segment, SnakeBody};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first start signal
    Idle,
    Playing,
    /// Round finished, waiting for a restart signal
    GameOver,
}

/// State of a round in progress
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    snake: SnakeBody,
    food: Option<Food>,
    progress: ProgressionTracker,
}

impl GameState {
    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn progress(&self) -> &ProgressionTracker {
        &self.progress
    }
}

/// What one logical update did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Cell the tail left; holds the new segment when the snake grew
    pub vacated: Cell,
    /// Whether this advance lengthened the snake
    pub grew: bool,
    /// Food eaten on this update
    pub eaten: Option<FoodKind>,
}

/// Result of a raw tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Inactive,
    /// Playing, but no logical update was due
    Waiting,
    Advanced(StepReport),
    /// The round just ended
    GameOver {
        final_score: u32,
        cause: CollisionType,
    },
}

/// Read-only view handed to the renderer after each tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    /// Tail to head
    pub segments: Vec<Segment>,
    pub food: Option<Food>,
    pub score: u32,
    pub level: u32,
    pub feedback_visible: bool,
    /// Final score of the last finished round
    pub last_score: Option<u32>,
}

/// Owns the round state and runs the tick loop
pub struct GameLoopController<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    phase: Phase,
    state: Option<GameState>,
    spawner: FoodSpawner<R>,
    pending_direction: Option<Direction>,
    raw_ticks: u64,
    last_score: Option<u32>,
}

impl GameLoopController<rand::rngs::ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameLoopController<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let spawner = FoodSpawner::with_rng(rng, config.spawn_attempts);
        Self {
            config,
            phase: Phase::Idle,
            state: None,
            spawner,
            pending_direction: None,
            raw_ticks: 0,
            last_score: None,
        }
    }

    /// Begin a fresh round. Returns false while a round is already running.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Playing {
            return false;
        }

        let snake = SnakeBody::initialize(
            self.config.initial_snake_length,
            self.config.start_cell,
            self.config.start_direction,
        );
        let food = self.spawner.spawn(&snake);

        info!(
            length = snake.len(),
            head = ?snake.head(),
            food = ?food,
            "round started"
        );

        self.state = Some(GameState {
            snake,
            food,
            progress: ProgressionTracker::new(),
        });
        self.pending_direction = None;
        self.raw_ticks = 0;
        self.phase = Phase::Playing;
        true
    }

    /// Buffer a turn for the next logical update.
    ///
    /// The latest accepted turn wins. Turns reversing the current heading are
    /// dropped and leave any earlier buffered turn in place.
    pub fn set_direction(&mut self, direction: Direction) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.snake.direction().is_opposite(direction) {
            debug!(?direction, "ignoring reversal");
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// One raw tick from the driver
    pub fn tick(&mut self) -> TickOutcome {
        let Some(state) = self.state.as_ref() else {
            return TickOutcome::Inactive;
        };

        self.raw_ticks += 1;
        let rate = u64::from(state.progress.tick_rate());
        if self.raw_ticks % rate != 0 {
            return TickOutcome::Waiting;
        }

        self.step()
    }

    /// Run one logical update right away
    pub fn step(&mut self) -> TickOutcome {
        let Some(state) = self.state.as_mut() else {
            return TickOutcome::Inactive;
        };

        let mut direction = state.snake.direction();
        if let Some(next) = self.pending_direction.take() {
            if !direction.is_opposite(next) {
                direction = next;
            }
        }

        let grew = state.snake.is_growth_pending();
        let vacated = state.snake.advance(direction);
        state.progress.advance_feedback();

        let collisions = CollisionEngine::check(&state.snake, state.food.as_ref());

        if let Some(kind) = collisions.eaten {
            state.snake.tint_all(kind.tint());
            state.progress.on_food_eaten();
            state.snake.schedule_growth();
            state.food = self.spawner.spawn(&state.snake);
            debug!(
                kind = kind.name(),
                score = state.progress.score(),
                next = ?state.food,
                "food eaten"
            );
        }

        if let Some(cause) = collisions.terminal {
            return self.game_over(cause);
        }

        TickOutcome::Advanced(StepReport {
            vacated,
            grew,
            eaten: collisions.eaten,
        })
    }

    fn game_over(&mut self, cause: CollisionType) -> TickOutcome {
        let final_score = self
            .state
            .take()
            .map(|state| state.progress.score())
            .unwrap_or_default();

        info!(final_score, ?cause, "game over");

        self.pending_direction = None;
        self.last_score = Some(final_score);
        self.phase = Phase::GameOver;

        TickOutcome::GameOver { final_score, cause }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The running round, if any
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Current score; 0 outside a round
    pub fn score(&self) -> u32 {
        self.state
            .as_ref()
            .map(|state| state.progress.score())
            .unwrap_or(0)
    }

    pub fn level(&self) -> u32 {
        self.state
            .as_ref()
            .map(|state| state.progress.level())
            .unwrap_or(0)
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        let (segments, food, feedback_visible) = match self.state.as_ref() {
            Some(state) => (
                state.snake.segments().copied().collect(),
                state.food,
                state.progress.is_feedback_visible(),
            ),
            None => (Vec::new(), None, false),
        };

        Snapshot {
            phase: self.phase,
            segments,
            food,
            score: self.score(),
            level: self.level(),
            feedback_visible,
            last_score: self.last_score,
        }
    }
}
