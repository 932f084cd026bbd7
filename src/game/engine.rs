use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};
use crate::scheduler::TickScheduler;
use crate::storage::ScoreStore;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed
    Idle,
    /// The snake moved one cell
    Moved {
        /// Whether the snake ate food this tick
        ate_food: bool,
    },
    /// The round ended
    GameOver(CollisionType),
}

impl TickOutcome {
    /// Whether the tick changed the state enough to need a redraw
    pub fn needs_render(&self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}

/// The game engine that owns the game state and handles all game logic
#[derive(Debug)]
pub struct GameEngine<S, T> {
    config: GameConfig,
    state: GameState,
    pending_direction: Option<Direction>,
    best_score: u32,
    store: S,
    scheduler: T,
    rng: StdRng,
}

impl<S: ScoreStore, T: TickScheduler> GameEngine<S, T> {
    /// Create a new engine. The best score is read from `store` once, here.
    ///
    /// Fails if `config` does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig, store: S, scheduler: T) -> Result<Self> {
        Self::with_rng(config, store, scheduler, StdRng::from_entropy())
    }

    /// Create an engine with a caller-provided random source
    pub fn with_rng(config: GameConfig, store: S, scheduler: T, rng: StdRng) -> Result<Self> {
        config.validate().context("Invalid game config")?;

        let best_score = store.get(&config.best_score_key);
        log::info!("Best score loaded: {}", best_score);

        let state = GameState::new(
            Self::starting_snake(&config),
            config.idle_food(),
            config.grid_size,
            config.initial_target_length,
        );

        Ok(Self {
            config,
            state,
            pending_direction: None,
            best_score,
            store,
            scheduler,
            rng,
        })
    }

    /// Start a new game, replacing whatever was running
    pub fn reset(&mut self) {
        let snake = Self::starting_snake(&self.config);
        let food = spawn_food(&mut self.rng, self.config.grid_size, &snake);

        self.state = GameState::new(
            snake,
            food,
            self.config.grid_size,
            self.config.initial_target_length,
        );
        self.state.phase = GamePhase::Running;
        self.pending_direction = None;

        self.scheduler.start(self.config.tick_interval());
        log::info!("New game started, food at ({}, {})", food.x, food.y);
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Returns false when `direction` is the exact inverse of the current
    /// velocity; such requests are dropped. A later accepted request
    /// overwrites an earlier one that has not been applied yet.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.state.snake.direction.is_opposite(direction) {
            log::trace!("Ignoring reverse turn to {:?}", direction);
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Same as [`change_direction`](Self::change_direction) for a raw unit
    /// vector. Vectors that are not axis-aligned unit steps are rejected.
    pub fn change_direction_delta(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.change_direction(direction),
            None => false,
        }
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.state.snake.direction = direction;
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        // Checked against the body before it grows, tail included
        if let Some(collision) = self.check_collision(new_head) {
            self.state.phase = GamePhase::GameOver;
            self.scheduler.cancel();
            log::info!(
                "Game over ({:?}) with score {}, best {}",
                collision,
                self.state.score,
                self.best_score
            );
            return TickOutcome::GameOver(collision);
        }

        self.state.snake.push_head(new_head);

        let ate_food = new_head == self.state.food;
        if ate_food {
            self.state.score += 1;
            self.state.target_length += 1;

            if self.state.score > self.best_score {
                self.record_best_score();
            }

            self.state.food = spawn_food(&mut self.rng, self.config.grid_size, &self.state.snake);
            log::debug!(
                "Food eaten, score {}, next food at ({}, {})",
                self.state.score,
                self.state.food.x,
                self.state.food.y
            );
        }

        self.state.snake.trim_to(self.state.target_length);
        log::trace!("Tick: head at ({}, {})", new_head.x, new_head.y);

        TickOutcome::Moved { ate_food }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn target_length(&self) -> usize {
        self.state.target_length
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn starting_snake(config: &GameConfig) -> Snake {
        Snake::new(
            config.start_head(),
            Direction::Right,
            config.initial_snake_length,
        )
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn record_best_score(&mut self) {
        self.best_score = self.state.score;
        log::info!("New best score: {}", self.best_score);

        // A failed write costs persistence, not the game in progress
        if let Err(e) = self.store.set(&self.config.best_score_key, self.best_score) {
            log::warn!("Failed to persist best score: {:#}", e);
        }
    }
}

/// Pick a uniformly random cell not covered by the snake.
///
/// Rejection sampling with no retry bound: it only terminates while at least
/// one cell is free, and slows down as the body fills the grid.
fn spawn_food(rng: &mut StdRng, grid_size: usize, snake: &Snake) -> Position {
    loop {
        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return pos;
        }
    }
}
