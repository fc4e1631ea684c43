use std::collections::HashMap;
use std::time::Instant;

use crate::sim::config::{Config, ConfigError};

/// A grid position. Row 0 is the top of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    /// The formation reached the player's row.
    Overrun,
    /// An alien missile struck the cannon.
    PlayerHit,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Victory)
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Victory => "YOU DEFEATED ALL ALIENS! You Win!",
            Outcome::Overrun => "ALIENS REACHED YOU! Game Over!",
            Outcome::PlayerHit => "YOU WERE HIT! Game Over!",
        }
    }
}

/// A key the frontend reports as still held down. Applied on every tick
/// until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldKey {
    Left,
    Right,
    Fire,
}

pub const START_MESSAGE: &str = "Game started! Good luck!";

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub config: Config,
    pub player_column: usize,
    pub aliens: Vec<Cell>,
    pub player_missiles: Vec<Cell>,
    pub alien_missiles: Vec<Cell>,
    pub score: u32,
    pub outcome: Option<Outcome>,
    pub alien_direction: Direction,
    pub alien_step_counter: u32,
    pub alien_step_period: u32,
    /// Render-only markers, keyed by cell, stamped with when they appeared.
    pub explosions: HashMap<Cell, Instant>,
    pub held_key: Option<HeldKey>,
    pub message: String,
    /// Live ticks applied so far.
    pub ticks: u64,
}

impl GameState {
    /// Fresh game laid out from `config`, which must pass
    /// [`Config::validate`]. Use [`GameState::try_new`] for configs that
    /// have not been checked yet.
    pub fn new(config: Config) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "GameState::new with an invalid config: {:?}",
            config
        );
        Self {
            config,
            player_column: config.width / 2,
            aliens: config.formation(),
            player_missiles: Vec::new(),
            alien_missiles: Vec::new(),
            score: 0,
            outcome: None,
            alien_direction: Direction::Right,
            alien_step_counter: 0,
            alien_step_period: config.alien_step_period,
            explosions: HashMap::new(),
            held_key: None,
            message: START_MESSAGE.to_string(),
            ticks: 0,
        }
    }

    /// Validates `config`, then lays out a fresh game.
    pub fn try_new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn player_cell(&self) -> Cell {
        Cell::new(self.config.player_row(), self.player_column)
    }

    /// Ends the game unless an earlier stage of the tick already did.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            log::info!(target: "sim", "game over after {} ticks: {:?}, score {}", self.ticks, outcome, self.score);
            self.outcome = Some(outcome);
            self.message = outcome.message().to_string();
        }
    }

    pub fn is_exploding(&self, cell: Cell, now: Instant) -> bool {
        self.explosions
            .get(&cell)
            .is_some_and(|&at| now.saturating_duration_since(at) < self.config.explosion_ttl)
    }

    /// Drops explosion markers older than the configured lifetime. This is
    /// the only change allowed on a finished game.
    pub fn expire_explosions(&mut self, now: Instant) {
        let ttl = self.config.explosion_ttl;
        self.explosions
            .retain(|_, at| now.saturating_duration_since(*at) < ttl);
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(Config::default())
    }
}
