//! Grid dimensions and rule constants.

use std::time::Duration;

use thiserror::Error;

use crate::sim::state::Cell;

// Grid
pub const GRID_WIDTH: usize = 40;
pub const GRID_HEIGHT: usize = 20;
pub const MIN_WIDTH: usize = 3;
pub const MIN_HEIGHT: usize = 6;

// Rules
pub const MAX_PLAYER_MISSILES: usize = 3;
pub const ALIEN_STEP_PERIOD: u32 = 5; // formation moves every N ticks
pub const ALIEN_FIRE_CHANCE: f64 = 0.2; // per formation move
pub const HIT_SCORE: u32 = 10;
pub const EXPLOSION_TTL: Duration = Duration::from_millis(200);

// Starting formation: one row of aliens spaced out to the right of the origin
pub const FORMATION_ORIGIN: Cell = Cell { row: 5, col: 5 };
pub const FORMATION_SIZE: usize = 5;
pub const FORMATION_SPACING: usize = 3;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least {min_width}x{min_height}, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[error("formation spans columns up to {last_col} but the grid is only {width} wide")]
    FormationTooWide { last_col: usize, width: usize },
    #[error("formation starts on row {row}, it must start above row {limit}")]
    FormationTooLow { row: usize, limit: usize },
    #[error("formation must contain at least one alien")]
    EmptyFormation,
    #[error("alien step period must be at least one tick")]
    ZeroAlienPeriod,
    #[error("player must be allowed at least one missile in flight")]
    ZeroMissileCap,
    #[error("alien fire chance {0} is outside 0..=1")]
    InvalidFireChance(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub alien_step_period: u32,
    pub max_player_missiles: usize,
    pub alien_fire_chance: f64,
    pub hit_score: u32,
    pub explosion_ttl: Duration,
    pub formation_origin: Cell,
    pub formation_size: usize,
    pub formation_spacing: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            alien_step_period: ALIEN_STEP_PERIOD,
            max_player_missiles: MAX_PLAYER_MISSILES,
            alien_fire_chance: ALIEN_FIRE_CHANCE,
            hit_score: HIT_SCORE,
            explosion_ttl: EXPLOSION_TTL,
            formation_origin: FORMATION_ORIGIN,
            formation_size: FORMATION_SIZE,
            formation_spacing: FORMATION_SPACING,
        }
    }
}

impl Config {
    /// Row the player's cannon sits on. Aliens reaching it end the game.
    pub fn player_row(&self) -> usize {
        self.height - 2
    }

    /// Row a freshly fired player missile appears on.
    pub fn launch_row(&self) -> usize {
        self.height - 3
    }

    /// Starting alien positions, left to right.
    pub fn formation(&self) -> Vec<Cell> {
        (0..self.formation_size)
            .map(|i| Cell {
                row: self.formation_origin.row,
                col: self.formation_origin.col + i * self.formation_spacing,
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        if self.formation_size == 0 {
            return Err(ConfigError::EmptyFormation);
        }
        let last_col =
            self.formation_origin.col + (self.formation_size - 1) * self.formation_spacing;
        if last_col >= self.width {
            return Err(ConfigError::FormationTooWide {
                last_col,
                width: self.width,
            });
        }
        if self.formation_origin.row >= self.launch_row() {
            return Err(ConfigError::FormationTooLow {
                row: self.formation_origin.row,
                limit: self.launch_row(),
            });
        }
        if self.alien_step_period == 0 {
            return Err(ConfigError::ZeroAlienPeriod);
        }
        if self.max_player_missiles == 0 {
            return Err(ConfigError::ZeroMissileCap);
        }
        if !(0.0..=1.0).contains(&self.alien_fire_chance) {
            return Err(ConfigError::InvalidFireChance(self.alien_fire_chance));
        }
        Ok(())
    }
}
