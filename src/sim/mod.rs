pub mod board;
pub mod config;
pub mod random;
pub mod state;
pub mod step;

pub use board::Glyph;
pub use config::{Config, ConfigError};
pub use random::{RandomSource, RngSource};
pub use state::{Cell, Direction, GameState, HeldKey, Outcome};
pub use step::Action;
