//! Grid-based Space Invaders.
//!
//! The [`sim`] module holds the whole game: a [`sim::GameState`] owned by the
//! caller and advanced one tick at a time by [`sim::GameState::step`]. The
//! terminal frontend in the binary only feeds it input and draws the result.

pub mod sim;
