pub mod space_invaders;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// A playable screen driven by the app's tick loop.
pub trait Game {
    /// Called once per tick while the game's tab is active.
    fn update(&mut self);
    /// Receives presses, repeats and releases.
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    /// Forget any held keys, e.g. when focus moves elsewhere and the
    /// release event will never arrive.
    fn release_keys(&mut self);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}
