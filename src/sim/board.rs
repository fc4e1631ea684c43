//! Projects a game state onto a grid of glyphs for drawing.

use std::time::Instant;

use crate::sim::state::{Cell, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Player,
    Alien,
    PlayerMissile,
    AlienMissile,
    Explosion,
}

impl Glyph {
    pub fn ascii(self) -> char {
        match self {
            Glyph::Empty => '.',
            Glyph::Player => 'A',
            Glyph::Alien => 'V',
            Glyph::PlayerMissile => '|',
            Glyph::AlienMissile => '!',
            Glyph::Explosion => 'X',
        }
    }
}

/// Row-major glyph grid. Later layers win: player, aliens, player missiles,
/// alien missiles, then explosions still inside their lifetime.
pub fn glyphs(state: &GameState, now: Instant) -> Vec<Vec<Glyph>> {
    let (w, h) = (state.config.width, state.config.height);
    let mut grid = vec![vec![Glyph::Empty; w]; h];

    let mut put = |cell: Cell, glyph: Glyph| {
        if cell.row < h && cell.col < w {
            grid[cell.row][cell.col] = glyph;
        }
    };

    put(state.player_cell(), Glyph::Player);
    for &alien in &state.aliens {
        put(alien, Glyph::Alien);
    }
    for &missile in &state.player_missiles {
        put(missile, Glyph::PlayerMissile);
    }
    for &missile in &state.alien_missiles {
        put(missile, Glyph::AlienMissile);
    }
    for &cell in state.explosions.keys() {
        if state.is_exploding(cell, now) {
            put(cell, Glyph::Explosion);
        }
    }

    grid
}

/// Plain text rendering, one line per row.
pub fn render_ascii(state: &GameState, now: Instant) -> String {
    glyphs(state, now)
        .iter()
        .map(|row| row.iter().map(|g| g.ascii()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::Config;
    use std::time::Duration;

    fn small_state() -> GameState {
        let mut state = GameState::new(Config {
            width: 6,
            height: 6,
            formation_origin: Cell::new(1, 1),
            formation_size: 2,
            formation_spacing: 2,
            ..Config::default()
        });
        state.player_column = 2;
        state
    }

    #[test]
    fn test_render_ascii_layout() {
        let mut state = small_state();
        state.player_missiles = vec![Cell::new(3, 2)];
        state.alien_missiles = vec![Cell::new(2, 3)];

        let text = render_ascii(&state, Instant::now());
        assert_eq!(
            text,
            "......\n\
             .V.V..\n\
             ...!..\n\
             ..|...\n\
             ..A...\n\
             ......"
        );
    }

    #[test]
    fn test_explosion_overlays_until_expired() {
        let mut state = small_state();
        let start = Instant::now();
        state.explosions.insert(Cell::new(1, 1), start);

        let grid = glyphs(&state, start);
        assert_eq!(grid[1][1], Glyph::Explosion);

        let grid = glyphs(&state, start + Duration::from_secs(1));
        assert_eq!(grid[1][1], Glyph::Alien);
    }

    #[test]
    fn test_off_grid_positions_are_skipped() {
        let mut state = small_state();
        state.alien_missiles = vec![Cell::new(9, 9)];
        let grid = glyphs(&state, Instant::now());
        assert_eq!(grid.len(), 6);
        assert!(grid.iter().all(|row| row.len() == 6));
    }
}
