//! The per-tick state transition.

use std::time::Instant;

use crate::sim::random::RandomSource;
use crate::sim::state::{Cell, Direction, GameState, HeldKey, Outcome};

/// A discrete command from the player for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    MoveLeft,
    MoveRight,
    Fire,
}

impl GameState {
    /// Advances the game by one tick.
    ///
    /// Stages run in a fixed order: player movement, firing, player missiles,
    /// the alien formation (including its chance to fire), alien missiles,
    /// missile/alien hits, and finally the win check. A finished game is left
    /// untouched. `now` only stamps explosion markers.
    pub fn step<R: RandomSource + ?Sized>(&mut self, action: Action, rng: &mut R, now: Instant) {
        if self.is_over() {
            return;
        }
        self.ticks += 1;

        self.move_player(action);
        self.fire(action);
        self.advance_player_missiles();
        self.advance_formation(rng);
        self.advance_alien_missiles(now);
        self.resolve_hits(now);

        if self.aliens.is_empty() {
            self.finish(Outcome::Victory);
        }
    }

    fn move_player(&mut self, action: Action) {
        // A button press wins over whatever key is held
        let direction = match action {
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            _ => match self.held_key {
                Some(HeldKey::Left) => Some(Direction::Left),
                Some(HeldKey::Right) => Some(Direction::Right),
                _ => None,
            },
        };
        match direction {
            Some(Direction::Left) => {
                self.player_column = self.player_column.saturating_sub(1);
            }
            Some(Direction::Right) => {
                self.player_column = (self.player_column + 1).min(self.config.width - 1);
            }
            None => {}
        }
    }

    fn fire(&mut self, action: Action) {
        let triggered = action == Action::Fire || self.held_key == Some(HeldKey::Fire);
        if triggered && self.player_missiles.len() < self.config.max_player_missiles {
            self.player_missiles
                .push(Cell::new(self.config.launch_row(), self.player_column));
        }
    }

    fn advance_player_missiles(&mut self) {
        self.player_missiles = self
            .player_missiles
            .iter()
            .filter_map(|m| m.row.checked_sub(1).map(|row| Cell::new(row, m.col)))
            .collect();
    }

    fn advance_formation<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.alien_step_counter += 1;
        if self.alien_step_counter < self.alien_step_period {
            return;
        }
        self.alien_step_counter = 0;

        if self.aliens.is_empty() {
            return;
        }

        let at_edge = match self.alien_direction {
            Direction::Right => self
                .aliens
                .iter()
                .any(|a| a.col >= self.config.width - 1),
            Direction::Left => self.aliens.iter().any(|a| a.col == 0),
        };

        if at_edge {
            self.alien_direction = self.alien_direction.reversed();
            for alien in &mut self.aliens {
                alien.row += 1;
            }
            log::debug!(target: "sim", "formation dropped, now heading {:?}", self.alien_direction);

            let player_row = self.config.player_row();
            if self.aliens.iter().any(|a| a.row >= player_row) {
                self.finish(Outcome::Overrun);
            }
        } else {
            for alien in &mut self.aliens {
                match self.alien_direction {
                    Direction::Right => alien.col += 1,
                    Direction::Left => alien.col -= 1,
                }
            }
        }

        if !self.aliens.is_empty() && rng.chance(self.config.alien_fire_chance) {
            let shooter = self.aliens[rng.pick(self.aliens.len())];
            log::debug!(target: "sim", "alien at {:?} fired", shooter);
            self.alien_missiles
                .push(Cell::new(shooter.row + 1, shooter.col));
        }
    }

    fn advance_alien_missiles(&mut self, now: Instant) {
        let player = self.player_cell();
        let height = self.config.height;
        let mut kept = Vec::with_capacity(self.alien_missiles.len());

        for missile in std::mem::take(&mut self.alien_missiles) {
            let next = Cell::new(missile.row + 1, missile.col);
            if next == player {
                self.explosions.insert(player, now);
                self.finish(Outcome::PlayerHit);
            } else if next.row < height {
                kept.push(next);
            }
        }
        self.alien_missiles = kept;
    }

    fn resolve_hits(&mut self, now: Instant) {
        let mut hit_aliens = vec![false; self.aliens.len()];
        let mut hit_missiles = vec![false; self.player_missiles.len()];

        for (mi, missile) in self.player_missiles.iter().enumerate() {
            let target = (0..self.aliens.len())
                .find(|&ai| !hit_aliens[ai] && self.aliens[ai] == *missile);
            if let Some(ai) = target {
                hit_aliens[ai] = true;
                hit_missiles[mi] = true;
                self.score = self.score.saturating_add(self.config.hit_score);
                self.explosions.insert(*missile, now);
                log::debug!(target: "sim", "hit alien at {:?}, score {}", missile, self.score);
            }
        }

        let mut hit = hit_aliens.into_iter();
        self.aliens.retain(|_| !hit.next().unwrap_or(false));
        let mut hit = hit_missiles.into_iter();
        self.player_missiles.retain(|_| !hit.next().unwrap_or(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::Config;

    /// Suppresses alien fire.
    struct Never;

    impl RandomSource for Never {
        fn chance(&mut self, _p: f64) -> bool {
            false
        }

        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    /// Fires on every formation move, always from the same slot.
    struct Always(usize);

    impl RandomSource for Always {
        fn chance(&mut self, _p: f64) -> bool {
            true
        }

        fn pick(&mut self, len: usize) -> usize {
            self.0.min(len - 1)
        }
    }

    /// Always fires, but refuses to pick from an empty formation.
    struct TriggerHappy;

    impl RandomSource for TriggerHappy {
        fn chance(&mut self, _p: f64) -> bool {
            true
        }

        fn pick(&mut self, len: usize) -> usize {
            assert!(len > 0, "asked to pick a shooter from an empty formation");
            0
        }
    }

    /// A game whose formation never gets to move.
    fn still_game(aliens: Vec<Cell>) -> GameState {
        let mut state = GameState::new(Config {
            alien_step_period: 10_000,
            ..Config::default()
        });
        state.aliens = aliens;
        state
    }

    fn restless_game(aliens: Vec<Cell>) -> GameState {
        let mut state = GameState::new(Config {
            alien_step_period: 1,
            ..Config::default()
        });
        state.aliens = aliens;
        state
    }

    #[test]
    fn test_player_stays_in_bounds() {
        let mut state = still_game(vec![Cell::new(2, 2)]);
        let now = Instant::now();
        for _ in 0..60 {
            state.step(Action::MoveLeft, &mut Never, now);
            assert!(state.player_column < state.config.width);
        }
        assert_eq!(state.player_column, 0);

        for _ in 0..60 {
            state.step(Action::MoveRight, &mut Never, now);
            assert!(state.player_column < state.config.width);
        }
        assert_eq!(state.player_column, state.config.width - 1);
    }

    #[test]
    fn test_button_overrides_held_key() {
        let mut state = still_game(vec![Cell::new(2, 2)]);
        state.held_key = Some(HeldKey::Left);
        let start = state.player_column;

        state.step(Action::MoveRight, &mut Never, Instant::now());
        assert_eq!(state.player_column, start + 1);

        state.step(Action::None, &mut Never, Instant::now());
        assert_eq!(state.player_column, start);
    }

    #[test]
    fn test_held_fire_key_fires() {
        let mut state = still_game(vec![Cell::new(2, 2)]);
        state.held_key = Some(HeldKey::Fire);
        state.step(Action::None, &mut Never, Instant::now());
        assert_eq!(state.player_missiles, vec![Cell::new(16, 20)]);
    }

    #[test]
    fn test_missile_cap() {
        let mut state = still_game(vec![Cell::new(2, 2)]);
        let now = Instant::now();
        for tick in 1..=10 {
            state.step(Action::Fire, &mut Never, now);
            assert!(state.player_missiles.len() <= 3);
            if tick >= 3 {
                assert_eq!(state.player_missiles.len(), 3);
            }
        }
    }

    #[test]
    fn test_missiles_leave_the_top() {
        let mut state = still_game(vec![Cell::new(2, 2)]);
        state.player_missiles = vec![Cell::new(0, 7), Cell::new(1, 9)];
        state.step(Action::None, &mut Never, Instant::now());
        assert_eq!(state.player_missiles, vec![Cell::new(0, 9)]);
    }

    #[test]
    fn test_finished_game_is_frozen() {
        let mut state = restless_game(vec![Cell::new(5, 5)]);
        state.player_missiles = vec![Cell::new(9, 9)];
        state.alien_missiles = vec![Cell::new(3, 3)];
        state.finish(Outcome::Overrun);

        let before = state.clone();
        state.step(Action::Fire, &mut Always(0), Instant::now());
        state.step(Action::MoveLeft, &mut Always(0), Instant::now());
        assert_eq!(state, before);
    }

    #[test]
    fn test_hit_removes_missile_and_alien() {
        let mut state = still_game(vec![Cell::new(5, 5), Cell::new(5, 20)]);
        state.player_missiles = vec![Cell::new(6, 5)];
        let now = Instant::now();

        state.step(Action::None, &mut Never, now);

        assert_eq!(state.score, 10);
        assert_eq!(state.aliens, vec![Cell::new(5, 20)]);
        assert!(state.player_missiles.is_empty());
        assert!(state.is_exploding(Cell::new(5, 5), now));
        assert!(!state.is_over());
    }

    #[test]
    fn test_alien_absorbs_only_one_missile() {
        let mut state = still_game(vec![Cell::new(5, 5), Cell::new(5, 20)]);
        state.player_missiles = vec![Cell::new(6, 5), Cell::new(6, 5)];

        state.step(Action::None, &mut Never, Instant::now());

        assert_eq!(state.score, 10);
        assert_eq!(state.aliens, vec![Cell::new(5, 20)]);
        assert_eq!(state.player_missiles, vec![Cell::new(5, 5)]);
    }

    #[test]
    fn test_formation_moves_on_its_period() {
        let mut state = GameState::default();
        let start = state.aliens.clone();
        let now = Instant::now();

        for _ in 0..4 {
            state.step(Action::None, &mut Never, now);
        }
        assert_eq!(state.aliens, start);
        assert_eq!(state.alien_step_counter, 4);

        state.step(Action::None, &mut Never, now);
        assert_eq!(state.alien_step_counter, 0);
        let shifted: Vec<Cell> = start.iter().map(|c| Cell::new(c.row, c.col + 1)).collect();
        assert_eq!(state.aliens, shifted);
    }

    #[test]
    fn test_formation_drops_at_right_edge() {
        let mut state = restless_game(vec![Cell::new(2, 36), Cell::new(2, 39)]);
        let now = Instant::now();

        state.step(Action::None, &mut Never, now);
        assert_eq!(state.aliens, vec![Cell::new(3, 36), Cell::new(3, 39)]);
        assert_eq!(state.alien_direction, Direction::Left);

        state.step(Action::None, &mut Never, now);
        assert_eq!(state.aliens, vec![Cell::new(3, 35), Cell::new(3, 38)]);
    }

    #[test]
    fn test_formation_drops_at_left_edge() {
        let mut state = restless_game(vec![Cell::new(4, 0), Cell::new(4, 3)]);
        state.alien_direction = Direction::Left;

        state.step(Action::None, &mut Never, Instant::now());
        assert_eq!(state.aliens, vec![Cell::new(5, 0), Cell::new(5, 3)]);
        assert_eq!(state.alien_direction, Direction::Right);
    }

    #[test]
    fn test_overrun_loses() {
        let mut state = restless_game(vec![Cell::new(17, 39)]);

        state.step(Action::None, &mut Never, Instant::now());

        assert_eq!(state.aliens, vec![Cell::new(18, 39)]);
        assert_eq!(state.outcome, Some(Outcome::Overrun));
        assert_eq!(state.message, "ALIENS REACHED YOU! Game Over!");
    }

    #[test]
    fn test_alien_fire_spawns_below_shooter() {
        let mut state = restless_game(vec![Cell::new(2, 10), Cell::new(2, 13)]);

        state.step(Action::None, &mut Always(1), Instant::now());

        // Spawned under the shooter at row 3, then fell once this tick
        assert_eq!(state.alien_missiles, vec![Cell::new(4, 14)]);
    }

    #[test]
    fn test_alien_missile_hits_player() {
        let mut state = still_game(vec![Cell::new(2, 2)]);
        let player = state.player_cell();
        state.alien_missiles = vec![Cell::new(player.row - 1, player.col)];
        let now = Instant::now();

        state.step(Action::None, &mut Never, now);

        assert_eq!(state.outcome, Some(Outcome::PlayerHit));
        assert!(state.alien_missiles.is_empty());
        assert!(state.is_exploding(player, now));
    }

    #[test]
    fn test_alien_missile_dodged() {
        let mut state = still_game(vec![Cell::new(2, 2)]);
        let player = state.player_cell();
        state.alien_missiles = vec![
            Cell::new(player.row - 1, player.col + 1),
            Cell::new(state.config.height - 1, 4),
        ];

        state.step(Action::None, &mut Never, Instant::now());

        assert!(!state.is_over());
        assert_eq!(state.alien_missiles, vec![Cell::new(player.row, player.col + 1)]);
    }

    #[test]
    fn test_clearing_formation_wins() {
        let mut state = still_game(vec![Cell::new(5, 5)]);
        state.player_missiles = vec![Cell::new(6, 5)];

        state.step(Action::None, &mut Never, Instant::now());

        assert_eq!(state.outcome, Some(Outcome::Victory));
        assert_eq!(state.message, "YOU DEFEATED ALL ALIENS! You Win!");
    }

    #[test]
    fn test_empty_formation_never_fires() {
        let mut state = restless_game(Vec::new());

        state.step(Action::None, &mut TriggerHappy, Instant::now());

        assert!(state.alien_missiles.is_empty());
        assert_eq!(state.outcome, Some(Outcome::Victory));
    }

    #[test]
    fn test_single_shot_clears_lone_alien() {
        let mut state = still_game(vec![Cell::new(5, 5)]);
        state.player_column = 5;
        let now = Instant::now();

        state.step(Action::Fire, &mut Never, now);
        assert_eq!(state.player_missiles, vec![Cell::new(16, 5)]);

        while !state.is_over() && state.ticks < 30 {
            state.step(Action::None, &mut Never, now);
        }

        assert_eq!(state.ticks, 12);
        assert!(state.aliens.is_empty());
        assert!(state.player_missiles.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.outcome, Some(Outcome::Victory));
    }
}
