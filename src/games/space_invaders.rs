use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use termvaders::sim::board::{self, Glyph};
use termvaders::sim::{Action, Config, GameState, HeldKey, RngSource};

use crate::games::Game;

const BG: Color = Color::Rgb(0, 0, 5);

pub struct SpaceInvaders {
    state: GameState,
    rng: RngSource<StdRng>,
    /// Discrete action waiting for the next tick.
    queued: Action,
    /// The terminal reports key releases, so held keys can be tracked.
    held_keys: bool,
    paused: bool,
    high_score: u32,
}

fn action_for(code: KeyCode) -> Action {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Action::MoveRight,
        KeyCode::Char(' ') | KeyCode::Up => Action::Fire,
        _ => Action::None,
    }
}

fn held_key_for(code: KeyCode) -> Option<HeldKey> {
    match action_for(code) {
        Action::MoveLeft => Some(HeldKey::Left),
        Action::MoveRight => Some(HeldKey::Right),
        Action::Fire => Some(HeldKey::Fire),
        Action::None => None,
    }
}

fn glyph_style(glyph: Glyph) -> (char, Style) {
    let base = Style::default().bg(BG);
    match glyph {
        Glyph::Empty => ('·', base.fg(Color::Rgb(30, 30, 45))),
        Glyph::Player => ('A', base.fg(Color::Rgb(80, 255, 80)).add_modifier(Modifier::BOLD)),
        Glyph::Alien => ('V', base.fg(Color::Rgb(200, 180, 255)).add_modifier(Modifier::BOLD)),
        Glyph::PlayerMissile => ('|', base.fg(Color::Rgb(255, 255, 200)).add_modifier(Modifier::BOLD)),
        Glyph::AlienMissile => ('!', base.fg(Color::Rgb(255, 100, 100)).add_modifier(Modifier::BOLD)),
        Glyph::Explosion => ('X', base.fg(Color::Rgb(255, 180, 40)).add_modifier(Modifier::BOLD)),
    }
}

impl SpaceInvaders {
    pub fn new(config: Config, seed: Option<u64>, held_keys: bool) -> Self {
        let rng = match seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        Self {
            state: GameState::new(config),
            rng,
            queued: Action::None,
            held_keys,
            paused: false,
            high_score: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    fn press(&mut self, code: KeyCode) {
        let action = action_for(code);
        if action != Action::None {
            self.queued = action;
        }
        if self.held_keys {
            self.hold(code);
        }
    }

    fn hold(&mut self, code: KeyCode) {
        if let Some(key) = held_key_for(code) {
            if self.state.held_key != Some(key) {
                log::debug!(target: "input", "holding {:?}", key);
            }
            self.state.held_key = Some(key);
        }
    }

    fn release(&mut self, code: KeyCode) {
        let key = held_key_for(code);
        if key.is_some() && self.state.held_key == key {
            log::debug!(target: "input", "released {:?}", key);
            self.state.held_key = None;
        }
    }

    /// Each grid cell is drawn `cell_w` terminal columns wide.
    fn render_field(&self, cell_w: usize) -> Vec<Line<'static>> {
        let now = Instant::now();
        board::glyphs(&self.state, now)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|glyph| {
                        let (ch, style) = glyph_style(glyph);
                        let mut text = String::from(ch);
                        for _ in 1..cell_w {
                            text.push(' ');
                        }
                        Span::styled(text, style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Game for SpaceInvaders {
    fn update(&mut self) {
        let now = Instant::now();
        self.state.expire_explosions(now);
        if self.state.is_over() || self.paused {
            return;
        }
        let action = std::mem::take(&mut self.queued);
        self.state.step(action, &mut self.rng, now);
        if self.state.score > self.high_score {
            self.high_score = self.state.score;
        }
        if self.state.is_over() {
            log::info!(target: "app", "{} (score {})", self.state.message, self.state.score);
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.kind {
            KeyEventKind::Release => {
                self.release(key.code);
                return;
            }
            KeyEventKind::Repeat => {
                if !self.paused && !self.state.is_over() && self.held_keys {
                    self.hold(key.code);
                }
                return;
            }
            KeyEventKind::Press => {}
        }

        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.state.is_over() {
                    self.paused = !self.paused;
                    self.release_keys();
                }
            }
            _ => {
                if self.state.is_over() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                        self.reset();
                    }
                    return;
                }
                if self.paused {
                    return;
                }
                self.press(key.code);
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
            .title(" Space Invaders ")
            .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        // Status bar
        let message_style = match self.state.outcome {
            Some(outcome) if outcome.is_win() => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            Some(_) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            None => Style::default().fg(Color::Rgb(180, 180, 200)),
        };
        let status = Line::from(vec![
            Span::styled(" \u{1f47e} ", Style::default()),
            Span::styled(
                format!("Score: {} ", self.state.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Best: {} ", self.high_score),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Aliens: {} ", self.state.aliens.len()),
                Style::default().fg(Color::Rgb(255, 80, 80)),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.state.message.clone(), message_style),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        // Field, centered, two columns per cell when there is room
        let cols = self.state.config.width;
        let rows = self.state.config.height;
        let field_area = chunks[1];
        let cell_w = if field_area.width as usize >= cols * 2 + 2 { 2 } else { 1 };
        let field_w = ((cols * cell_w + 2) as u16).min(field_area.width);
        let field_h = ((rows + 2) as u16).min(field_area.height);
        let field_rect = Rect::new(
            field_area.x + (field_area.width - field_w) / 2,
            field_area.y + (field_area.height - field_h) / 2,
            field_w,
            field_h,
        );
        let field_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(40, 80, 40)))
            .style(Style::default().bg(BG));
        let lines = self.render_field(cell_w);
        frame.render_widget(Paragraph::new(lines).block(field_block), field_rect);

        if self.state.is_over() {
            let msg = Paragraph::new(Line::from(vec![
                Span::styled(" GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled("Press ENTER to play again, Esc for menu", Style::default().fg(Color::Gray)),
            ]));
            frame.render_widget(msg, chunks[2]);
        } else if self.paused {
            let msg = Paragraph::new(Line::from(vec![
                Span::styled(" PAUSED - Press P to resume ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]));
            frame.render_widget(msg, chunks[2]);
        } else {
            let help = Paragraph::new(Line::from(vec![
                Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Menu", Style::default().fg(Color::DarkGray)),
            ]));
            frame.render_widget(help, chunks[2]);
        }
    }

    fn reset(&mut self) {
        log::info!(target: "app", "new game");
        self.state = GameState::new(self.state.config);
        self.queued = Action::None;
        self.paused = false;
    }

    fn release_keys(&mut self) {
        self.state.held_key = None;
        self.queued = Action::None;
    }

    fn get_score(&self) -> u32 {
        self.state.score
    }

    fn is_game_over(&self) -> bool {
        self.state.is_over()
    }
}
