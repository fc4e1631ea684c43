use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use termvaders::sim::Config;

use crate::games::space_invaders::SpaceInvaders;
use crate::games::Game;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tab {
    Home,
    Invaders,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Invaders]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Invaders => " Invaders ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Invaders => 1,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub invaders: SpaceInvaders,
    /// Whether the terminal reports key releases.
    pub held_keys: bool,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>, held_keys: bool) -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            invaders: SpaceInvaders::new(config, seed, held_keys),
            held_keys,
        }
    }

    pub fn on_tick(&mut self) {
        match self.current_tab {
            Tab::Home => {}
            Tab::Invaders => self.invaders.update(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Releases and repeats only matter to the game being played
        if key.kind != KeyEventKind::Press {
            if self.current_tab == Tab::Invaders {
                self.invaders.handle_input(key);
            }
            return;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if self.current_tab == Tab::Home {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if self.current_tab != Tab::Home {
                    self.switch_to(Tab::Home);
                    return;
                }
            }
            _ => {}
        }

        if self.current_tab == Tab::Home && key.modifiers.is_empty() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('1')) {
                if self.invaders.is_game_over() {
                    self.invaders.reset();
                }
                self.switch_to(Tab::Invaders);
            }
            return;
        }

        match self.current_tab {
            Tab::Home => {}
            Tab::Invaders => self.invaders.handle_input(key),
        }
    }

    fn switch_to(&mut self, tab: Tab) {
        if tab != self.current_tab {
            log::debug!(target: "app", "switching to{}", tab.title());
            // Release events for keys held on the old tab will not reach the game
            self.invaders.release_keys();
            self.current_tab = tab;
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
