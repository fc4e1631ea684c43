mod app;
mod cli;
mod error;
mod event;
mod games;
mod logging;
mod ui;

use std::io::{self, Stdout};

use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use cli::Args;
use error::AppError;
use event::{Event, EventHandler};

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    // Reject bad settings before touching the terminal
    let config = args.config()?;

    if let Some(path) = &args.log_file {
        logging::init_logger(args.log_level(), args.debug_filter.as_deref(), path)?;
    }
    info!(target: "app", "starting on a {}x{} grid, tick {} ms", config.width, config.height, args.tick_ms);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Key releases are only reported with the enhancement flags on
    let held_keys = matches!(supports_keyboard_enhancement(), Ok(true));
    if held_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        warn!(target: "input", "terminal does not report key releases, keys act as single presses");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(config, args.seed, held_keys);
    let event_handler = EventHandler::new(args.tick_rate());

    let result = run(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    if held_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(target: "app", "exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<(), AppError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
