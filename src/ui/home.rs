use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::space_invaders::SpaceInvaders;

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════╗
 ║   V     V     V     V     V        T E R M        ║
 ║                  !                                ║
 ║        |                        V A D E R S       ║
 ║        A                                          ║
 ╚═══════════════════════════════════════════════════╝"#;

const KEY_STYLE: Style = Style::new().fg(Color::Rgb(80, 200, 255));
const DESC_STYLE: Style = Style::new().fg(Color::Rgb(140, 140, 140));

fn control(keys: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", keys), KEY_STYLE),
        Span::styled(desc, DESC_STYLE),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
    )])
}

fn game_controls(held_keys: bool) -> Vec<Line<'static>> {
    let movement = if held_keys {
        "Move (hold to glide)"
    } else {
        "Move one column"
    };
    vec![
        Line::from(""),
        heading("  \u{1f47e} Space Invaders"),
        Line::from(vec![Span::styled(
            "  Shoot every alien before they land!",
            Style::default().fg(Color::Rgb(100, 100, 120)),
        )]),
        Line::from(""),
        control("\u{2190} / \u{2192}  a / d", movement),
        control("Space / \u{2191}", "Shoot (3 in flight max)"),
        control("P", "Pause"),
        control("R", "Restart"),
        Line::from(""),
        heading("  Field"),
        control("A", "Your cannon"),
        control("V", "Alien, 10 pts"),
        control("| / !", "Your missile / theirs"),
        control("X", "Explosion"),
    ]
}

fn navigation() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        heading("  \u{1f527} Navigation"),
        control("Enter / 1", "Play"),
        control("Tab / Shift+Tab", "Switch tabs"),
        control("Esc", "Return to Home"),
        control("q / Ctrl+C", "Quit"),
    ]
}

pub fn render_home(frame: &mut Frame, area: Rect, game: &SpaceInvaders, held_keys: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Banner
            Constraint::Length(2), // Subtitle
            Constraint::Length(3), // Play prompt
            Constraint::Min(10),   // Controls
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(vec![Span::styled(
        "  \u{26a1} Defend the bottom row \u{26a1}  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let state = game.state();
    let prompt = if state.is_over() {
        format!("\u{25b6} Enter for a new game  (last: {})", state.message)
    } else if state.ticks > 0 {
        "\u{25b6} Enter to resume".to_string()
    } else {
        "\u{25b6} Enter to play".to_string()
    };
    let play = Paragraph::new(Line::from(vec![Span::styled(
        prompt,
        Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Rgb(40, 140, 40))),
    );
    frame.render_widget(play, chunks[2]);

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let nav = Paragraph::new(navigation()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" \u{2328} Navigation Control ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(nav, ctrl_cols[0]);

    let controls = Paragraph::new(game_controls(held_keys)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(40, 140, 40)))
            .title(" \u{1f3ae} Invaders Control ")
            .title_style(Style::default().fg(Color::Rgb(80, 255, 80)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[1]);

    let config = &state.config;
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  \u{1f980} ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  \u{2502}  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled(
            format!("{}x{} grid", config.width, config.height),
            Style::default().fg(Color::Rgb(100, 100, 130)),
        ),
        Span::styled("  \u{2502}  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("Best ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled(
            game.high_score().to_string(),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}
