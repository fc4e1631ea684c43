use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};
use crate::games::Game;

const BADGE_WIDTH: u16 = 26;

/// Tab titles on the left, a badge with the running game's state on the right.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .border_type(BorderType::Rounded)
        .title(" 👾 TermVaders ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(BADGE_WIDTH)])
        .split(inner);

    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            Line::from(Span::styled(t.title(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));
    frame.render_widget(tabs, cols[0]);

    let game = &app.invaders;
    let (label, color) = match game.state().outcome {
        Some(outcome) if outcome.is_win() => ("WON", Color::Rgb(80, 255, 80)),
        Some(_) => ("GAME OVER", Color::Rgb(255, 80, 80)),
        None if game.is_paused() => ("PAUSED", Color::Rgb(255, 220, 80)),
        None if game.state().ticks == 0 => ("READY", Color::Rgb(120, 120, 140)),
        None => ("LIVE", Color::Rgb(80, 200, 255)),
    };
    let badge = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", game.get_score()), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled("pts ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(badge, cols[1]);
}
