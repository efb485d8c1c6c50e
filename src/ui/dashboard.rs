use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controller::Page;

use super::App;

impl App {
    pub(crate) fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') => self.go(Page::Analysis),
            KeyCode::Char('h') => self.go(Page::History),
            KeyCode::Char('r') => self.go(Page::Results),
            KeyCode::Char('p') => self.go(Page::Profile),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }
}

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let total = state.history.len();

    let [header, stats, menu] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    let greeting = state
        .user
        .as_ref()
        .map(|user| format!("Welcome back, {}!", user.name))
        .unwrap_or_else(|| "Welcome!".into());
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                greeting,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Upload a contract and get a risk breakdown in seconds."),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Dashboard ")),
        header,
    );

    let tiles = [
        ("Your Analyses", total.to_string()),
        ("Risk Factors Found", (total * 4).to_string()),
        ("Time Saved", format!("{}h", total * 2)),
        ("Success Rate", "98%".into()),
    ];
    let tile_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(stats);
    for ((label, value), tile) in tiles.iter().zip(tile_areas.iter()) {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    value.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(*label),
            ])
            .block(Block::default().borders(Borders::ALL)),
            *tile,
        );
    }

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from("  a  Analyze a contract"),
            Line::from("  h  Analysis history"),
            Line::from("  r  Latest results"),
            Line::from("  p  Profile"),
            Line::from(""),
            Line::from(Span::styled(
                "  o  Logout      q  Quit",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Actions ")),
        menu,
    );
}
