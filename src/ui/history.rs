use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controller::Page;
use crate::history::{filter_and_sort, LevelFilter, SortKey};
use crate::models::{AnalysisResult, RiskLevel};

use super::{results::level_color, App};

/// History browser state: filter/sort inputs plus a cursor into the derived
/// view. The derived view is recomputed from controller state on every draw
/// and never mutates the underlying history.
#[derive(Default)]
pub(crate) struct HistoryView {
    pub search: String,
    pub searching: bool,
    pub filter: LevelFilter,
    pub sort: SortKey,
    pub cursor: usize,
}

impl App {
    fn history_view(&self) -> Vec<AnalysisResult> {
        filter_and_sort(
            &self.controller.state().history,
            &self.history.search,
            self.history.filter,
            self.history.sort,
        )
    }

    fn selected_entry(&self) -> Option<AnalysisResult> {
        let view = self.history_view();
        view.get(self.history.cursor).cloned()
    }

    pub(crate) fn handle_history_key(&mut self, key: KeyEvent) {
        if self.history.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.history.searching = false,
                KeyCode::Backspace => {
                    self.history.search.pop();
                    self.history.cursor = 0;
                }
                KeyCode::Char(c) => {
                    self.history.search.push(c);
                    self.history.cursor = 0;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('/') => self.history.searching = true,
            KeyCode::Char('f') => {
                self.history.filter = self.history.filter.next();
                self.history.cursor = 0;
            }
            KeyCode::Char('s') => self.history.sort = self.history.sort.next(),
            KeyCode::Up => self.history.cursor = self.history.cursor.saturating_sub(1),
            KeyCode::Down => {
                let len = self.history_view().len();
                if self.history.cursor + 1 < len {
                    self.history.cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = self.selected_entry() {
                    self.controller.select_history_entry(entry);
                    self.go(Page::Results);
                }
            }
            KeyCode::Char('e') => {
                if let Some(entry) = self.selected_entry() {
                    self.export(&entry);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(entry) = self.selected_entry() {
                    self.controller.delete_history_entry(&entry.id);
                    let len = self.history_view().len();
                    self.history.cursor = self.history.cursor.min(len.saturating_sub(1));
                    self.status = Some(format!("Deleted {}", entry.file_name));
                }
            }
            KeyCode::Char('d') | KeyCode::Esc => self.go(Page::Dashboard),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }
}

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let view = app.history_view();

    let [summary, controls, list, hints] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    let total = state.history.len();
    let low = state
        .history
        .iter()
        .filter(|r| r.risk_level == RiskLevel::Low)
        .count();
    let high = state
        .history
        .iter()
        .filter(|r| r.risk_level >= RiskLevel::High)
        .count();
    let average = if total == 0 {
        0
    } else {
        state
            .history
            .iter()
            .map(|r| usize::from(r.risk_percentage))
            .sum::<usize>()
            / total
    };
    frame.render_widget(
        Paragraph::new(Line::from(format!(
            "{total} contracts   {low} low risk   {high} high/critical   {average}% average risk"
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Analysis History "),
        ),
        summary,
    );

    let search_style = if app.history.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Search: "),
            Span::styled(app.history.search.clone(), search_style),
            Span::styled(
                if app.history.searching { "_" } else { "" },
                search_style,
            ),
            Span::raw(format!(
                "    Risk: {}    Sort: {}",
                app.history.filter.label(),
                app.history.sort.label()
            )),
        ]))
        .block(Block::default().borders(Borders::ALL)),
        controls,
    );

    if view.is_empty() {
        let message = if state.history.is_empty() {
            "No analyses yet. Run your first contract analysis to see it here."
        } else {
            "No contracts match your current search and filter criteria."
        };
        frame.render_widget(
            Paragraph::new(Line::from(message)).block(Block::default().borders(Borders::ALL)),
            list,
        );
    } else {
        let mut lines: Vec<Line> = Vec::new();
        for (index, entry) in view.iter().enumerate() {
            let selected = index == app.history.cursor;
            let marker = if selected { "> " } else { "  " };
            let base = if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{:<28}", entry.file_name), base),
                Span::styled(format!("{:>10}  ", entry.file_size), base.fg(Color::Gray)),
                Span::styled(
                    format!("{}  ", entry.analysis_date.format("%b %-d, %Y %H:%M")),
                    base.fg(Color::Gray),
                ),
                Span::styled(
                    format!("{:>3}% {}", entry.risk_percentage, entry.risk_level.as_str()),
                    base.fg(level_color(entry.risk_level)),
                ),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            list,
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "  Enter: view   e: export   x: delete   /: search   f: risk filter   s: sort   d: dashboard",
            Style::default().fg(Color::DarkGray),
        ))),
        hints,
    );
}
