use log::error;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::controller::Page;
use crate::models::{AnalysisResult, FactorSeverity, RiskLevel};
use crate::report;

use super::App;

impl App {
    pub(crate) fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('e') => {
                if let Some(result) = self.controller.state().current_result.clone() {
                    self.export(&result);
                }
            }
            KeyCode::Char('a') => self.go(Page::Analysis),
            KeyCode::Char('h') => self.go(Page::History),
            KeyCode::Char('d') | KeyCode::Esc => self.go(Page::Dashboard),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    pub(crate) fn export(&mut self, result: &AnalysisResult) {
        match report::export_report(result, &self.export_dir) {
            Ok(path) => self.status = Some(format!("Report saved to {}", path.display())),
            Err(err) => {
                error!("Report export failed: {err:#}");
                self.status = Some(format!("Report export failed: {err}"));
            }
        }
    }
}

pub(crate) fn level_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::LightRed,
        RiskLevel::Critical => Color::Red,
    }
}

fn severity_color(severity: FactorSeverity) -> Color {
    match severity {
        FactorSeverity::Low => Color::Green,
        FactorSeverity::Medium => Color::Yellow,
        FactorSeverity::High => Color::Red,
    }
}

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.controller.state().current_result.as_ref() else {
        render_empty(frame, area);
        return;
    };

    let [summary, gauge, factors, footer] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(3),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(vec![
                Span::raw("File: "),
                Span::styled(
                    result.file_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({})", result.file_size),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(format!(
                "Analyzed: {}",
                result.analysis_date.format("%b %-d, %Y %H:%M")
            )),
            Line::from(vec![
                Span::raw("Risk Level: "),
                Span::styled(
                    result.risk_level.as_str(),
                    Style::default()
                        .fg(level_color(result.risk_level))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Analysis Results "),
        ),
        summary,
    );

    frame.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(level_color(result.risk_level)))
            .percent(u16::from(result.risk_percentage))
            .label(format!("Risk: {}%", result.risk_percentage)),
        gauge,
    );

    let mut lines: Vec<Line> = Vec::new();
    for factor in &result.factors {
        lines.push(Line::from(vec![
            Span::styled(
                factor.category.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", factor.severity.as_str()),
                Style::default().fg(severity_color(factor.severity)),
            ),
        ]));
        lines.push(Line::from(format!("  {}", factor.description)));
        lines.push(Line::from(Span::styled(
            format!("  -> {}", factor.recommendation),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Overall Recommendation",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(result.overall_recommendation.clone()));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Identified Risk Factors "),
        ),
        factors,
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "  e: export report   a: new analysis   h: history   d: dashboard   o: logout",
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL)),
        footer,
    );
}

fn render_empty(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from("No analysis selected yet."),
            Line::from(""),
            Line::from(Span::styled(
                "Run an analysis (a) or pick one from history (h).",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  a: analysis   h: history   d: dashboard",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Results ")),
        area,
    );
}
