use std::{fs, path::PathBuf};

use log::warn;
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::controller::Page;
use crate::models::format_file_size;

use super::App;

/// Upload-and-analyze form state. The path input stands in for the browser
/// drop zone; attaching never fails the analysis, it only resolves a size.
#[derive(Default)]
pub(crate) struct AnalysisView {
    pub path_input: String,
    pub attached: Option<AttachedFile>,
    pub running: bool,
    pub percent: u8,
    pub message: &'static str,
}

pub(crate) struct AttachedFile {
    pub name: String,
    pub bytes: u64,
}

impl App {
    pub(crate) fn handle_analysis_key(&mut self, key: KeyEvent) {
        // A started analysis runs to completion; there is no abort path.
        if self.analysis.running {
            return;
        }

        if self.analysis.attached.is_some() {
            match key.code {
                KeyCode::Enter => self.start_analysis(),
                KeyCode::Char('c') => {
                    self.analysis.attached = None;
                    self.analysis.path_input.clear();
                }
                KeyCode::Esc => self.go(Page::Dashboard),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.go(Page::Dashboard),
            KeyCode::Enter => self.attach_file(),
            KeyCode::Backspace => {
                self.analysis.path_input.pop();
            }
            KeyCode::Char(c) => self.analysis.path_input.push(c),
            _ => {}
        }
    }

    fn attach_file(&mut self) {
        let input = self.analysis.path_input.trim();
        if input.is_empty() {
            return;
        }

        let path = PathBuf::from(input);
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string());
        // Any file analyzes successfully; an unreadable path just counts as
        // zero bytes.
        let bytes = match fs::metadata(&path) {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                warn!("Could not stat {}: {err}", path.display());
                0
            }
        };

        self.analysis.attached = Some(AttachedFile { name, bytes });
    }

    fn start_analysis(&mut self) {
        let Some(file) = self.analysis.attached.as_ref() else {
            return;
        };
        self.engine.start(file.name.clone(), file.bytes);
        self.analysis.running = true;
        self.analysis.percent = 0;
        self.analysis.message = "Analyzing contract...";
    }
}

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.analysis;

    let [header, upload, progress, hints] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "AI Contract Analysis",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Supported formats: PDF, DOC, DOCX, TXT (Max 10MB)"),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Analysis ")),
        header,
    );

    let upload_lines = match view.attached.as_ref() {
        Some(file) => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("  {} ", file.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("({})", format_file_size(file.bytes)),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(Span::styled(
                "  ready to analyze",
                Style::default().fg(Color::Green),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from("  Path to contract file:"),
            Line::from(vec![
                Span::styled(
                    format!("  {}", view.path_input),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("_", Style::default().fg(Color::Yellow)),
            ]),
        ],
    };
    frame.render_widget(
        Paragraph::new(upload_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Upload Contract Document "),
        ),
        upload,
    );

    if view.running {
        let label = format!("{} {}%", view.message, view.percent);
        frame.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL))
                .gauge_style(Style::default().fg(Color::Magenta))
                .percent(u16::from(view.percent))
                .label(label),
            progress,
        );
    }

    let hint = if view.running {
        "  Analysis in progress..."
    } else if view.attached.is_some() {
        "  Enter: analyze contract   c: choose another file   Esc: dashboard"
    } else {
        "  Enter: attach file   Esc: dashboard"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        ))),
        hints,
    );
}
