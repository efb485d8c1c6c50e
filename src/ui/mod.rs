pub mod analysis;
pub mod dashboard;
pub mod history;
pub mod login;
pub mod profile;
pub mod results;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use log::info;
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    analysis::{AnalysisEngine, AnalysisEvent},
    controller::{AppController, Page},
};

use self::{
    analysis::AnalysisView, history::HistoryView, login::LoginView, profile::ProfileView,
};

const TICK: Duration = Duration::from_millis(50);

/// Top-level UI shell: owns the controller, the analysis engine handle and
/// the per-page view states. Page views hold only ephemeral form state; all
/// application state changes go through controller operations.
pub struct App {
    pub(crate) controller: AppController,
    pub(crate) engine: AnalysisEngine,
    events: UnboundedReceiver<AnalysisEvent>,
    pub(crate) login: LoginView,
    pub(crate) analysis: AnalysisView,
    pub(crate) profile: ProfileView,
    pub(crate) history: HistoryView,
    pub(crate) export_dir: PathBuf,
    pub(crate) status: Option<String>,
    pub(crate) should_quit: bool,
}

pub fn run(
    controller: AppController,
    engine: AnalysisEngine,
    events: UnboundedReceiver<AnalysisEvent>,
) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(controller, engine, events).run_loop(&mut terminal);
    ratatui::restore();
    result
}

impl App {
    pub fn new(
        controller: AppController,
        engine: AnalysisEngine,
        events: UnboundedReceiver<AnalysisEvent>,
    ) -> Self {
        Self {
            controller,
            engine,
            events,
            login: LoginView::default(),
            analysis: AnalysisView::default(),
            profile: ProfileView::default(),
            history: HistoryView::default(),
            export_dir: dirs::download_dir().unwrap_or_else(std::env::temp_dir),
            status: None,
            should_quit: false,
        }
    }

    fn run_loop(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            self.drain_analysis_events();
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn drain_analysis_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AnalysisEvent::Progress { percent, message } => {
                    self.analysis.percent = percent;
                    self.analysis.message = message;
                }
                AnalysisEvent::Completed(result) => {
                    self.analysis = AnalysisView::default();
                    self.status = Some(format!("Analysis of {} complete", result.file_name));
                    self.controller.complete_analysis(result);
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let [main, status_bar] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.controller.state().page {
            Page::Login => login::render(frame, main, self),
            Page::Dashboard => dashboard::render(frame, main, self),
            Page::Analysis => analysis::render(frame, main, self),
            Page::Results => results::render(frame, main, self),
            Page::Profile => profile::render(frame, main, self),
            Page::History => history::render(frame, main, self),
        }

        self.render_status(frame, status_bar);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let text = self.status.as_deref().unwrap_or("");
        frame.render_widget(
            Paragraph::new(Line::from(text)).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        self.status = None;

        match self.controller.state().page {
            Page::Login => self.handle_login_key(key),
            Page::Dashboard => self.handle_dashboard_key(key),
            Page::Analysis => self.handle_analysis_key(key),
            Page::Results => self.handle_results_key(key),
            Page::Profile => self.handle_profile_key(key),
            Page::History => self.handle_history_key(key),
        }
    }

    /// Navigate, resetting the entered page's ephemeral view state.
    pub(crate) fn go(&mut self, page: Page) {
        match page {
            Page::Profile => {
                self.profile = ProfileView::from_user(self.controller.state().user.as_ref());
            }
            Page::History => self.history = HistoryView::default(),
            Page::Analysis => {
                // An in-flight analysis keeps its progress visible on return.
                if !self.analysis.running {
                    self.analysis = AnalysisView::default();
                }
            }
            _ => {}
        }
        self.controller.navigate(page);
    }

    pub(crate) fn logout(&mut self) {
        self.controller.logout();
        self.login = LoginView::default();
        info!("Returned to login screen");
    }
}
