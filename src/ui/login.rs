use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::controller::LoginProfile;

use super::App;

/// Sign-in / registration form. Purely page-local; the controller only ever
/// sees the final login profile.
pub(crate) struct LoginView {
    pub register: bool,
    pub focus: usize,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    /// Blocking alert (password mismatch). Dismissed by any key, never
    /// reaches the controller.
    pub alert: Option<String>,
}

impl Default for LoginView {
    fn default() -> Self {
        Self {
            register: false,
            focus: 0,
            name: "gopika".into(),
            email: String::new(),
            password: String::new(),
            confirm: String::new(),
            alert: None,
        }
    }
}

impl LoginView {
    fn field_count(&self) -> usize {
        if self.register {
            4
        } else {
            2
        }
    }

    fn field_mut(&mut self) -> &mut String {
        if self.register {
            match self.focus {
                0 => &mut self.name,
                1 => &mut self.email,
                2 => &mut self.password,
                _ => &mut self.confirm,
            }
        } else {
            match self.focus {
                0 => &mut self.email,
                _ => &mut self.password,
            }
        }
    }
}

impl App {
    pub(crate) fn handle_login_key(&mut self, key: KeyEvent) {
        if self.login.alert.is_some() {
            self.login.alert = None;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => {
                    self.login.register = !self.login.register;
                    self.login.focus = 0;
                }
                KeyCode::Char('g') => {
                    self.controller.login(LoginProfile::google());
                    self.login = LoginView::default();
                }
                KeyCode::Char('b') => {
                    self.controller.login(LoginProfile::github());
                    self.login = LoginView::default();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => {
                self.login.focus = (self.login.focus + 1) % self.login.field_count();
            }
            KeyCode::BackTab | KeyCode::Up => {
                let count = self.login.field_count();
                self.login.focus = (self.login.focus + count - 1) % count;
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.login.field_mut().pop();
            }
            KeyCode::Char(c) => self.login.field_mut().push(c),
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        if self.login.register && self.login.password != self.login.confirm {
            self.login.alert = Some("Passwords do not match!".into());
            return;
        }

        let name = if self.login.name.trim().is_empty() {
            // Fall back to the email local-part, as the form does.
            self.login
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            self.login.name.clone()
        };

        self.controller.login(LoginProfile {
            name,
            email: self.login.email.clone(),
            avatar: None,
        });
        self.login = LoginView::default();
    }
}

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.login;

    let [card] = Layout::horizontal([Constraint::Length(52)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::vertical([Constraint::Length(16)])
        .flex(Flex::Center)
        .areas(card);

    let title = if view.register {
        " Create your account "
    } else {
        " Contract Risk Analysis — Sign in "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut lines: Vec<Line> = vec![Line::from("")];
    let field = |label: &str, value: &str, index: usize, mask: bool| {
        let shown = if mask {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let style = if view.focus == index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("  {label:<10}"), Style::default().fg(Color::Gray)),
            Span::styled(shown, style),
            Span::styled(if view.focus == index { "_" } else { "" }, style),
        ])
    };

    if view.register {
        lines.push(field("Name", &view.name, 0, false));
        lines.push(field("Email", &view.email, 1, false));
        lines.push(field("Password", &view.password, 2, true));
        lines.push(field("Confirm", &view.confirm, 3, true));
    } else {
        lines.push(field("Email", &view.email, 0, false));
        lines.push(field("Password", &view.password, 1, true));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter: submit   Tab: next field   Ctrl+R: sign in/register",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "  Ctrl+G: continue with Google   Ctrl+B: continue with GitHub",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "  Esc: quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(alert) = view.alert.as_deref() {
        render_alert(frame, area, alert);
    }
}

fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let [modal] = Layout::horizontal([Constraint::Length(40)])
        .flex(Flex::Center)
        .areas(area);
    let [modal] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(modal);

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(message).alignment(Alignment::Center),
            Line::from(Span::styled(
                "press any key",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        ),
        modal,
    );
}
