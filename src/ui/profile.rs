use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controller::Page;
use crate::models::user::{random_avatar_url, DEFAULT_AVATAR, DEFAULT_NAME};
use crate::models::User;

use super::App;

/// Profile viewer/editor form state.
#[derive(Default)]
pub(crate) struct ProfileView {
    pub editing: bool,
    pub focus: usize,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl ProfileView {
    pub(crate) fn from_user(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self {
                editing: false,
                focus: 0,
                name: user.name.clone(),
                email: user.email.clone(),
                avatar: user.avatar.clone(),
            },
            None => Self::default(),
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.email,
            _ => &mut self.avatar,
        }
    }
}

impl App {
    pub(crate) fn handle_profile_key(&mut self, key: KeyEvent) {
        if self.profile.editing {
            self.handle_profile_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('e') => {
                self.profile = ProfileView::from_user(self.controller.state().user.as_ref());
                self.profile.editing = true;
            }
            KeyCode::Char('d') | KeyCode::Esc => self.go(Page::Dashboard),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_profile_edit_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('a') {
                self.profile.avatar = random_avatar_url();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.profile = ProfileView::from_user(self.controller.state().user.as_ref());
            }
            KeyCode::Tab | KeyCode::Down => self.profile.focus = (self.profile.focus + 1) % 3,
            KeyCode::BackTab | KeyCode::Up => self.profile.focus = (self.profile.focus + 2) % 3,
            KeyCode::Enter => self.save_profile(),
            KeyCode::Backspace => {
                self.profile.field_mut().pop();
            }
            KeyCode::Char(c) => self.profile.field_mut().push(c),
            _ => {}
        }
    }

    fn save_profile(&mut self) {
        let Some(current) = self.controller.state().user.clone() else {
            return;
        };

        // Same fallbacks the original form applies before submitting.
        let name = if self.profile.name.trim().is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            self.profile.name.clone()
        };
        let avatar = if self.profile.avatar.trim().is_empty() {
            DEFAULT_AVATAR.to_string()
        } else {
            self.profile.avatar.clone()
        };

        let updated = User {
            name,
            email: self.profile.email.clone(),
            avatar,
            ..current
        };
        self.controller.update_profile(updated);
        self.profile = ProfileView::from_user(self.controller.state().user.as_ref());
        self.status = Some("Profile updated".into());
    }
}

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let view = &app.profile;

    let [info, form, hints] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Min(0),
    ])
    .areas(area);

    let (join_line, total_line) = match state.user.as_ref() {
        Some(user) => (
            format!("Member since {}", user.join_date.format("%B %-d, %Y")),
            format!("{} analyses performed", user.total_analyses),
        ),
        None => ("Not signed in".into(), String::new()),
    };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Your Profile",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(join_line),
            Line::from(total_line),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Profile ")),
        info,
    );

    let field = |label: &str, value: &str, index: usize| {
        let style = if view.editing && view.focus == index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("  {label:<8}"), Style::default().fg(Color::Gray)),
            Span::styled(value.to_string(), style),
            Span::styled(
                if view.editing && view.focus == index {
                    "_"
                } else {
                    ""
                },
                style,
            ),
        ])
    };

    let (name, email, avatar) = if view.editing {
        (view.name.as_str(), view.email.as_str(), view.avatar.as_str())
    } else {
        match state.user.as_ref() {
            Some(user) => (user.name.as_str(), user.email.as_str(), user.avatar.as_str()),
            None => ("", "", ""),
        }
    };

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            field("Name", name, 0),
            field("Email", email, 1),
            field("Avatar", avatar, 2),
        ])
        .block(Block::default().borders(Borders::ALL).title(if view.editing {
            " Edit Profile "
        } else {
            " Details "
        })),
        form,
    );

    let hint = if view.editing {
        "  Enter: save   Tab: next field   Ctrl+A: shuffle avatar   Esc: cancel"
    } else {
        "  e: edit   d: dashboard   o: logout   q: quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        ))),
        hints,
    );
}
