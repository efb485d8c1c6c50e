use chrono::Utc;
use log::{error, info};
use uuid::Uuid;

use crate::models::{user::random_avatar_url, AnalysisResult, User};
use crate::store::Store;

use super::{ControllerState, Page};

/// Identity supplied to [`AppController::login`], either from the sign-in
/// form or one of the canned provider pairs.
#[derive(Debug, Clone)]
pub struct LoginProfile {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl LoginProfile {
    pub fn google() -> Self {
        Self {
            name: "gopika".into(),
            email: "gopika@gmail.com".into(),
            avatar: None,
        }
    }

    pub fn github() -> Self {
        Self {
            name: "Jane Smith".into(),
            email: "jane.smith@github.com".into(),
            avatar: None,
        }
    }
}

/// Owns the application state and routes every mutation through a named
/// operation. State is updated in memory first; persistence failures are
/// logged and otherwise ignored so the UI stays consistent either way.
pub struct AppController {
    state: ControllerState,
    store: Store,
}

impl AppController {
    pub fn new(store: Store) -> Self {
        let mut controller = Self {
            state: ControllerState::new(),
            store,
        };
        controller.initialize();
        controller
    }

    /// Fresh application start: always lands on Login with a placeholder
    /// session. History is restored from disk; a previously persisted user
    /// record is never restored into a logged-in session.
    pub fn initialize(&mut self) {
        self.state = ControllerState {
            page: Page::Login,
            user: Some(User::placeholder(Utc::now())),
            current_result: None,
            history: self.store.load_history(),
        };
        self.state.sync_total_analyses();
        info!(
            "Initialized session with {} persisted analyses",
            self.state.history.len()
        );
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Always succeeds; there is no real authentication.
    pub fn login(&mut self, profile: LoginProfile) {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: profile.name,
            email: profile.email,
            avatar: profile.avatar.unwrap_or_else(random_avatar_url),
            join_date: Utc::now(),
            total_analyses: self.state.history.len(),
        };
        info!("User {} logged in", user.email);
        self.state.login(user);
        self.persist_user();
    }

    pub fn logout(&mut self) {
        info!("User logged out");
        self.state.logout();
        if let Err(err) = self.store.clear_user() {
            error!("Failed to erase persisted user: {err:#}");
        }
    }

    pub fn navigate(&mut self, page: Page) {
        self.state.navigate(page);
    }

    pub fn complete_analysis(&mut self, result: AnalysisResult) {
        info!(
            "Analysis complete for {} ({}%, {})",
            result.file_name,
            result.risk_percentage,
            result.risk_level.as_str()
        );
        self.state.complete_analysis(result);
        self.persist_history();
        self.persist_user();
    }

    pub fn update_profile(&mut self, user: User) {
        self.state.update_profile(user);
        self.persist_user();
    }

    pub fn select_history_entry(&mut self, result: AnalysisResult) {
        self.state.select_history_entry(result);
    }

    pub fn delete_history_entry(&mut self, id: &str) {
        if self.state.delete_history_entry(id) {
            self.persist_history();
            self.persist_user();
        }
    }

    fn persist_user(&self) {
        if let Some(user) = self.state.user.as_ref() {
            if let Err(err) = self.store.save_user(user) {
                error!("Failed to persist user: {err:#}");
            }
        }
    }

    fn persist_history(&self) {
        if let Err(err) = self.store.save_history(&self.state.history) {
            error!("Failed to persist history: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::produce_result;
    use crate::models::RiskLevel;

    fn controller() -> (AppController, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().to_path_buf()).unwrap();
        (AppController::new(store), tmp)
    }

    fn form_profile() -> LoginProfile {
        LoginProfile {
            name: "gopika".into(),
            email: "gopika@example.com".into(),
            avatar: None,
        }
    }

    #[test]
    fn fresh_start_lands_on_login_with_placeholder() {
        let (controller, _tmp) = controller();
        let state = controller.state();
        assert_eq!(state.page, Page::Login);
        assert!(state.history.is_empty());
        let user = state.user.as_ref().unwrap();
        assert_eq!(user.name, "Joe");
        assert_eq!(user.total_analyses, 0);
    }

    #[test]
    fn login_recomputes_total_from_history_length() {
        let (mut controller, _tmp) = controller();
        controller.login(form_profile());
        controller.complete_analysis(produce_result("a.pdf", 1024));
        controller.logout();

        controller.login(LoginProfile::google());
        let user = controller.state().user.as_ref().unwrap();
        assert_eq!(user.email, "gopika@gmail.com");
        assert_eq!(user.total_analyses, controller.state().history.len());
        assert_eq!(user.total_analyses, 1);
    }

    #[test]
    fn login_generates_avatar_when_none_supplied() {
        let (mut controller, _tmp) = controller();
        controller.login(LoginProfile::github());
        let user = controller.state().user.as_ref().unwrap();
        assert!(user.avatar.starts_with("https://"));
        assert_eq!(controller.state().page, Page::Dashboard);
    }

    #[test]
    fn history_survives_restart_but_session_does_not() {
        let tmp = tempfile::tempdir().unwrap();

        {
            let store = Store::open(tmp.path().to_path_buf()).unwrap();
            let mut controller = AppController::new(store);
            controller.login(form_profile());
            controller.complete_analysis(produce_result("kept.pdf", 2048));
        }

        let store = Store::open(tmp.path().to_path_buf()).unwrap();
        let controller = AppController::new(store);
        let state = controller.state();
        assert_eq!(state.page, Page::Login);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].file_name, "kept.pdf");
        // Placeholder session, but the count still tracks restored history.
        assert_eq!(state.user.as_ref().unwrap().name, "Joe");
        assert_eq!(state.user.as_ref().unwrap().total_analyses, 1);
    }

    #[test]
    fn delete_persists_shrunken_history() {
        let (mut controller, tmp) = controller();
        controller.login(form_profile());
        controller.complete_analysis(produce_result("a.pdf", 1024));
        let id = controller.state().history[0].id.clone();

        controller.delete_history_entry(&id);

        assert!(controller.state().history.is_empty());
        assert!(controller.state().current_result.is_none());
        assert_eq!(controller.state().user.as_ref().unwrap().total_analyses, 0);

        let store = Store::open(tmp.path().to_path_buf()).unwrap();
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn end_to_end_nda_scenario() {
        let (mut controller, _tmp) = controller();
        controller.login(form_profile());

        let result = produce_result("NDA.pdf", 1_048_576);
        controller.complete_analysis(result);

        let state = controller.state();
        assert_eq!(state.page, Page::Results);
        assert_eq!(state.history.len(), 1);

        let stored = &state.history[0];
        assert_eq!(stored.file_name, "NDA.pdf");
        assert_eq!(stored.file_size, "1.00 MB");
        assert_eq!(stored.factors.len(), 4);
        assert_eq!(
            stored.risk_level,
            RiskLevel::from_percentage(stored.risk_percentage)
        );
        assert_eq!(state.user.as_ref().unwrap().total_analyses, 1);
    }
}
