use serde::{Deserialize, Serialize};

use crate::models::{AnalysisResult, User};

/// The six navigable pages. Never persisted; a fresh start is always Login.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Login,
    Dashboard,
    Analysis,
    Results,
    Profile,
    History,
}

impl Default for Page {
    fn default() -> Self {
        Page::Login
    }
}

/// The application state container. Views receive read-only references;
/// every mutation goes through one of the named transitions below.
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    pub page: Page,
    pub user: Option<User>,
    pub current_result: Option<AnalysisResult>,
    pub history: Vec<AnalysisResult>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the running analyses count from the history length.
    ///
    /// Runs inside every transition that changes the history length, so the
    /// count never depends on call-site discipline.
    pub fn sync_total_analyses(&mut self) {
        let total = self.history.len();
        if let Some(user) = self.user.as_mut() {
            user.total_analyses = total;
        }
    }

    pub fn login(&mut self, user: User) {
        self.user = Some(user);
        self.page = Page::Dashboard;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.current_result = None;
        self.page = Page::Login;
        // History stays in memory; only the persisted user record is erased.
    }

    /// Unconditional page switch. Pages with missing inputs (e.g. Results
    /// with no current result) render a prompt state instead of failing.
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn complete_analysis(&mut self, result: AnalysisResult) {
        self.history.insert(0, result.clone());
        self.sync_total_analyses();
        self.current_result = Some(result);
        self.page = Page::Results;
    }

    pub fn update_profile(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn select_history_entry(&mut self, result: AnalysisResult) {
        self.current_result = Some(result);
    }

    /// Remove a history entry by id. Returns whether anything was removed.
    pub fn delete_history_entry(&mut self, id: &str) -> bool {
        let before = self.history.len();
        self.history.retain(|entry| entry.id != id);
        if self.history.len() == before {
            return false;
        }

        self.sync_total_analyses();
        if self
            .current_result
            .as_ref()
            .is_some_and(|current| current.id == id)
        {
            self.current_result = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;
    use chrono::Utc;

    fn result(id: &str) -> AnalysisResult {
        AnalysisResult {
            id: id.into(),
            risk_percentage: 50,
            risk_level: RiskLevel::from_percentage(50),
            file_name: format!("{id}.pdf"),
            file_size: "1.00 MB".into(),
            analysis_date: Utc::now(),
            factors: Vec::new(),
            overall_recommendation: "ok".into(),
        }
    }

    #[test]
    fn complete_analysis_prepends_and_syncs_count() {
        let mut state = ControllerState::new();
        state.login(User::placeholder(Utc::now()));

        state.complete_analysis(result("1"));
        state.complete_analysis(result("2"));

        assert_eq!(state.history[0].id, "2");
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.user.as_ref().unwrap().total_analyses, 2);
        assert_eq!(state.page, Page::Results);
        assert_eq!(state.current_result.as_ref().unwrap().id, "2");
    }

    #[test]
    fn logout_clears_user_and_result_but_keeps_history() {
        let mut state = ControllerState::new();
        state.login(User::placeholder(Utc::now()));
        state.complete_analysis(result("1"));

        state.logout();

        assert!(state.user.is_none());
        assert!(state.current_result.is_none());
        assert_eq!(state.page, Page::Login);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn navigate_is_unconditional() {
        let mut state = ControllerState::new();
        state.navigate(Page::Results);
        assert_eq!(state.page, Page::Results);
        assert!(state.current_result.is_none());
    }

    #[test]
    fn delete_removes_by_id_and_clears_matching_current_result() {
        let mut state = ControllerState::new();
        state.login(User::placeholder(Utc::now()));
        state.complete_analysis(result("1"));
        state.complete_analysis(result("2"));

        assert!(state.delete_history_entry("2"));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.user.as_ref().unwrap().total_analyses, 1);
        assert!(state.current_result.is_none());

        assert!(!state.delete_history_entry("missing"));
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn select_history_entry_does_not_touch_history() {
        let mut state = ControllerState::new();
        state.complete_analysis(result("1"));
        let entry = state.history[0].clone();

        state.select_history_entry(entry.clone());

        assert_eq!(state.current_result, Some(entry));
        assert_eq!(state.history.len(), 1);
    }
}
