use anyhow::{Context, Result};
use log::warn;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::models::{AnalysisResult, User};

const USER_FILE: &str = "user.json";
const HISTORY_FILE: &str = "history.json";

/// Durable key-value persistence: two JSON documents under the app data dir,
/// one for the user record and one for the analysis history.
///
/// Reads fall back to defaults on missing or malformed data; write failures
/// are surfaced as errors so the controller can log and ignore them.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("contrascan")
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        self.write_json(USER_FILE, user)
    }

    pub fn clear_user(&self) -> Result<()> {
        let path = self.dir.join(USER_FILE);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    pub fn load_history(&self) -> Vec<AnalysisResult> {
        self.read_json(HISTORY_FILE).unwrap_or_default()
    }

    pub fn save_history(&self, history: &[AnalysisResult]) -> Result<()> {
        self.write_json(HISTORY_FILE, &history)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("Failed to read {}: {err}", path.display());
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Malformed data in {}, falling back to defaults: {err}", path.display());
                None
            }
        }
    }

    fn write_json<T: serde::Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.dir.join(file);
        let serialized = serde_json::to_string_pretty(value)?;
        fs::write(&path, serialized)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskLevel, User};
    use chrono::Utc;

    fn sample_result(name: &str) -> AnalysisResult {
        AnalysisResult {
            id: "1700000000000".into(),
            risk_percentage: 42,
            risk_level: RiskLevel::from_percentage(42),
            file_name: name.into(),
            file_size: "1.00 MB".into(),
            analysis_date: Utc::now(),
            factors: Vec::new(),
            overall_recommendation: "ok".into(),
        }
    }

    #[test]
    fn history_round_trips_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().to_path_buf()).unwrap();

        let history = vec![sample_result("b.pdf"), sample_result("a.pdf")];
        store.save_history(&history).unwrap();

        let loaded = store.load_history();
        assert_eq!(loaded, history);
    }

    #[test]
    fn missing_history_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().to_path_buf()).unwrap();
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn malformed_history_falls_back_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().to_path_buf()).unwrap();
        std::fs::write(tmp.path().join("history.json"), "{not json").unwrap();
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn clear_user_removes_the_record() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path().to_path_buf()).unwrap();

        store.save_user(&User::placeholder(Utc::now())).unwrap();
        assert!(tmp.path().join("user.json").exists());

        store.clear_user().unwrap();
        assert!(!tmp.path().join("user.json").exists());

        // Clearing an absent record is not an error.
        store.clear_user().unwrap();
    }
}
