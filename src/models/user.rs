use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_NAME: &str = "Joe";
pub const DEFAULT_EMAIL: &str = "joe123@gmail.com";
pub const DEFAULT_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face";

/// Locally simulated identity of the current application user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub join_date: DateTime<Utc>,
    pub total_analyses: usize,
}

impl User {
    /// Blank session seed installed on every fresh application start.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: DEFAULT_NAME.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            avatar: String::new(),
            join_date: now,
            total_analyses: 0,
        }
    }
}

/// Random portrait URL standing in for a real avatar upload.
pub fn random_avatar_url() -> String {
    let photo_id: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("https://images.unsplash.com/photo-{photo_id}?w=150&h=150&fit=crop&crop=face")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_starts_with_defaults_and_zero_analyses() {
        let user = User::placeholder(Utc::now());
        assert_eq!(user.name, DEFAULT_NAME);
        assert_eq!(user.email, DEFAULT_EMAIL);
        assert!(user.avatar.is_empty());
        assert_eq!(user.total_analyses, 0);
        assert!(!user.id.is_empty());
    }

    #[test]
    fn placeholder_ids_are_unique() {
        let now = Utc::now();
        assert_ne!(User::placeholder(now).id, User::placeholder(now).id);
    }
}
