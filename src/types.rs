//! Shared types used across modules
//!
//! Records that are persisted by the profile store or passed between views
//! live here to keep the view modules free of circular imports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier used for the progress record when nobody is signed in
pub const DEFAULT_USER_ID: &str = "default";

/// Persisted gamification counters for one learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProgress {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub streak: u32,
    pub completed_lessons: u32,
    pub certificates: u32,
    pub current_skills: Vec<String>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: 1000,
            streak: 0,
            completed_lessons: 0,
            certificates: 0,
            current_skills: Vec::new(),
        }
    }
}

impl UserProgress {
    /// Returns the name of the first violated invariant, if any
    pub fn violated_invariant(&self) -> Option<&'static str> {
        if self.level == 0 {
            Some("level must be at least 1")
        } else if self.xp_to_next == 0 {
            Some("xpToNext must be positive")
        } else {
            None
        }
    }

    /// XP still missing before the next level
    pub fn xp_remaining(&self) -> u32 {
        self.xp_to_next.saturating_sub(self.xp)
    }

    /// Fill ratio of the level bar, clamped to `0.0..=1.0`
    pub fn level_fraction(&self) -> f32 {
        if self.xp_to_next == 0 {
            return 0.0;
        }
        (self.xp as f32 / self.xp_to_next as f32).min(1.0)
    }

    /// Add XP and roll over into new levels. Returns the number of levels gained.
    pub fn award_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp_to_next > 0 && self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

/// The signed-in learner, as produced by the mock sign-in form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    pub name: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl CurrentUser {
    /// Build a user from an email address; the display name is the local part.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            email: email.to_string(),
            name,
            id: Utc::now().timestamp_millis().to_string(),
            avatar: None,
        }
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "You"),
            Sender::Ai => write!(f, "Tutor"),
        }
    }
}

/// Presentation hint attached to a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Hint,
    Explanation,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Text => write!(f, "text"),
            MessageKind::Hint => write!(f, "hint"),
            MessageKind::Explanation => write!(f, "explanation"),
        }
    }
}

/// A single message in a tutor conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Create a message stamped with a fresh id and the current time
    pub fn new(sender: Sender, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageKind::Text, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_defaults() {
        let p = UserProgress::default();
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 0);
        assert_eq!(p.xp_to_next, 1000);
        assert!(p.current_skills.is_empty());
        assert!(p.violated_invariant().is_none());
    }

    #[test]
    fn test_progress_json_uses_camel_case() {
        let json = serde_json::to_value(UserProgress::default()).unwrap();
        assert_eq!(json["xpToNext"], 1000);
        assert_eq!(json["completedLessons"], 0);
        assert!(json["currentSkills"].is_array());
    }

    #[test]
    fn test_partial_record_fills_missing_fields() {
        let p: UserProgress = serde_json::from_str(r#"{"xp": 250, "streak": 3}"#).unwrap();
        assert_eq!(p.xp, 250);
        assert_eq!(p.streak, 3);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp_to_next, 1000);
    }

    #[test]
    fn test_award_xp_rolls_over_levels() {
        let mut p = UserProgress { xp: 950, ..Default::default() };
        assert_eq!(p.award_xp(100), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 50);

        assert_eq!(p.award_xp(2100), 2);
        assert_eq!(p.level, 4);
        assert_eq!(p.xp, 150);
    }

    #[test]
    fn test_user_from_email() {
        let user = CurrentUser::from_email("ada@example.com");
        assert_eq!(user.name, "ada");
        assert!(!user.id.is_empty());
    }
}
