//! Profile Store - typed learner records on top of the key-value store
//!
//! Three records are kept:
//! - `codementor_user`: the signed-in user
//! - `codementor_profile`: the onboarding profile (global, not per user)
//! - `progress_<user id>`: gamification counters, `progress_default` when signed out
//!
//! Reads never fail. An absent record and a malformed one both resolve to
//! "nothing stored"; malformed data is logged so it can be told apart.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::KeyValueStore;
use crate::onboarding::OnboardingProfile;
use crate::types::{CurrentUser, UserProgress, DEFAULT_USER_ID};

pub const USER_KEY: &str = "codementor_user";
pub const PROFILE_KEY: &str = "codementor_profile";
const PROGRESS_PREFIX: &str = "progress_";

/// Storage key of the progress record for a user id
pub fn progress_key(user_id: &str) -> String {
    let id = if user_id.is_empty() { DEFAULT_USER_ID } else { user_id };
    format!("{}{}", PROGRESS_PREFIX, id)
}

/// What a read found under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Stored,
    Missing,
    Malformed,
}

impl std::fmt::Display for RecordState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordState::Stored => write!(f, "stored"),
            RecordState::Missing => write!(f, "missing"),
            RecordState::Malformed => write!(f, "malformed"),
        }
    }
}

/// Typed access to the learner records
#[derive(Clone)]
pub struct ProfileStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Progress for a user, or the defaults when nothing usable is stored
    pub fn load(&self, user_id: &str) -> UserProgress {
        self.load_with_state(user_id).0
    }

    /// Progress for a user together with what was found in storage
    pub fn load_with_state(&self, user_id: &str) -> (UserProgress, RecordState) {
        let key = progress_key(user_id);
        match self.read::<UserProgress>(&key) {
            (Some(progress), _) => match progress.violated_invariant() {
                None => (progress, RecordState::Stored),
                Some(reason) => {
                    warn!("Ignoring progress record {}: {}", key, reason);
                    (UserProgress::default(), RecordState::Malformed)
                }
            },
            (None, state) => (UserProgress::default(), state),
        }
    }

    /// Overwrite the progress record for a user
    pub fn save(&self, user_id: &str, progress: &UserProgress) -> Result<()> {
        let key = progress_key(user_id);
        self.write(&key, progress)?;
        debug!("Saved progress for {} (level {}, {} xp)", key, progress.level, progress.xp);
        Ok(())
    }

    pub fn load_user(&self) -> Option<CurrentUser> {
        self.read(USER_KEY).0
    }

    pub fn save_user(&self, user: &CurrentUser) -> Result<()> {
        self.write(USER_KEY, user)
    }

    pub fn load_profile(&self) -> Option<OnboardingProfile> {
        self.read(PROFILE_KEY).0
    }

    pub fn save_profile(&self, profile: &OnboardingProfile) -> Result<()> {
        self.write(PROFILE_KEY, profile)
    }

    /// Forget the signed-in user and the onboarding profile. Progress records stay.
    pub fn clear_session(&self) -> Result<()> {
        self.kv.remove(USER_KEY).context("Failed to remove stored user")?;
        self.kv.remove(PROFILE_KEY).context("Failed to remove stored profile")?;
        info!("Cleared stored session");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> (Option<T>, RecordState) {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (None, RecordState::Missing),
            Err(e) => {
                warn!("Could not read {}: {:#}", key, e);
                return (None, RecordState::Missing);
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => (Some(value), RecordState::Stored),
            Err(e) => {
                warn!("Malformed record under {}: {}", key, e);
                (None, RecordState::Malformed)
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize {}", key))?;
        self.kv
            .set(key, &json)
            .with_context(|| format!("Failed to store {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, MockKeyValueStore};

    fn store() -> (Arc<MemoryStore>, ProfileStore) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), ProfileStore::new(kv))
    }

    #[test]
    fn test_progress_key() {
        assert_eq!(progress_key("42"), "progress_42");
        assert_eq!(progress_key(""), "progress_default");
    }

    #[test]
    fn test_load_unknown_user_returns_defaults() {
        let (_, profiles) = store();
        let (progress, state) = profiles.load_with_state("never-saved");
        assert_eq!(progress, UserProgress::default());
        assert_eq!(state, RecordState::Missing);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_, profiles) = store();
        let progress = UserProgress {
            level: 3,
            xp: 420,
            xp_to_next: 1500,
            streak: 7,
            completed_lessons: 12,
            certificates: 1,
            current_skills: vec!["Variables".into(), "Lists".into()],
        };
        profiles.save("u1", &progress).unwrap();
        assert_eq!(profiles.load("u1"), progress);
        assert_eq!(profiles.load("u2"), UserProgress::default());
    }

    #[test]
    fn test_save_is_full_overwrite() {
        let (_, profiles) = store();
        let first = UserProgress { streak: 4, current_skills: vec!["Sets".into()], ..Default::default() };
        profiles.save("u1", &first).unwrap();
        let second = UserProgress { xp: 10, ..Default::default() };
        profiles.save("u1", &second).unwrap();
        assert_eq!(profiles.load("u1"), second);
    }

    #[test]
    fn test_malformed_json_falls_back_to_defaults() {
        let (kv, profiles) = store();
        kv.set("progress_u1", "{not json").unwrap();
        let (progress, state) = profiles.load_with_state("u1");
        assert_eq!(progress, UserProgress::default());
        assert_eq!(state, RecordState::Malformed);
    }

    #[test]
    fn test_wrong_types_and_broken_invariants_are_malformed() {
        let (kv, profiles) = store();
        kv.set("progress_u1", r#"{"xp": -5}"#).unwrap();
        assert_eq!(profiles.load_with_state("u1").1, RecordState::Malformed);

        kv.set("progress_u2", r#"{"level": 0}"#).unwrap();
        assert_eq!(profiles.load_with_state("u2"), (UserProgress::default(), RecordState::Malformed));
    }

    #[test]
    fn test_legacy_record_with_display_fields_still_loads() {
        let (kv, profiles) = store();
        kv.set(
            "progress_u1",
            r#"{"name":"ada","avatar":"","level":2,"xp":5,"xpToNext":1000,"streak":0,"completedLessons":1,"certificates":0,"currentSkills":[]}"#,
        )
        .unwrap();
        let (progress, state) = profiles.load_with_state("u1");
        assert_eq!(state, RecordState::Stored);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.completed_lessons, 1);
    }

    #[test]
    fn test_clear_session_keeps_progress() {
        let (kv, profiles) = store();
        profiles.save_user(&CurrentUser::from_email("ada@example.com")).unwrap();
        profiles.save("u1", &UserProgress { xp: 9, ..Default::default() }).unwrap();

        profiles.clear_session().unwrap();
        assert!(profiles.load_user().is_none());
        assert!(profiles.load_profile().is_none());
        assert!(kv.get("progress_u1").unwrap().is_some());
    }

    #[test]
    fn test_read_failure_is_treated_as_missing() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get()
            .returning(|_| Err(anyhow::anyhow!("disk unplugged")));
        let profiles = ProfileStore::new(Arc::new(kv));
        assert_eq!(profiles.load_with_state("u1"), (UserProgress::default(), RecordState::Missing));
        assert!(profiles.load_user().is_none());
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_set()
            .withf(|key, _| key == "progress_u1")
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("read-only")));
        let profiles = ProfileStore::new(Arc::new(kv));
        let err = profiles.save("u1", &UserProgress::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("read-only"));
    }
}
