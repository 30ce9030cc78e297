//! Learner records survive a restart when kept in the file store

use codementor::store::{JsonFileStore, KeyValueStore, ProfileStore, RecordState};
use codementor::types::UserProgress;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_progress_survives_reopen() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let saved = UserProgress {
        level: 2,
        xp: 120,
        current_skills: vec!["Lists".to_string()],
        ..Default::default()
    };

    {
        let store = ProfileStore::new(Arc::new(JsonFileStore::with_dir(dir.path().to_path_buf())?));
        store.save("1700000000000", &saved)?;
    }

    let store = ProfileStore::new(Arc::new(JsonFileStore::with_dir(dir.path().to_path_buf())?));
    assert_eq!(store.load_with_state("1700000000000"), (saved, RecordState::Stored));
    assert_eq!(store.load_with_state("someone-else").1, RecordState::Missing);
    Ok(())
}

#[test]
fn test_hand_edited_garbage_loads_as_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let kv = Arc::new(JsonFileStore::with_dir(dir.path().to_path_buf())?);
    kv.set("progress_default", "{ not json")?;

    let store = ProfileStore::new(kv);
    let (progress, state) = store.load_with_state("default");
    assert_eq!(state, RecordState::Malformed);
    assert_eq!(progress, UserProgress::default());
    Ok(())
}
