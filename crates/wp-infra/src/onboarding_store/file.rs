//! File-based onboarding store
//!
//! This module provides a file-based implementation of the OnboardingStorePort,
//! persisting every user's onboarding record to one local JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;
use wp_core::onboarding::{OnboardingPatch, OnboardingState};
use wp_core::ports::OnboardingStorePort;
use wp_core::UserId;

pub const DEFAULT_ONBOARDING_STATE_FILE: &str = "onboarding.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredOnboardingRecord {
    #[serde(flatten)]
    state: OnboardingState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredOnboardingRecord {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: OnboardingState::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OnboardingFile {
    #[serde(default)]
    users: BTreeMap<UserId, StoredOnboardingRecord>,
}

pub struct FileOnboardingStore {
    state_file_path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileOnboardingStore {
    /// Create store with custom file path
    pub fn new(state_file_path: PathBuf) -> Self {
        Self {
            state_file_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_ONBOARDING_STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.state_file_path
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.state_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<OnboardingFile> {
        if !fs::try_exists(&self.state_file_path).await? {
            return Ok(OnboardingFile::default());
        }

        let content = fs::read_to_string(&self.state_file_path).await?;
        if content.trim().is_empty() {
            return Ok(OnboardingFile::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse onboarding state: {}", e))
    }

    async fn save(&self, file: &OnboardingFile) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(file)
            .map_err(|e| anyhow::anyhow!("Failed to serialize onboarding state: {}", e))?;

        let tmp_path = self.state_file_path.with_extension("json.tmp");
        let mut tmp = fs::File::create(&tmp_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create state file: {}", e))?;
        tmp.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write state file: {}", e))?;
        tmp.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync state file: {}", e))?;
        drop(tmp);

        fs::rename(&tmp_path, &self.state_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to replace state file: {}", e))?;
        Ok(())
    }
}

#[async_trait]
impl OnboardingStorePort for FileOnboardingStore {
    async fn get(&self, user: &UserId) -> anyhow::Result<Option<OnboardingState>> {
        let file = self.load().await?;
        Ok(file.users.get(user).map(|record| record.state.clone()))
    }

    async fn upsert_default(&self, user: &UserId) -> anyhow::Result<OnboardingState> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load().await?;
        if let Some(record) = file.users.get(user) {
            return Ok(record.state.clone());
        }

        file.users
            .insert(user.clone(), StoredOnboardingRecord::new(Utc::now()));
        self.save(&file).await?;
        debug!(user = %user, path = %self.state_file_path.display(), "created onboarding record");
        Ok(OnboardingState::default())
    }

    async fn set_fields(&self, user: &UserId, patch: &OnboardingPatch) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load().await?;
        let now = Utc::now();
        let record = file
            .users
            .entry(user.clone())
            .or_insert_with(|| StoredOnboardingRecord::new(now));
        patch.apply(&mut record.state);
        record.updated_at = now;
        self.save(&file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;
    use wp_core::{Milestone, TourId};

    fn user() -> UserId {
        UserId::from("user-1")
    }

    #[tokio::test]
    async fn test_get_returns_none_when_file_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOnboardingStore::new(temp_dir.path().join("nonexistent.json"));

        assert!(store.get(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_default_creates_record_once() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOnboardingStore::new(temp_dir.path().join("state.json"));

        let created = store.upsert_default(&user()).await.unwrap();
        assert_eq!(created, OnboardingState::default());

        store
            .set_fields(&user(), &OnboardingPatch::tour(TourId::Welcome, true))
            .await
            .unwrap();

        // A second upsert must not reset the existing record.
        let again = store.upsert_default(&user()).await.unwrap();
        assert!(again.welcome_tour_completed);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_produce_one_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileOnboardingStore::new(temp_dir.path().join("state.json")));

        let id = user();
        let (a, b) = tokio::join!(store.upsert_default(&id), store.upsert_default(&id));
        assert!(a.is_ok());
        assert!(b.is_ok());

        let file = store.load().await.unwrap();
        assert_eq!(file.users.len(), 1);
    }

    #[tokio::test]
    async fn test_set_fields_preserves_other_flags() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOnboardingStore::new(temp_dir.path().join("state.json"));

        store
            .set_fields(
                &user(),
                &OnboardingPatch::tour(TourId::Leads, true)
                    .with_milestone(Milestone::FirstEmailSent, true),
            )
            .await
            .unwrap();
        store
            .set_fields(&user(), &OnboardingPatch::tour(TourId::Campaign, true))
            .await
            .unwrap();

        let state = store.get(&user()).await.unwrap().unwrap();
        assert!(state.leads_tour_completed);
        assert!(state.campaign_tour_completed);
        assert!(state.first_email_sent);
        assert!(!state.welcome_tour_completed);
    }

    #[tokio::test]
    async fn test_records_are_isolated_per_user() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOnboardingStore::new(temp_dir.path().join("state.json"));
        let other = UserId::from("user-2");

        store
            .set_fields(&user(), &OnboardingPatch::tour(TourId::Accounts, true))
            .await
            .unwrap();
        store.upsert_default(&other).await.unwrap();

        assert!(store.get(&user()).await.unwrap().unwrap().accounts_tour_completed);
        assert!(!store.get(&other).await.unwrap().unwrap().accounts_tour_completed);
    }

    #[tokio::test]
    async fn test_set_fields_updates_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOnboardingStore::new(temp_dir.path().join("state.json"));

        store.upsert_default(&user()).await.unwrap();
        let created = store.load().await.unwrap().users[&user()].updated_at;
        store
            .set_fields(&user(), &OnboardingPatch::tour(TourId::Leads, true))
            .await
            .unwrap();
        let updated = store.load().await.unwrap().users[&user()].clone();

        assert!(updated.updated_at >= created);
        assert_eq!(updated.created_at, created);
    }

    #[tokio::test]
    async fn test_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOnboardingStore::with_defaults(temp_dir.path().to_path_buf());

        let expected_path = temp_dir.path().join(DEFAULT_ONBOARDING_STATE_FILE);
        assert_eq!(store.path(), expected_path.as_path());
    }

    #[tokio::test]
    async fn test_empty_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let state_file = temp_dir.path().join("empty.json");
        fs::write(&state_file, "").await.unwrap();

        let store = FileOnboardingStore::new(state_file);
        assert!(store.get(&user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let state_file = temp_dir.path().join("invalid.json");
        fs::write(&state_file, "{invalid json").await.unwrap();

        let store = FileOnboardingStore::new(state_file);
        let result = store.get(&user()).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
