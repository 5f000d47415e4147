//! In-memory onboarding store, used by tests and the demo CLI.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use wp_core::onboarding::{OnboardingPatch, OnboardingState};
use wp_core::ports::OnboardingStorePort;
use wp_core::UserId;

#[derive(Default)]
pub struct InMemoryOnboardingStore {
    records: Mutex<HashMap<UserId, OnboardingState>>,
}

impl InMemoryOnboardingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, replacing any existing one.
    pub async fn insert(&self, user: UserId, state: OnboardingState) {
        self.records.lock().await.insert(user, state);
    }

    pub async fn record_count(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl OnboardingStorePort for InMemoryOnboardingStore {
    async fn get(&self, user: &UserId) -> anyhow::Result<Option<OnboardingState>> {
        Ok(self.records.lock().await.get(user).cloned())
    }

    async fn upsert_default(&self, user: &UserId) -> anyhow::Result<OnboardingState> {
        let mut records = self.records.lock().await;
        Ok(records.entry(user.clone()).or_default().clone())
    }

    async fn set_fields(&self, user: &UserId, patch: &OnboardingPatch) -> anyhow::Result<()> {
        let mut records = self.records.lock().await;
        patch.apply(records.entry(user.clone()).or_default());
        Ok(())
    }
}
