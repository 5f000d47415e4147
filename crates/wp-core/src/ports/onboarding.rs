//! Onboarding store port
//!
//! This port defines the contract for persisting and retrieving per-user
//! onboarding records. The wire protocol behind it is not the domain's concern.

use async_trait::async_trait;

use crate::ids::UserId;
use crate::onboarding::{OnboardingPatch, OnboardingState};

#[async_trait]
pub trait OnboardingStorePort: Send + Sync {
    /// Fetch the record for `user`, `None` if it was never created.
    async fn get(&self, user: &UserId) -> anyhow::Result<Option<OnboardingState>>;

    /// Create the default record if absent and return the stored record.
    ///
    /// Must be idempotent: concurrent calls for the same user yield one
    /// record and no error.
    async fn upsert_default(&self, user: &UserId) -> anyhow::Result<OnboardingState>;

    /// Apply a partial update. Last write wins.
    async fn set_fields(&self, user: &UserId, patch: &OnboardingPatch) -> anyhow::Result<()>;

    /// Read the record, creating the default one on first access.
    async fn get_or_create(&self, user: &UserId) -> anyhow::Result<OnboardingState> {
        match self.get(user).await? {
            Some(state) => Ok(state),
            None => self.upsert_default(user).await,
        }
    }
}
