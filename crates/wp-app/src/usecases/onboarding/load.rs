use std::sync::Arc;

use wp_core::ports::OnboardingStorePort;
use wp_core::{OnboardingState, UserId};

/// Use case for loading a user's onboarding record.
///
/// The first load creates the default record; later loads return the
/// stored one.
pub struct LoadOnboardingState {
    store: Arc<dyn OnboardingStorePort>,
}

impl LoadOnboardingState {
    pub fn new(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self { store }
    }

    /// Create a new LoadOnboardingState use case from cloned Arc<dyn Port> references.
    pub fn from_ports(store: Arc<dyn OnboardingStorePort>) -> Self {
        Self::new(store)
    }

    pub async fn execute(&self, user: &UserId) -> anyhow::Result<OnboardingState> {
        self.store.get_or_create(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::onboarding::test_support::{user, MockStore};

    #[tokio::test]
    async fn test_execute_creates_default_record_on_first_access() {
        let mut store = MockStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store
            .expect_upsert_default()
            .times(1)
            .returning(|_| Ok(OnboardingState::default()));

        let state = LoadOnboardingState::new(Arc::new(store))
            .execute(&user())
            .await
            .unwrap();

        assert_eq!(state, OnboardingState::default());
    }

    #[tokio::test]
    async fn test_execute_returns_existing_record_without_upsert() {
        let mut store = MockStore::new();
        store.expect_get().times(1).returning(|_| {
            Ok(Some(OnboardingState {
                leads_tour_completed: true,
                ..Default::default()
            }))
        });
        store.expect_upsert_default().never();

        let state = LoadOnboardingState::from_ports(Arc::new(store))
            .execute(&user())
            .await
            .unwrap();

        assert!(state.leads_tour_completed);
    }

    #[tokio::test]
    async fn test_execute_propagates_store_error() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Err(anyhow::anyhow!("store offline")));

        let result = LoadOnboardingState::new(Arc::new(store))
            .execute(&user())
            .await;

        assert!(result.is_err());
    }
}
